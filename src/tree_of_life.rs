//! Queries against the synthetic tree of life (`/tree_of_life/*`).

use serde_json::{Value, json};

use crate::ClientError;
use crate::client::{OpenTreeClient, require_id_collections, require_one_id};

impl OpenTreeClient {
    /// Returns summary information about the current draft tree of life.
    ///
    /// With `study_list` set, the response includes the list of source
    /// studies. Response fields include `root_node_id`, `study_list`,
    /// `root_taxon_name`, `num_source_studies`, `taxonomy_version`,
    /// `root_ott_id`, `num_tips`, `date` and `tree_id`.
    pub fn tol_about(&self, study_list: bool) -> Result<Value, ClientError> {
        self.post_json("tree_of_life/about", json!({ "study_list": study_list }))
    }

    /// Returns the most recent common ancestor of a set of nodes in the
    /// draft tree.
    ///
    /// Accepts any combination of ott ids and node ids; at least one of the
    /// two collections must be given and a given collection must be
    /// non-empty. Ids absent from the synthetic tree are reported back in the
    /// response rather than failing the call.
    pub fn tol_mrca(
        &self,
        ott_ids: Option<&[u64]>,
        node_ids: Option<&[u64]>,
    ) -> Result<Value, ClientError> {
        require_id_collections(ott_ids, node_ids)?;
        self.post_json(
            "tree_of_life/mrca",
            json!({ "node_ids": node_ids, "ott_ids": ott_ids }),
        )
    }

    /// Returns the complete subtree of the draft tree below a given node.
    ///
    /// The start node is addressed by exactly one of `ott_id` or `node_id`.
    /// `tree_id` selects a synthesis tree; the service currently hosts a
    /// single draft tree, so it can be left unset.
    pub fn tol_subtree(
        &self,
        ott_id: Option<u64>,
        node_id: Option<u64>,
        tree_id: Option<&str>,
    ) -> Result<Value, ClientError> {
        require_one_id(ott_id, node_id)?;
        self.post_json(
            "tree_of_life/subtree",
            json!({ "ott_id": ott_id, "node_id": node_id, "tree_id": tree_id }),
        )
    }

    /// Returns the minimal subtree induced on the draft tree by a set of
    /// nodes.
    ///
    /// Same id-collection rules as [`Self::tol_mrca`]. Ids not found in the
    /// graph or absent from the synthetic tree are identified in the output.
    pub fn tol_induced_tree(
        &self,
        ott_ids: Option<&[u64]>,
        node_ids: Option<&[u64]>,
    ) -> Result<Value, ClientError> {
        require_id_collections(ott_ids, node_ids)?;
        self.post_json(
            "tree_of_life/induced_subtree",
            json!({ "node_ids": node_ids, "ott_ids": ott_ids }),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::{Value, json};

    use crate::transport::PreparedRequest;
    use crate::{ClientError, OpenTreeClient};

    fn client_with_canned(response: Value) -> OpenTreeClient {
        OpenTreeClient::new("http://service.test/v2")
            .expect("valid url")
            .with_transport(move |_request: &PreparedRequest| {
                Ok(serde_json::to_vec(&response).expect("serializable response"))
            })
    }

    fn client_counting_calls(called: &Rc<Cell<bool>>) -> OpenTreeClient {
        let called = Rc::clone(called);
        OpenTreeClient::new("http://service.test/v2")
            .expect("valid url")
            .with_transport(move |_request: &PreparedRequest| {
                called.set(true);
                Ok(b"{}".to_vec())
            })
    }

    #[test]
    fn about_returns_response_fields() {
        let client = client_with_canned(json!({"root_node_id": "ott1", "num_tips": 42}));
        let about = client.tol_about(true).expect("call succeeds");
        assert_eq!(about["root_node_id"], "ott1");
        assert_eq!(about["num_tips"], 42);
    }

    #[test]
    fn mrca_without_any_ids_never_touches_the_transport() {
        let called = Rc::new(Cell::new(false));
        let client = client_counting_calls(&called);

        let error = client.tol_mrca(None, None).expect_err("no ids given");
        assert!(matches!(error, ClientError::InvalidArgument(_)));
        assert!(!called.get());
    }

    #[test]
    fn mrca_rejects_empty_id_collections() {
        let called = Rc::new(Cell::new(false));
        let client = client_counting_calls(&called);

        let error = client
            .tol_mrca(Some(&[]), None)
            .expect_err("empty ott_ids");
        assert!(matches!(error, ClientError::InvalidArgument(_)));
        let error = client
            .tol_mrca(Some(&[412_129]), Some(&[]))
            .expect_err("empty node_ids");
        assert!(matches!(error, ClientError::InvalidArgument(_)));
        assert!(!called.get());
    }

    #[test]
    fn subtree_round_trips_payload_with_explicit_nulls() {
        let client = OpenTreeClient::new("http://service.test/v2")
            .expect("valid url")
            .with_transport(|request: &PreparedRequest| {
                let body: Value =
                    serde_json::from_slice(request.body.as_deref().expect("body present"))
                        .expect("body is JSON");
                assert_eq!(
                    body,
                    json!({"ott_id": 3_599_390_u64, "node_id": null, "tree_id": null})
                );
                Ok(b"{\"newick\": \"(a,b);\", \"tree_id\": null}".to_vec())
            });

        let subtree = client
            .tol_subtree(Some(3_599_390), None, None)
            .expect("call succeeds");
        assert_eq!(subtree["newick"], "(a,b);");
    }

    #[test]
    fn subtree_requires_exactly_one_id() {
        let called = Rc::new(Cell::new(false));
        let client = client_counting_calls(&called);

        let error = client.tol_subtree(None, None, None).expect_err("no id");
        assert!(matches!(error, ClientError::InvalidArgument(_)));
        let error = client
            .tol_subtree(Some(1), Some(2), None)
            .expect_err("both ids");
        assert!(matches!(error, ClientError::InvalidArgument(_)));
        assert!(!called.get());
    }

    #[test]
    fn induced_tree_posts_both_id_collections() {
        let client = OpenTreeClient::new("http://service.test/v2")
            .expect("valid url")
            .with_transport(|request: &PreparedRequest| {
                assert!(request.url.path().ends_with("/tree_of_life/induced_subtree"));
                let body: Value =
                    serde_json::from_slice(request.body.as_deref().expect("body present"))
                        .expect("body is JSON");
                assert_eq!(body, json!({"node_ids": null, "ott_ids": [292_466, 501_678]}));
                Ok(b"{\"subtree\": \"(a,b);\"}".to_vec())
            });

        client
            .tol_induced_tree(Some(&[292_466, 501_678]), None)
            .expect("call succeeds");
    }
}

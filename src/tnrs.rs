//! Taxonomic name resolution (`/tnrs/*`).

use serde_json::{Value, json};

use crate::ClientError;
use crate::client::OpenTreeClient;

impl OpenTreeClient {
    /// Matches a set of taxonomic names against known taxa.
    ///
    /// Homonyms and misspellings are disambiguated within a taxonomic
    /// context: pass one via `context_name` (see [`Self::tnrs_contexts`]) or
    /// let the service infer the shallowest context containing all
    /// unambiguous input names. `do_approximate_matching` enables fuzzy
    /// matching (substantially slower). When `ids` is given it labels the
    /// input names one-for-one and must therefore match `names` in length.
    pub fn tnrs_match_names(
        &self,
        names: &[&str],
        context_name: Option<&str>,
        do_approximate_matching: bool,
        ids: Option<&[&str]>,
        include_deprecated: bool,
        include_dubious: bool,
    ) -> Result<Value, ClientError> {
        if let Some(ids) = ids
            && ids.len() != names.len()
        {
            return Err(ClientError::invalid_argument(
                "ids must have the same length as names",
            ));
        }
        self.post_json(
            "tnrs/match_names",
            json!({
                "names": names,
                "context_name": context_name,
                "do_approximate_matching": do_approximate_matching,
                "ids": ids,
                "include_deprecated": include_deprecated,
                "include_dubious": include_dubious,
            }),
        )
    }

    /// Returns the pre-defined taxonomic contexts usable to scope TNRS
    /// queries.
    pub fn tnrs_contexts(&self) -> Result<Value, ClientError> {
        self.post_json("tnrs/contexts", json!({}))
    }

    /// Infers the least inclusive taxonomic context containing all
    /// unambiguous names in the input set.
    pub fn tnrs_infer_context(&self, names: &[&str]) -> Result<Value, ClientError> {
        self.post_json("tnrs/infer_context", json!({ "names": names }))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::{Value, json};

    use crate::transport::PreparedRequest;
    use crate::{ClientError, OpenTreeClient};

    #[test]
    fn match_names_sends_all_fields_with_explicit_nulls() {
        let client = OpenTreeClient::new("http://service.test/v2")
            .expect("valid url")
            .with_transport(|request: &PreparedRequest| {
                let body: Value =
                    serde_json::from_slice(request.body.as_deref().expect("body present"))
                        .expect("body is JSON");
                assert_eq!(
                    body,
                    json!({
                        "names": ["Aster", "Barnadesia"],
                        "context_name": null,
                        "do_approximate_matching": true,
                        "ids": null,
                        "include_deprecated": false,
                        "include_dubious": false,
                    })
                );
                Ok(b"{\"results\": []}".to_vec())
            });

        client
            .tnrs_match_names(&["Aster", "Barnadesia"], None, true, None, false, false)
            .expect("call succeeds");
    }

    #[test]
    fn match_names_rejects_mismatched_ids_length() {
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        let client = OpenTreeClient::new("http://service.test/v2")
            .expect("valid url")
            .with_transport(move |_request: &PreparedRequest| {
                flag.set(true);
                Ok(b"{}".to_vec())
            });

        let error = client
            .tnrs_match_names(&["Pan", "Homo"], None, true, Some(&["a"]), false, false)
            .expect_err("one id for two names");
        assert!(matches!(error, ClientError::InvalidArgument(_)));
        assert!(!called.get());
    }

    #[test]
    fn infer_context_posts_names_only() {
        let client = OpenTreeClient::new("http://service.test/v2")
            .expect("valid url")
            .with_transport(|request: &PreparedRequest| {
                assert!(request.url.path().ends_with("/tnrs/infer_context"));
                let body: Value =
                    serde_json::from_slice(request.body.as_deref().expect("body present"))
                        .expect("body is JSON");
                assert_eq!(body, json!({"names": ["Pan", "Homo", "Mus"]}));
                Ok(b"{\"context_name\": \"Tetrapods\"}".to_vec())
            });

        let context = client
            .tnrs_infer_context(&["Pan", "Homo", "Mus"])
            .expect("call succeeds");
        assert_eq!(context["context_name"], "Tetrapods");
    }
}

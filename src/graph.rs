//! Queries against the graph of life (`/graph/*`).

use serde_json::{Value, json};

use crate::ClientError;
use crate::client::{OpenTreeClient, require_one_id};

impl OpenTreeClient {
    /// Returns summary information about the graph database itself.
    pub fn gol_about(&self) -> Result<Value, ClientError> {
        self.post_json("graph/about", json!({}))
    }

    /// Returns a source tree as it exists within the graph, in newick format.
    ///
    /// The graph representation may differ slightly from the canonical tree
    /// in the study (tips unmappable to graph taxa are pruned on import), and
    /// nodes are labelled with ott ids.
    pub fn gol_source_tree(
        &self,
        study_id: &str,
        tree_id: &str,
        git_sha: &str,
        schema: Option<&str>,
    ) -> Result<Value, ClientError> {
        self.post_json(
            "graph/source_tree",
            json!({
                "study_id": study_id,
                "tree_id": tree_id,
                "git_sha": git_sha,
                "format": schema,
            }),
        )
    }

    /// Returns summary information about a node in the graph.
    ///
    /// The node is addressed by exactly one of `ott_id` or `node_id`. With
    /// `include_lineage` set, the response carries the node's draft-tree
    /// ancestors ordered from immediate parent to root.
    pub fn gol_node_info(
        &self,
        ott_id: Option<u64>,
        node_id: Option<u64>,
        include_lineage: bool,
    ) -> Result<Value, ClientError> {
        require_one_id(ott_id, node_id)?;
        self.post_json(
            "graph/node_info",
            json!({
                "ott_id": ott_id,
                "node_id": node_id,
                "include_lineage": include_lineage,
            }),
        )
    }
}

//! Queries against the reference taxonomy (`/taxonomy/*`).

use serde_json::{Value, json};

use crate::ClientError;
use crate::client::OpenTreeClient;

impl OpenTreeClient {
    /// Returns metadata about the taxonomy itself, including its version.
    pub fn taxonomy_about(&self) -> Result<Value, ClientError> {
        self.post_json("taxonomy/about", json!({}))
    }

    /// Returns the least inclusive common ancestral taxon of a set of taxa.
    ///
    /// `ott_ids` must be non-empty. With `include_lineage` set, the response
    /// lists the higher taxa containing the LICA, least inclusive first.
    pub fn taxonomy_lica(
        &self,
        ott_ids: &[u64],
        include_lineage: bool,
    ) -> Result<Value, ClientError> {
        if ott_ids.is_empty() {
            return Err(ClientError::invalid_argument(
                "ott_ids cannot be an empty list",
            ));
        }
        self.post_json(
            "taxonomy/lica",
            json!({ "ott_ids": ott_ids, "include_lineage": include_lineage }),
        )
    }

    /// Returns the complete taxonomic subtree below a taxon, in newick format.
    pub fn taxonomy_subtree(&self, ott_id: u64) -> Result<Value, ClientError> {
        self.post_json("taxonomy/subtree", json!({ "ott_id": ott_id }))
    }

    /// Returns information about a known taxon.
    pub fn taxonomy_taxon(&self, ott_id: u64, include_lineage: bool) -> Result<Value, ClientError> {
        self.post_json(
            "taxonomy/taxon",
            json!({ "ott_id": ott_id, "include_lineage": include_lineage }),
        )
    }
}

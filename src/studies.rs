//! Study search and retrieval (`/studies/*` and `/study/{id}/...`).
//!
//! Search endpoints POST a JSON query; retrieval endpoints GET with the
//! identifiers embedded in the URL path.

use serde_json::{Value, json};

use crate::ClientError;
use crate::client::{OpenTreeClient, encode_path_segment};
use crate::schema::{is_json_schema, schema_extension};

/// Payload of the study tree endpoints.
///
/// The `json` and `nexson` schemas decode as JSON; every other schema is
/// returned as the raw serialized tree text.
#[derive(Clone, Debug, PartialEq)]
pub enum TreePayload {
    Json(Value),
    Text(String),
}

impl TreePayload {
    /// Returns the JSON value for `json`/`nexson` payloads.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            TreePayload::Json(value) => Some(value),
            TreePayload::Text(_) => None,
        }
    }

    /// Returns the raw tree text for non-JSON payloads.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TreePayload::Json(_) => None,
            TreePayload::Text(text) => Some(text),
        }
    }
}

impl OpenTreeClient {
    /// Searches indexed studies by property.
    ///
    /// `study_property` and `value` must be given together; omit both to
    /// list all studies. `exact` disables fuzzy matching, `verbose` includes
    /// full metadata in the matches rather than bare nexson ids.
    pub fn studies_find_studies(
        &self,
        study_property: Option<&str>,
        value: Option<&str>,
        exact: bool,
        verbose: bool,
    ) -> Result<Value, ClientError> {
        let mut payload = json!({ "exact": exact, "verbose": verbose });
        match (study_property, value) {
            (Some(property), Some(value)) => {
                payload["property"] = Value::from(property);
                payload["value"] = Value::from(value);
            }
            (None, None) => {}
            _ => {
                return Err(ClientError::invalid_argument(
                    "study_property and value must be specified together",
                ));
            }
        }
        self.post_json("studies/find_studies", payload)
    }

    /// Searches for trees in indexed studies by property.
    pub fn studies_find_trees(
        &self,
        study_property: &str,
        value: &str,
        exact: bool,
        verbose: bool,
    ) -> Result<Value, ClientError> {
        self.post_json(
            "studies/find_trees",
            json!({
                "exact": exact,
                "verbose": verbose,
                "property": study_property,
                "value": value,
            }),
        )
    }

    /// Returns the properties searchable through the find endpoints.
    pub fn studies_properties(&self) -> Result<Value, ClientError> {
        self.post_json("studies/properties", json!({}))
    }

    /// Retrieves a complete study by id.
    pub fn get_study(&self, study_id: &str) -> Result<Value, ClientError> {
        let path = format!("study/{}", encode_path_segment(study_id));
        self.get_json(&path, &[])
    }

    /// Retrieves a study's metadata block.
    pub fn get_study_meta(&self, study_id: &str) -> Result<Value, ClientError> {
        let path = format!("study/{}/meta", encode_path_segment(study_id));
        self.get_json(&path, &[])
    }

    /// Retrieves one tree from a study in the requested schema.
    pub fn get_study_tree(
        &self,
        study_id: &str,
        tree_id: &str,
        schema: &str,
    ) -> Result<TreePayload, ClientError> {
        let path = self.study_tree_path(study_id, tree_id, schema)?;
        self.fetch_tree(&path, &[], schema)
    }

    /// Retrieves a named subtree of a study tree in the requested schema.
    pub fn get_study_subtree(
        &self,
        study_id: &str,
        tree_id: &str,
        subtree_id: &str,
        schema: &str,
    ) -> Result<TreePayload, ClientError> {
        let path = self.study_tree_path(study_id, tree_id, schema)?;
        self.fetch_tree(&path, &[("subtree_id", subtree_id)], schema)
    }

    /// Retrieves one OTU of a study; an empty `otu` lists them all.
    ///
    /// An HTTP-status failure here means the study or OTU was not found and
    /// is narrowed to [`ClientError::Service`].
    pub fn get_study_otu(&self, study_id: &str, otu: Option<&str>) -> Result<Value, ClientError> {
        let path = format!(
            "study/{}/otu/{}",
            encode_path_segment(study_id),
            encode_path_segment(otu.unwrap_or("")),
        );
        self.get_json(&path, &[]).map_err(narrow_lookup_failure)
    }

    /// Retrieves several OTUs of a study; an empty `otus` lists them all.
    ///
    /// Same not-found narrowing as [`Self::get_study_otu`].
    pub fn get_study_otus(&self, study_id: &str, otus: Option<&str>) -> Result<Value, ClientError> {
        let path = format!(
            "study/{}/otus/{}",
            encode_path_segment(study_id),
            encode_path_segment(otus.unwrap_or("")),
        );
        self.get_json(&path, &[]).map_err(narrow_lookup_failure)
    }

    /// Retrieves the OTU-to-taxon mapping of a study.
    pub fn get_study_otumap(&self, study_id: &str) -> Result<Value, ClientError> {
        let path = format!("study/{}/otumap", encode_path_segment(study_id));
        self.get_json(&path, &[])
    }

    fn study_tree_path(
        &self,
        study_id: &str,
        tree_id: &str,
        schema: &str,
    ) -> Result<String, ClientError> {
        let extension = schema_extension(schema)?;
        Ok(format!(
            "study/{}/tree/{}{extension}",
            encode_path_segment(study_id),
            encode_path_segment(tree_id),
        ))
    }

    fn fetch_tree(
        &self,
        path: &str,
        query: &[(&str, &str)],
        schema: &str,
    ) -> Result<TreePayload, ClientError> {
        if is_json_schema(schema) {
            Ok(TreePayload::Json(self.get_json(path, query)?))
        } else {
            Ok(TreePayload::Text(self.get_text(path, query)?))
        }
    }
}

/// Maps an HTTP-status failure to the in-band service error the OTU
/// endpoints report lookup misses with. Other failures pass through.
fn narrow_lookup_failure(error: ClientError) -> ClientError {
    match error {
        ClientError::HttpStatus { status, body } => ClientError::Service {
            message: format!("server returned status {status}: {body}"),
        },
        other => other,
    }
}

use crate::ClientError;

/// Tree-serialization format names mapped to the URL suffix the study
/// endpoints expect.
const SCHEMA_EXTENSIONS: &[(&str, &str)] = &[
    ("nexus", ".nex"),
    ("newick", ".tre"),
    ("nexml", ".nexml"),
    ("nexson", ".nexson"),
    ("json", ".json"),
];

/// Returns the URL extension for a tree-serialization format name.
///
/// Lookup is case-insensitive. An unknown name is a configuration error,
/// since the format only ever comes from a hard-coded call site.
pub fn schema_extension(schema: &str) -> Result<&'static str, ClientError> {
    let wanted = schema.to_ascii_lowercase();
    SCHEMA_EXTENSIONS
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, extension)| *extension)
        .ok_or_else(|| ClientError::UnknownSchema(schema.to_owned()))
}

/// Returns whether a format is decoded as JSON rather than raw text.
pub(crate) fn is_json_schema(schema: &str) -> bool {
    let wanted = schema.to_ascii_lowercase();
    wanted == "json" || wanted == "nexson"
}

#[cfg(test)]
mod tests {
    use super::{is_json_schema, schema_extension};
    use crate::ClientError;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(schema_extension("NEXUS").expect("known schema"), ".nex");
        assert_eq!(schema_extension("newick").expect("known schema"), ".tre");
    }

    #[test]
    fn unknown_schema_is_a_lookup_error() {
        let error = schema_extension("xml").expect_err("xml is not a tree schema");
        match error {
            ClientError::UnknownSchema(name) => assert_eq!(name, "xml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn only_nexson_and_json_decode_as_json() {
        assert!(is_json_schema("NexSon"));
        assert!(is_json_schema("json"));
        assert!(!is_json_schema("newick"));
        assert!(!is_json_schema("nexus"));
    }
}

//! Walk the study index and print the first few study ids.
//!
//! Run:
//! `cargo run --example list_studies`
//!
//! Optional env vars:
//! - `OPENTREE_BASE_URL` (defaults to the public v2 endpoint)

use opentree_client::OpenTreeClient;
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("OPENTREE_BASE_URL").ok();
    let client = match base_url {
        Some(url) => OpenTreeClient::new(url)?,
        None => OpenTreeClient::default_service()?,
    };

    let found = client.studies_find_studies(None, None, false, false)?;
    let matched = found
        .get("matched_studies")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    println!("{} studies indexed; first ten:", matched.len());
    for study in matched.iter().take(10) {
        if let Some(study_id) = study.get("ot:studyId").and_then(Value::as_str) {
            println!("{study_id}");
        }
    }
    Ok(())
}

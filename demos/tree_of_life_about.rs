//! Query the draft tree of life.
//!
//! Run:
//! `cargo run --example tree_of_life_about`
//!
//! Optional env vars:
//! - `OPENTREE_BASE_URL` (defaults to the public v2 endpoint)

use opentree_client::OpenTreeClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("OPENTREE_BASE_URL").ok();
    let client = match base_url {
        Some(url) => OpenTreeClient::new(url)?,
        None => OpenTreeClient::default_service()?,
    };

    let about = client.tol_about(false)?;
    println!("{}", serde_json::to_string_pretty(&about)?);

    let mrca = client.tol_mrca(Some(&[412_129, 536_234]), None)?;
    println!("{}", serde_json::to_string_pretty(&mrca)?);
    Ok(())
}

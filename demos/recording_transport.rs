//! Interpose a response cache on the transport seam.
//!
//! The client routes every request through the [`Transport`] trait, so a
//! recorder wraps the real HTTP transport instead of subclassing the client.
//!
//! Run:
//! `cargo run --example recording_transport`

use std::cell::RefCell;
use std::collections::HashMap;

use opentree_client::{ClientError, HttpTransport, OpenTreeClient, PreparedRequest, Transport};

type CassetteKey = (String, Option<Vec<u8>>);

/// Replays previously seen responses instead of re-fetching them.
#[derive(Default)]
struct RecordingTransport {
    inner: HttpTransport,
    cassette: RefCell<HashMap<CassetteKey, Vec<u8>>>,
}

impl Transport for RecordingTransport {
    fn fetch(&self, request: &PreparedRequest) -> Result<Vec<u8>, ClientError> {
        let key = (request.url.to_string(), request.body.clone());
        if let Some(recorded) = self.cassette.borrow().get(&key) {
            eprintln!("cassette hit: {}", request.url);
            return Ok(recorded.clone());
        }
        let response = self.inner.fetch(request)?;
        self.cassette.borrow_mut().insert(key, response.clone());
        Ok(response)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OpenTreeClient::default_service()?.with_transport(RecordingTransport::default());

    let first = client.tnrs_contexts()?;
    println!("{}", serde_json::to_string_pretty(&first)?);

    // Identical request; served from the cassette without a round trip.
    let second = client.tnrs_contexts()?;
    assert_eq!(first, second);
    println!("replayed the second lookup from the cassette");
    Ok(())
}

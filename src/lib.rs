//! Rust client library for the Open Tree of Life web API v2.
//!
//! Public API layers:
//! - [`OpenTreeClient`]: blocking client with one method per remote endpoint
//!   (tree-of-life, graph, TNRS, taxonomy, studies namespaces).
//! - [`Transport`]: the network-fetch seam; swap in a stub, recorder, or
//!   cache wrapper via [`OpenTreeClient::with_transport`].
//! - [`ClientError`]: unified error type used by all operations.
//!
//! Each call performs exactly one blocking round trip and the client keeps no
//! state between calls; construct one client per concurrent caller.

mod client;
mod error;
mod graph;
mod schema;
mod studies;
mod taxonomy;
mod tnrs;
mod transport;
mod tree_of_life;

/// Blocking Open Tree of Life API client.
pub use client::{DEFAULT_BASE_URL, OpenTreeClient};
/// Error type returned by all client operations.
pub use error::ClientError;
/// Tree-format extension lookup used by the study tree endpoints.
pub use schema::schema_extension;
/// Study tree payload: JSON for `json`/`nexson`, raw text otherwise.
pub use studies::TreePayload;
/// Network-fetch seam and its default HTTP implementation.
pub use transport::{HttpTransport, PreparedRequest, Transport};

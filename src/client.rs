use std::fmt;

use reqwest::Method;
use serde_json::Value;
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::ClientError;
use crate::transport::{HttpTransport, PreparedRequest, Transport};

/// Default public endpoint for the Open Tree of Life API v2.
pub const DEFAULT_BASE_URL: &str = "http://devapi.opentreeoflife.org/v2";

/// Blocking client for the Open Tree of Life web API.
///
/// One method per remote endpoint, grouped by API namespace
/// (`tree_of_life`, `graph`, `tnrs`, `taxonomy`, `studies`). Each call
/// performs exactly one round trip through the [`Transport`] seam and holds
/// no state between calls, so independent clients are fully isolated; share
/// one instance across threads only by serializing access to it.
pub struct OpenTreeClient {
    base_url: Url,
    testing_mode: bool,
    transport: Box<dyn Transport>,
}

impl fmt::Debug for OpenTreeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenTreeClient")
            .field("base_url", &self.base_url.as_str())
            .field("testing_mode", &self.testing_mode)
            .finish_non_exhaustive()
    }
}

impl OpenTreeClient {
    /// Creates a client with an explicit base URL.
    ///
    /// The URL is normalized to include a trailing slash, so relative endpoint
    /// paths join correctly.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.as_ref())
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.as_ref().to_owned()))?;

        Ok(Self {
            base_url: ensure_trailing_slash(parsed),
            testing_mode: false,
            transport: Box::new(HttpTransport::new()),
        })
    }

    /// Creates a client against [`DEFAULT_BASE_URL`].
    pub fn default_service() -> Result<Self, ClientError> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Returns a new client routing requests through `transport`.
    ///
    /// The default transport is [`HttpTransport`]. Substituting it is the
    /// customization point for stubbing, recording, or caching responses.
    #[must_use]
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    /// Switches testing mode on or off.
    ///
    /// In testing mode a JSON response carrying an `error` field is returned
    /// to the caller verbatim instead of failing the call. Intended for test
    /// harnesses that assert on raw service payloads.
    pub fn set_testing_mode(&mut self, testing_mode: bool) {
        self.testing_mode = testing_mode;
    }

    /// Returns whether testing mode is active.
    pub fn testing_mode(&self) -> bool {
        self.testing_mode
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a `POST` request with a JSON body and decodes the response as JSON.
    pub fn post_json(&self, path: &str, payload: Value) -> Result<Value, ClientError> {
        let raw = self.execute(Method::POST, path, &[], Some(&payload))?;
        self.decode_json(raw)
    }

    /// Sends a `GET` request and decodes the response as JSON.
    pub fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ClientError> {
        let raw = self.execute(Method::GET, path, query, None)?;
        self.decode_json(raw)
    }

    /// Sends a `GET` request and returns the response text unchanged.
    pub fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String, ClientError> {
        let raw = self.execute(Method::GET, path, query, None)?;
        Ok(String::from_utf8(raw)?)
    }

    fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: Option<&Value>,
    ) -> Result<Vec<u8>, ClientError> {
        let mut url = self.build_url(path)?;
        for (name, value) in query {
            url.query_pairs_mut().append_pair(name, value);
        }

        let (headers, body) = match payload {
            Some(value) => (
                vec![("content-type".to_owned(), "application/json".to_owned())],
                Some(serde_json::to_vec(value)?),
            ),
            None => (Vec::new(), None),
        };

        log::debug!("{method} {url}");
        let request = PreparedRequest {
            method,
            url,
            headers,
            body,
        };
        self.transport.fetch(&request)
    }

    fn decode_json(&self, raw: Vec<u8>) -> Result<Value, ClientError> {
        let text = String::from_utf8(raw)?;
        let value: Value = serde_json::from_str(&text)?;

        if !self.testing_mode
            && let Some(message) = value.as_object().and_then(|object| object.get("error"))
        {
            return Err(ClientError::Service {
                message: error_message(message),
            });
        }

        Ok(value)
    }

    fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|_| ClientError::InvalidPath(path.to_owned()))
    }
}

/// Renders the in-band `error` field as a message string.
///
/// The service reports errors as strings; anything else is kept as its JSON
/// rendering.
fn error_message(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_owned(),
        None => value.to_string(),
    }
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}

/// Percent-encodes a value for embedding as a URL path segment.
pub(crate) fn encode_path_segment(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Enforces the shared rule for endpoints taking two id collections: at least
/// one collection must be given, and a given collection must be non-empty.
pub(crate) fn require_id_collections(
    ott_ids: Option<&[u64]>,
    node_ids: Option<&[u64]>,
) -> Result<(), ClientError> {
    if ott_ids.is_none() && node_ids.is_none() {
        return Err(ClientError::invalid_argument(
            "must specify ott_ids or node_ids or both",
        ));
    }
    if ott_ids.is_some_and(<[u64]>::is_empty) {
        return Err(ClientError::invalid_argument(
            "ott_ids cannot be an empty list",
        ));
    }
    if node_ids.is_some_and(<[u64]>::is_empty) {
        return Err(ClientError::invalid_argument(
            "node_ids cannot be an empty list",
        ));
    }
    Ok(())
}

/// Enforces the shared rule for endpoints addressing a single node: exactly
/// one of the two ids must be given.
pub(crate) fn require_one_id(ott_id: Option<u64>, node_id: Option<u64>) -> Result<(), ClientError> {
    match (ott_id, node_id) {
        (None, None) => Err(ClientError::invalid_argument(
            "must specify ott_id or node_id",
        )),
        (Some(_), Some(_)) => Err(ClientError::invalid_argument(
            "ott_id and node_id are mutually exclusive",
        )),
        _ => Ok(()),
    }
}

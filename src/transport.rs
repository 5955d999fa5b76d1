use reqwest::Method;
use url::Url;

use crate::ClientError;

/// A fully assembled request, ready to hand to a [`Transport`].
///
/// The client builds one of these per call; the transport only has to move
/// bytes. Interposing layers (recording, replay, caching) can inspect every
/// field without re-deriving it from client state.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    /// Header name/value pairs. POST requests carry `content-type`.
    pub headers: Vec<(String, String)>,
    /// Serialized request body; `None` for GET-style calls.
    pub body: Option<Vec<u8>>,
}

/// The network-fetch seam.
///
/// [`crate::OpenTreeClient`] routes every request through this trait, so a
/// caller can substitute a stub, a recorder, or a cache wrapper for the real
/// HTTP round trip. Implementations return the raw response bytes for a
/// successful request and a [`ClientError`] for transport failures.
///
/// Any `Fn(&PreparedRequest) -> Result<Vec<u8>, ClientError>` closure is a
/// transport.
pub trait Transport {
    fn fetch(&self, request: &PreparedRequest) -> Result<Vec<u8>, ClientError>;
}

impl<F> Transport for F
where
    F: Fn(&PreparedRequest) -> Result<Vec<u8>, ClientError>,
{
    fn fetch(&self, request: &PreparedRequest) -> Result<Vec<u8>, ClientError> {
        self(request)
    }
}

/// Default transport backed by `reqwest::blocking`.
///
/// Non-success HTTP statuses become [`ClientError::HttpStatus`] carrying the
/// response body.
#[derive(Debug, Default)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, request: &PreparedRequest) -> Result<Vec<u8>, ClientError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status();
        let payload = response.bytes()?;

        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status,
                body: String::from_utf8_lossy(&payload).into_owned(),
            });
        }

        Ok(payload.to_vec())
    }
}

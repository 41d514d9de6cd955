//! Incoming HTTP request type.

use http_body_util::BodyExt;
use hyper::body::Body;

use crate::error::{BoxError, Error};

/// An incoming HTTP request.
///
/// Middleware only looks at [`method`](Request::method) and
/// [`url`](Request::url); headers and body travel through untouched. Header
/// values that are not valid UTF-8 are decoded lossily.
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) url: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
}

impl Request {
    /// A request with no headers and an empty body.
    ///
    /// `url` is the request target as sent on the wire, e.g. `/users?page=2`.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Buffers an `http::Request` into a [`Request`], collecting the whole body.
    ///
    /// `url` is the origin-form target (`/path?query`) even when the request
    /// carried an absolute-form URI, as HTTP/2 requests always do.
    pub async fn from_http<B>(req: http::Request<B>) -> Result<Self, Error>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::Body(e.into()))?
            .to_bytes();

        let headers = parts.headers.iter()
            .map(|(k, v)| (k.as_str().to_owned(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let url = parts.uri.path_and_query().map_or("/", |pq| pq.as_str()).to_owned();

        Ok(Self {
            method: parts.method.as_str().to_owned(),
            url,
            headers,
            body: body.to_vec(),
        })
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn url(&self) -> &str { &self.url }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The URL without its query string.
    pub fn path(&self) -> &str {
        self.url.split_once('?').map_or(self.url.as_str(), |(path, _)| path)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

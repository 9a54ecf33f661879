//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::Extensions;

/// An incoming HTTP request, as handed over by the transport.
///
/// The method is kept as the raw string that was received, so extension
/// methods (`PROPFIND`, `BREW`, ...) still reach a [`Resource`](crate::Resource)
/// that knows them. Path parameters are attached by the dispatcher once a
/// route has matched; before that [`params`](Request::params) is empty.
#[derive(Debug, Default)]
pub struct Request {
    method: String,
    path: String,
    query: Option<String>,
    headers: Vec<(String, String)>,
    body: Bytes,
    pub(crate) params: HashMap<String, String>,
    extensions: Extensions,
}

impl Request {
    /// Creates a request with no headers and an empty body.
    ///
    /// A `?query` suffix on `path` is split off into [`query`](Request::query).
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let mut path = path.into();
        let query = path.find('?').map(|at| {
            let query = path[at + 1..].to_owned();
            path.truncate(at);
            query
        });
        Self { method: method.into(), path, query, ..Self::default() }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// All path parameters captured by the matched route.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Typed attributes attached by the transport or by middleware.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

/// Transport boundary: adopt a request parsed by an `http`-speaking server.
///
/// Header values that are not visible ASCII are dropped; the extensions of
/// the original request are carried over.
impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        let headers = parts.headers.iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();

        Self {
            method: parts.method.as_str().to_owned(),
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers,
            body,
            params: HashMap::new(),
            extensions: parts.extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_splits_off_the_query_string() {
        let req = Request::new("GET", "/search?q=rust&page=2");
        assert_eq!(req.path(), "/search");
        assert_eq!(req.query(), Some("q=rust&page=2"));

        let req = Request::new("GET", "/plain");
        assert_eq!(req.query(), None);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new("POST", "/").with_header("Content-Type", "text/plain");
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn converts_from_http_request() {
        let mut req = http::Request::builder()
            .method(http::Method::PUT)
            .uri("http://testserver/books/7?draft=true")
            .header("x-request-id", "abc")
            .body(Bytes::from_static(b"payload"))
            .expect("valid request");
        req.extensions_mut().insert(7u32);

        let req = Request::from(req);
        assert_eq!(req.method(), "PUT");
        assert_eq!(req.path(), "/books/7");
        assert_eq!(req.query(), Some("draft=true"));
        assert_eq!(req.header("X-Request-Id"), Some("abc"));
        assert_eq!(req.body(), b"payload");
        assert_eq!(req.extensions().get::<u32>(), Some(&7));
        assert!(req.params().is_empty());
    }
}

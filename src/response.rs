//! Outgoing HTTP response type.
//!
//! Handlers do not return responses. The dispatcher creates one fresh
//! [`Response`] per request (`200`, empty body) and hands it to the handler by
//! `&mut`; the handler fills it in.

use std::borrow::Cow;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http_body_util::Full;
use serde::Serialize;

use crate::status::Status;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`Response::set_body`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Csv,          // text/csv
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain; charset=utf-8
    Xml,          // application/xml
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv         => "text/csv",
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response, mutated in place by handlers.
///
/// ```rust
/// use afterburner::{ContentType, Response, Status};
///
/// let mut res = Response::new();
/// res.set_text("hello");
/// assert_eq!(res.content_type(), Some("text/plain; charset=utf-8"));
///
/// res.set_status(Status::Created);
/// res.set_header("location", "/users/42");
/// res.set_body(ContentType::Xml, b"<ok/>".to_vec());
/// assert_eq!(res.text(), "<ok/>");
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    status: u16,
    content_type: Option<String>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// `200 OK`, no content type, empty body.
    pub fn new() -> Self {
        Self {
            status: Status::Ok.code(),
            content_type: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn status(&self) -> u16 { self.status }
    pub fn content_type(&self) -> Option<&str> { self.content_type.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Case-insensitive header lookup. `content-type` reads the typed
    /// content type; anything else is an extra header set via
    /// [`set_header`](Response::set_header).
    pub fn header(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
            return self.content_type();
        }
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Accepts a [`Status`] or a bare `u16`.
    pub fn set_status(&mut self, status: impl Into<u16>) {
        self.status = status.into();
    }

    /// Body as `text/plain; charset=utf-8`.
    pub fn set_text(&mut self, body: impl Into<String>) {
        self.set_body(ContentType::Text, body.into().into_bytes());
    }

    /// Body as `text/html; charset=utf-8`.
    pub fn set_html(&mut self, body: impl Into<String>) {
        self.set_body(ContentType::Html, body.into().into_bytes());
    }

    /// Serialises `value` as the body with `application/json`.
    ///
    /// On a serialisation error the response is left untouched.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        self.set_body(ContentType::Json, body);
        Ok(())
    }

    pub fn set_body(&mut self, content_type: ContentType, body: impl Into<Vec<u8>>) {
        self.content_type = Some(content_type.as_str().to_owned());
        self.body = body.into();
    }

    /// Replaces the body without touching the content type.
    pub fn set_raw_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    /// Sets an extra header, replacing any previous value under the same
    /// (case-insensitive) name.
    ///
    /// `Content-Type` goes through [`set_content_type`](Response::set_content_type).
    /// `Content-Length` is always computed from the body, so setting it does
    /// nothing.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
            self.set_content_type(value);
            return;
        }
        if name.eq_ignore_ascii_case(CONTENT_LENGTH.as_str()) {
            return;
        }
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Transport boundary: converts into an `http` response with a
    /// `content-type` (when set) and `content-length`.
    pub fn into_http(self) -> Result<http::Response<Full<Bytes>>, http::Error> {
        let mut builder = http::Response::builder()
            .status(self.status)
            .header(CONTENT_LENGTH, self.body.len());
        if let Some(content_type) = &self.content_type {
            builder = builder.header(CONTENT_TYPE, content_type.as_str());
        }
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(Bytes::from(self.body)))
    }
}

impl Default for Response {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_response_is_an_empty_200() {
        let res = Response::new();
        assert_eq!(res.status(), 200);
        assert!(res.body().is_empty());
        assert_eq!(res.content_type(), None);
    }

    #[test]
    fn json_sets_content_type_and_body() {
        let mut res = Response::new();
        res.set_json(&serde_json::json!({ "drink": "Coffee" })).expect("serialisable");
        assert_eq!(res.content_type(), Some("application/json"));
        let parsed: serde_json::Value = serde_json::from_slice(res.body()).expect("valid json");
        assert_eq!(parsed["drink"], "Coffee");
    }

    #[test]
    fn html_and_text_pick_their_content_types() {
        let mut res = Response::new();
        res.set_html("<h1>hi</h1>");
        assert!(res.content_type().is_some_and(|ct| ct.starts_with("text/html")));
        res.set_text("plain");
        assert!(res.content_type().is_some_and(|ct| ct.starts_with("text/plain")));
        assert_eq!(res.text(), "plain");
    }

    #[test]
    fn raw_body_keeps_content_type() {
        let mut res = Response::new();
        res.set_raw_body(b"Byte body".to_vec());
        res.set_content_type("text/plain");
        assert_eq!(res.content_type(), Some("text/plain"));
        assert_eq!(res.text(), "Byte body");
    }

    #[test]
    fn set_header_replaces_existing_value() {
        let mut res = Response::new();
        res.set_header("X-Trace", "1");
        res.set_header("x-trace", "2");
        assert_eq!(res.headers().len(), 1);
        assert_eq!(res.header("X-TRACE"), Some("2"));
    }

    #[test]
    fn content_type_header_is_the_typed_content_type() {
        let mut res = Response::new();
        res.set_text("hi");
        res.set_header("Content-Type", "application/xml");
        res.set_header("Content-Length", "999");
        assert_eq!(res.content_type(), Some("application/xml"));
        assert_eq!(res.header("content-type"), Some("application/xml"));
        assert!(res.headers().is_empty());

        let res = res.into_http().expect("valid response");
        let content_types: Vec<_> = res.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types, ["application/xml"]);
        let lengths: Vec<_> = res.headers().get_all(CONTENT_LENGTH).iter().collect();
        assert_eq!(lengths, ["2"]);
    }

    #[test]
    fn converts_into_http_response() {
        let mut res = Response::new();
        res.set_status(Status::NotFound);
        res.set_text("Not found");
        res.set_header("x-app", "afterburner");

        let res = res.into_http().expect("valid response");
        assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(res.headers()[http::header::CONTENT_LENGTH], "9");
        assert_eq!(res.headers()[http::header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(res.headers()["x-app"], "afterburner");
    }

    #[test]
    fn invalid_status_fails_conversion() {
        let mut res = Response::new();
        res.set_status(42u16);
        assert!(res.into_http().is_err());
    }
}

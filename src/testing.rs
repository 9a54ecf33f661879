//! In-process test client.
//!
//! Sends requests straight into [`App::handle`] without a socket, so tests
//! exercise routing, middleware and exception handling exactly as a transport
//! would.
//!
//! ```rust
//! use afterburner::{App, Request, Response};
//!
//! fn hello(_req: &Request, res: &mut Response) {
//!     res.set_text("Neato!");
//! }
//!
//! let app = App::new().route("/test", hello);
//! let client = app.test_client();
//!
//! // absolute URLs and bare paths both work
//! assert_eq!(client.get("http://testserver/test").unwrap().text(), "Neato!");
//! assert_eq!(client.post("/test").unwrap().text(), "Neato!");
//! assert_eq!(client.get("/missing").unwrap().status(), 404);
//! ```

use http::Uri;

use crate::app::App;
use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// A client bound to one [`App`]. Obtain via [`App::test_client`].
#[derive(Clone, Copy, Debug)]
pub struct TestClient<'a> {
    app: &'a App,
}

macro_rules! client_method {
    ($($name:ident => $method:expr;)+) => {
        $(
            #[doc = concat!("Sends a `", stringify!($name), "` request to `url`.")]
            pub fn $name(&self, url: &str) -> Result<Response, Error> {
                self.request($method, url)
            }
        )+
    };
}

impl<'a> TestClient<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    client_method! {
        get     => Method::Get;
        head    => Method::Head;
        post    => Method::Post;
        put     => Method::Put;
        delete  => Method::Delete;
        connect => Method::Connect;
        options => Method::Options;
        trace   => Method::Trace;
        patch   => Method::Patch;
    }

    /// Sends a body-less request. `url` may be absolute
    /// (`http://testserver/books?page=2`) or origin-form (`/books?page=2`);
    /// scheme and authority are ignored.
    pub fn request(&self, method: Method, url: &str) -> Result<Response, Error> {
        self.request_raw(method.as_str(), url)
    }

    /// Like [`request`](TestClient::request), for any method string,
    /// including extension methods.
    pub fn request_raw(&self, method: &str, url: &str) -> Result<Response, Error> {
        let uri: Uri = url.parse()?;
        let target = uri.path_and_query().map_or("/", |pq| pq.as_str());
        self.send(Request::new(method, target))
    }

    /// Sends a fully built request.
    pub fn send(&self, request: Request) -> Result<Response, Error> {
        self.app.handle(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(req: &Request, res: &mut Response) {
        res.set_text(format!("{} {} {}", req.method(), req.path(), req.query().unwrap_or("-")));
    }

    #[test]
    fn absolute_and_origin_form_urls_reach_the_same_route() {
        let app = App::new().route("/echo", echo);
        let client = app.test_client();
        assert_eq!(client.get("http://testserver/echo?x=1").unwrap().text(), "GET /echo x=1");
        assert_eq!(client.put("/echo").unwrap().text(), "PUT /echo -");
    }

    #[test]
    fn authority_only_url_targets_the_root() {
        let app = App::new().route("/", echo);
        assert_eq!(app.test_client().options("http://testserver").unwrap().text(), "OPTIONS / -");
    }

    #[test]
    fn extension_methods_can_be_sent() {
        let app = App::new().route("/echo", echo);
        let err = app.test_client().request_raw("BREW", "/echo").expect_err("not a standard method");
        assert_eq!(err.method(), Some("BREW"));
    }

    #[test]
    fn malformed_url_is_an_error() {
        let app = App::new();
        assert!(matches!(app.test_client().get("/bad path"), Err(Error::InvalidUri(_))));
    }
}

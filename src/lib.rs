//! # afterburner
//!
//! A small, synchronous web framework core: routing, per-method resources,
//! middleware and exception handling over a plain request/response pair.
//!
//! ## The contract
//!
//! afterburner turns one [`Request`] into one [`Response`]. It does not open
//! sockets, parse HTTP, terminate TLS, serve static files or render
//! templates. A transport converts its own request type into a [`Request`]
//! (there is a `From<http::Request<Bytes>>`), calls [`App::handle`], and
//! writes the result back out ([`Response::into_http`]).
//!
//! What is left is the part that differs between applications:
//!
//! - Ordered routing with `{name}` placeholders, first match wins
//! - Function handlers with an allowed-method set, and per-method [`Resource`]s
//! - A middleware stack with request and response hooks
//! - One optional exception handler that turns errors into responses
//!
//! ## Quick start
//!
//! ```rust
//! use afterburner::{App, Error, Method, Request, Resource, Response, Status};
//! use afterburner::middleware::Trace;
//!
//! fn greet(req: &Request, res: &mut Response) {
//!     let name = req.param("name").unwrap_or("stranger");
//!     res.set_text(format!("Sup {name}"));
//! }
//!
//! fn get_book(_req: &Request, res: &mut Response) -> Result<(), serde_json::Error> {
//!     res.set_json(&serde_json::json!({ "title": "Dune" }))
//! }
//!
//! fn on_error(_req: &Request, res: &mut Response, err: &Error) {
//!     res.set_status(Status::InternalServerError);
//!     res.set_text(err.to_string());
//! }
//!
//! let app = App::new()
//!     .middleware(Trace)
//!     .route("/hello/{name}", greet)
//!     .route_with_methods("/hello", greet, [Method::Get])
//!     .resource("/books", Resource::new().get(get_book))
//!     .exception_handler(on_error);
//!
//! let client = app.test_client();
//! assert_eq!(client.get("/hello/ferris").unwrap().text(), "Sup ferris");
//! assert_eq!(client.get("/books").unwrap().content_type(), Some("application/json"));
//! assert_eq!(client.post("/hello").unwrap().status(), 500);
//! assert_eq!(client.get("/nope").unwrap().status(), 404);
//! ```

mod app;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod status;
mod testing;

pub mod middleware;

pub use app::App;
pub use error::{BoxError, Error};
pub use handler::{Endpoint, FunctionHandler, Handler, IntoOutcome, Resource};
pub use method::{Method, UnknownMethod};
pub use middleware::{Middleware, Pipeline};
pub use request::Request;
pub use response::{ContentType, Response};
pub use router::{Route, RouteMatch, Router};
pub use status::Status;
pub use testing::TestClient;

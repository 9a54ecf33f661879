//! The application: route table, middleware pipeline and exception slot,
//! and the dispatch transaction that ties them together.
//!
//! # Lifecycle
//!
//! Registration needs `&mut App` (or takes `App` by value); dispatch only
//! needs `&App`. Build the app once, then share it. Nothing can be
//! registered once it is shared.
//!
//! # One request
//!
//! ```text
//! handle(request)
//!   └─ pipeline: process_request hooks, outermost first
//!        └─ dispatch
//!             ├─ no route  → 404 "Not found"
//!             └─ route     → resolve endpoint by method → call handler
//!                  └─ error → exception handler, if set; otherwise Err
//!   └─ pipeline: process_response hooks, innermost first
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::error::Error;
use crate::handler::{Endpoint, FunctionHandler, Handler, Resource};
use crate::method::Method;
use crate::middleware::{Middleware, Pipeline};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;
use crate::testing::TestClient;

type ExceptionHandler = Box<dyn Fn(&Request, &mut Response, &Error) + Send + Sync + 'static>;

/// A web application.
///
/// ```rust
/// use afterburner::{App, Request, Resource, Response};
///
/// fn reverse(req: &Request, res: &mut Response) {
///     let name = req.param("name").unwrap_or_default();
///     res.set_text(format!("{name} {}", name.chars().rev().collect::<String>()));
/// }
///
/// fn list_books(_req: &Request, res: &mut Response) {
///     res.set_text("all books");
/// }
///
/// let app = App::new()
///     .route("/reverse/{name}", reverse)
///     .resource("/books", Resource::new().get(list_books));
///
/// let res = app.test_client().get("/reverse/abc").unwrap();
/// assert_eq!(res.text(), "abc cba");
///
/// assert!(app.test_client().delete("/books").is_err());
/// ```
#[derive(Default)]
pub struct App {
    router: Router,
    pipeline: Pipeline,
    exception_handler: Option<ExceptionHandler>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ─────────────────────────────────────────────────────────

    /// Registers any endpoint under `pattern`.
    ///
    /// Fails with [`Error::DuplicateRoute`] if `pattern` is already taken,
    /// [`Error::RelativeRoute`] if it lacks the leading `/` and
    /// [`Error::InvalidRoute`] if it is not valid template syntax.
    pub fn add_endpoint(&mut self, pattern: &str, endpoint: impl Into<Endpoint>) -> Result<&mut Self, Error> {
        self.router.register(pattern, endpoint)?;
        Ok(self)
    }

    /// Registers a function handler that serves every standard method.
    pub fn add_route(&mut self, pattern: &str, handler: impl Handler) -> Result<&mut Self, Error> {
        self.add_endpoint(pattern, FunctionHandler::new(handler))
    }

    /// Registers a function handler that serves only `methods`.
    pub fn add_route_with_methods(
        &mut self,
        pattern: &str,
        handler: impl Handler,
        methods: impl IntoIterator<Item = Method>,
    ) -> Result<&mut Self, Error> {
        self.add_endpoint(pattern, FunctionHandler::with_methods(handler, methods))
    }

    /// Registers a per-method [`Resource`].
    pub fn add_resource(&mut self, pattern: &str, resource: Resource) -> Result<&mut Self, Error> {
        self.add_endpoint(pattern, resource)
    }

    /// Appends `middleware` to the pipeline as its new innermost layer.
    pub fn add_middleware(&mut self, middleware: impl Middleware) -> &mut Self {
        self.pipeline.push(middleware);
        self
    }

    /// Installs the exception handler, replacing any previous one.
    ///
    /// It receives every dispatch error and a fresh response to fill in;
    /// whatever the failing handler had written is discarded.
    pub fn set_exception_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&Request, &mut Response, &Error) + Send + Sync + 'static,
    {
        self.exception_handler = Some(Box::new(handler));
        self
    }

    // ── Fluent registration ──────────────────────────────────────────────────
    //
    // Same as the `add_*` methods, but by value and panicking on
    // configuration errors, which are bugs in the setup code.

    /// # Panics
    ///
    /// Panics if `pattern` is already registered or malformed.
    pub fn route(mut self, pattern: &str, handler: impl Handler) -> Self {
        self.add_route(pattern, handler).unwrap_or_else(|e| panic!("{e}"));
        self
    }

    /// # Panics
    ///
    /// Panics if `pattern` is already registered or malformed.
    pub fn route_with_methods(
        mut self,
        pattern: &str,
        handler: impl Handler,
        methods: impl IntoIterator<Item = Method>,
    ) -> Self {
        self.add_route_with_methods(pattern, handler, methods).unwrap_or_else(|e| panic!("{e}"));
        self
    }

    /// # Panics
    ///
    /// Panics if `pattern` is already registered or malformed.
    pub fn resource(mut self, pattern: &str, resource: Resource) -> Self {
        self.add_resource(pattern, resource).unwrap_or_else(|e| panic!("{e}"));
        self
    }

    pub fn middleware(mut self, middleware: impl Middleware) -> Self {
        self.add_middleware(middleware);
        self
    }

    pub fn exception_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Request, &mut Response, &Error) + Send + Sync + 'static,
    {
        self.set_exception_handler(handler);
        self
    }

    // ── Dispatch ─────────────────────────────────────────────────────────────

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// An in-process client that sends requests straight to [`handle`](App::handle).
    pub fn test_client(&self) -> TestClient<'_> {
        TestClient::new(self)
    }

    /// Runs one request through the pipeline and the dispatcher.
    ///
    /// Returns `Err` only when dispatch failed and no exception handler is
    /// installed; an unknown path is a normal `404` response.
    pub fn handle(&self, mut request: Request) -> Result<Response, Error> {
        self.pipeline.run(&mut request, |req| self.dispatch(req))
    }

    fn dispatch(&self, req: &mut Request) -> Result<Response, Error> {
        let mut res = Response::new();

        let Some(matched) = self.router.find(req.path()) else {
            debug!(method = req.method(), path = req.path(), "no route matched");
            not_found(&mut res);
            return Ok(res);
        };

        debug!(method = req.method(), path = req.path(), route = matched.route.pattern(), "route matched");
        req.params = matched.params;

        let outcome = matched.route.endpoint()
            .resolve(req.method())
            .and_then(|handler| handler.call(req, &mut res).map_err(Error::Handler));

        match (outcome, &self.exception_handler) {
            (Ok(()), _) => Ok(res),
            (Err(err), Some(on_error)) => {
                warn!(method = req.method(), path = req.path(), error = %err, "dispatch failed, running exception handler");
                let mut res = Response::new();
                on_error(req, &mut res, &err);
                Ok(res)
            }
            (Err(err), None) => {
                debug!(method = req.method(), path = req.path(), error = %err, "dispatch failed, no exception handler");
                Err(err)
            }
        }
    }
}

/// The response for a path no route matches.
fn not_found(res: &mut Response) {
    res.set_status(Status::NotFound);
    res.set_text("Not found");
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("router", &self.router)
            .field("pipeline", &self.pipeline)
            .field("exception_handler", &self.exception_handler.is_some())
            .finish()
    }
}

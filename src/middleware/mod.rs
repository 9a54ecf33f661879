//! Middleware layer.
//!
//! Middleware intercepts requests on the way in and responses on the way out.
//! It is the place for cross-cutting concerns: tracing, request ids, header
//! stamping.
//!
//! # Ordering
//!
//! Middleware nests like a stack. The first one added is the outermost:
//!
//! ```text
//! add(A); add(B); add(C);
//!
//! A.process_request
//!   B.process_request
//!     C.process_request
//!       dispatch (router → handler)
//!     C.process_response
//!   B.process_response
//! A.process_response
//! ```
//!
//! Middleware never sees errors. If dispatch fails and no exception handler
//! is set, the error unwinds straight through the stack and no further
//! `process_response` hook runs.
//!
//! Built-in middleware:
//! - [`Trace`]: one `tracing` event per request with method, path, status, latency

mod trace;

pub use trace::{RequestStart, Trace};

use std::fmt;

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// A pair of hooks around the core dispatch.
///
/// Both hooks default to doing nothing, so implement only what you need:
///
/// ```rust
/// use afterburner::{Middleware, Request, Response};
///
/// struct PoweredBy;
///
/// impl Middleware for PoweredBy {
///     fn process_response(&self, _req: &Request, res: &mut Response) {
///         res.set_header("x-powered-by", "afterburner");
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Runs before dispatch. May attach extensions to the request.
    fn process_request(&self, _req: &mut Request) {}

    /// Runs after a successful dispatch.
    fn process_response(&self, _req: &Request, _res: &mut Response) {}
}

/// An ordered middleware stack.
///
/// A `Pipeline` is itself a [`Middleware`], so a group of middleware can be
/// registered as a single unit and keeps its inner ordering.
#[derive(Default)]
pub struct Pipeline {
    stack: Vec<Box<dyn Middleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `middleware` as the new innermost layer.
    pub fn push(&mut self, middleware: impl Middleware) {
        self.stack.push(Box::new(middleware));
    }

    /// Builder form of [`push`](Pipeline::push).
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.push(middleware);
        self
    }

    pub fn len(&self) -> usize { self.stack.len() }
    pub fn is_empty(&self) -> bool { self.stack.is_empty() }

    /// Runs `core` wrapped in every layer of the stack.
    ///
    /// `core` has the same shape as the pipeline itself, so callers cannot
    /// tell whether any middleware is installed.
    pub fn run<F>(&self, req: &mut Request, core: F) -> Result<Response, Error>
    where
        F: FnOnce(&mut Request) -> Result<Response, Error>,
    {
        wrap(&self.stack, req, core)
    }
}

fn wrap<F>(stack: &[Box<dyn Middleware>], req: &mut Request, core: F) -> Result<Response, Error>
where
    F: FnOnce(&mut Request) -> Result<Response, Error>,
{
    let Some((outer, inner)) = stack.split_first() else {
        return core(req);
    };

    outer.process_request(req);
    let mut res = wrap(inner, req, core)?;
    outer.process_response(req, &mut res);
    Ok(res)
}

impl Middleware for Pipeline {
    fn process_request(&self, req: &mut Request) {
        for middleware in &self.stack {
            middleware.process_request(req);
        }
    }

    fn process_response(&self, req: &Request, res: &mut Response) {
        for middleware in self.stack.iter().rev() {
            middleware.process_response(req, res);
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("len", &self.stack.len()).finish()
    }
}

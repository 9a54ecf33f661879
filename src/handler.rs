//! Handler trait, resources and per-request handler resolution.
//!
//! # Two kinds of endpoint
//!
//! A route points at an [`Endpoint`], which is one of:
//!
//! - **Function**: a single handler that serves every method in its allowed
//!   set (all standard methods unless narrowed at registration).
//! - **Resource**: a capability set: one handler per method, looked up by
//!   the lowercase method name. A method with no member is not allowed.
//!
//! ```text
//! fn hello(req: &Request, res: &mut Response) { … }  ← user writes this
//!        ↓ app.add_route("/", hello)
//! hello.into_boxed_handler()                         ← Handler blanket impl
//!        ↓  stored as BoxedHandler = Box<dyn ErasedHandler>
//! endpoint.resolve("GET")?.call(&req, &mut res)      ← at request time
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::error::{BoxError, Error};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

// ── Internal types ────────────────────────────────────────────────────────────

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: &Request, res: &mut Response) -> Result<(), BoxError>;
}

/// A heap-allocated, type-erased handler.
#[doc(hidden)]
pub type BoxedHandler = Box<dyn ErasedHandler + Send + Sync + 'static>;

// ── Outcome ───────────────────────────────────────────────────────────────────

/// What a handler may return: nothing, or a `Result` whose error converts
/// into a [`BoxError`].
///
/// ```rust
/// use afterburner::{Request, Response};
///
/// fn infallible(_req: &Request, res: &mut Response) {
///     res.set_text("ok");
/// }
///
/// fn fallible(req: &Request, res: &mut Response) -> Result<(), std::num::ParseIntError> {
///     let id: u32 = req.param("id").unwrap_or_default().parse()?;
///     res.set_text(format!("book {id}"));
///     Ok(())
/// }
/// ```
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> { Ok(()) }
}

impl<E: Into<BoxError>> IntoOutcome for Result<(), E> {
    fn into_outcome(self) -> Result<(), BoxError> { self.map_err(Into::into) }
}

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// function or closure with the signature:
///
/// ```text
/// fn name(req: &Request, res: &mut Response) -> impl IntoOutcome
/// ```
///
/// Closures need their argument types spelled out
/// (`|req: &Request, res: &mut Response| …`) so that they are generic over
/// the borrow lifetimes.
///
/// The trait is **sealed**: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, R> private::Sealed for F
where
    F: Fn(&Request, &mut Response) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
}

impl<F, R> Handler for F
where
    F: Fn(&Request, &mut Response) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Box::new(FnHandler(self))
    }
}

/// Newtype wrapper that holds a concrete handler `F` and implements
/// [`ErasedHandler`], bridging the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, R> ErasedHandler for FnHandler<F>
where
    F: Fn(&Request, &mut Response) -> R,
    R: IntoOutcome,
{
    fn call(&self, req: &Request, res: &mut Response) -> Result<(), BoxError> {
        (self.0)(req, res).into_outcome()
    }
}

// ── Resource ──────────────────────────────────────────────────────────────────

/// A capability-set handler: one handler per HTTP method.
///
/// Members are keyed by lowercase method name. Only the methods that have a
/// member are served; any other method fails with
/// [`Error::MethodNotAllowed`].
///
/// ```rust
/// use afterburner::{Request, Resource, Response};
///
/// fn list(_req: &Request, res: &mut Response) { res.set_text("all books"); }
/// fn create(_req: &Request, res: &mut Response) { res.set_text("created"); }
///
/// let books = Resource::new().get(list).post(create);
/// assert!(books.supports("GET"));
/// assert!(!books.supports("delete"));
/// ```
#[derive(Default)]
pub struct Resource {
    members: HashMap<String, BoxedHandler>,
}

macro_rules! resource_member {
    ($($name:ident => $method:expr;)+) => {
        $(
            #[doc = concat!("Serve `", stringify!($name), "` requests with `handler`.")]
            pub fn $name(self, handler: impl Handler) -> Self {
                self.on($method.as_lower(), handler)
            }
        )+
    };
}

impl Resource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member under an arbitrary method name (case-insensitive),
    /// which also covers extension methods such as `PROPFIND`. A second
    /// registration under the same name replaces the first.
    pub fn on(mut self, method: &str, handler: impl Handler) -> Self {
        self.members.insert(method.to_ascii_lowercase(), handler.into_boxed_handler());
        self
    }

    resource_member! {
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

    /// Whether a member exists for `method` (case-insensitive).
    pub fn supports(&self, method: &str) -> bool {
        self.member(method).is_some()
    }

    /// Lowercase names of the methods this resource serves, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.members.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    fn member(&self, method: &str) -> Option<&BoxedHandler> {
        self.members.get(&method.to_ascii_lowercase())
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource").field("methods", &self.methods()).finish()
    }
}

// ── Endpoint ──────────────────────────────────────────────────────────────────

/// A function handler together with the methods it accepts.
pub struct FunctionHandler {
    handler: BoxedHandler,
    allowed: BTreeSet<Method>,
}

impl FunctionHandler {
    /// Accepts every standard method.
    pub fn new(handler: impl Handler) -> Self {
        Self::with_methods(handler, Method::ALL)
    }

    pub fn with_methods(handler: impl Handler, methods: impl IntoIterator<Item = Method>) -> Self {
        Self {
            handler: handler.into_boxed_handler(),
            allowed: methods.into_iter().collect(),
        }
    }

    pub fn allowed_methods(&self) -> &BTreeSet<Method> {
        &self.allowed
    }

    /// Parses `method` case-insensitively; unknown methods are never allowed.
    pub fn allows(&self, method: &str) -> bool {
        method.parse::<Method>().is_ok_and(|m| self.allowed.contains(&m))
    }
}

impl fmt::Debug for FunctionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionHandler").field("allowed", &self.allowed).finish_non_exhaustive()
    }
}

/// What a route points at.
#[derive(Debug)]
pub enum Endpoint {
    Function(FunctionHandler),
    Resource(Resource),
}

impl Endpoint {
    /// A function endpoint accepting every standard method.
    pub fn function(handler: impl Handler) -> Self {
        Self::Function(FunctionHandler::new(handler))
    }

    /// Picks the handler that serves `method`.
    ///
    /// Resources look up the member named by the lowercase method; function
    /// handlers check their allowed set and otherwise ignore the method.
    /// Either way a miss is [`Error::MethodNotAllowed`].
    pub(crate) fn resolve(&self, method: &str) -> Result<&BoxedHandler, Error> {
        match self {
            Self::Resource(resource) => resource
                .member(method)
                .ok_or_else(|| Error::method_not_allowed(method)),
            Self::Function(function) if function.allows(method) => Ok(&function.handler),
            Self::Function(_) => Err(Error::method_not_allowed(method)),
        }
    }
}

impl From<Resource> for Endpoint {
    fn from(resource: Resource) -> Self { Self::Resource(resource) }
}

impl From<FunctionHandler> for Endpoint {
    fn from(function: FunctionHandler) -> Self { Self::Function(function) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello(_req: &Request, res: &mut Response) {
        res.set_text("hello");
    }

    fn failing(_req: &Request, _res: &mut Response) -> Result<(), std::fmt::Error> {
        Err(std::fmt::Error)
    }

    fn run(endpoint: &Endpoint, method: &str) -> Result<Response, Error> {
        let req = Request::new(method, "/");
        let mut res = Response::new();
        endpoint.resolve(method)?.call(&req, &mut res).map_err(Error::Handler)?;
        Ok(res)
    }

    #[test]
    fn function_endpoint_serves_every_standard_method_by_default() {
        let endpoint = Endpoint::function(hello);
        for method in Method::ALL {
            let res = run(&endpoint, method.as_str()).expect("allowed");
            assert_eq!(res.text(), "hello");
        }
    }

    #[test]
    fn function_endpoint_rejects_methods_outside_its_set() {
        let endpoint = Endpoint::from(FunctionHandler::with_methods(hello, [Method::Post]));
        assert!(run(&endpoint, "post").is_ok());
        let err = run(&endpoint, "GET").expect_err("GET is not allowed");
        assert_eq!(err.method(), Some("GET"));
        assert!(run(&endpoint, "BREW").is_err());
    }

    #[test]
    fn resource_dispatches_by_lowercase_method_name() {
        fn create(_req: &Request, res: &mut Response) { res.set_text("created"); }

        let endpoint = Endpoint::from(Resource::new().get(hello).post(create));
        assert_eq!(run(&endpoint, "GET").expect("get member").text(), "hello");
        assert_eq!(run(&endpoint, "Post").expect("post member").text(), "created");
        assert!(matches!(run(&endpoint, "DELETE"), Err(Error::MethodNotAllowed { .. })));
    }

    #[test]
    fn resource_accepts_extension_methods() {
        let resource = Resource::new().on("PROPFIND", hello);
        assert_eq!(resource.methods(), ["propfind"]);
        assert_eq!(run(&Endpoint::from(resource), "propfind").expect("member").text(), "hello");
    }

    #[test]
    fn handler_errors_are_boxed() {
        let endpoint = Endpoint::function(failing);
        assert!(matches!(run(&endpoint, "GET"), Err(Error::Handler(_))));
    }

    #[test]
    fn closures_with_annotated_arguments_are_handlers() {
        let greeting = String::from("hi");
        let endpoint = Endpoint::function(move |_req: &Request, res: &mut Response| {
            res.set_text(greeting.clone());
        });
        assert_eq!(run(&endpoint, "GET").expect("allowed").text(), "hi");
    }
}

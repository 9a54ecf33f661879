//! Unified error type.

/// Boxed application error, as returned by failing handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by afterburner's fallible operations.
///
/// Two kinds of failure live here. Registration errors
/// ([`DuplicateRoute`](Error::DuplicateRoute),
/// [`RelativeRoute`](Error::RelativeRoute),
/// [`InvalidRoute`](Error::InvalidRoute)) surface while the [`App`](crate::App)
/// is being built. Dispatch errors ([`MethodNotAllowed`](Error::MethodNotAllowed),
/// [`Handler`](Error::Handler)) surface per request and are handed to the
/// exception handler when one is set.
///
/// A missing route is *not* an error: it produces the default 404 response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate route `{0}`")]
    DuplicateRoute(String),

    #[error("route `{0}` must start with `/`")]
    RelativeRoute(String),

    #[error("invalid route `{pattern}`: {source}")]
    InvalidRoute {
        pattern: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    #[error(transparent)]
    InvalidUri(#[from] http::uri::InvalidUri),
}

impl Error {
    pub(crate) fn method_not_allowed(method: &str) -> Self {
        Self::MethodNotAllowed { method: method.to_owned() }
    }

    /// Returns the offending method for a [`MethodNotAllowed`](Error::MethodNotAllowed) error.
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::MethodNotAllowed { method } => Some(method),
            _ => None,
        }
    }

    /// Attempts to downcast a handler error to a concrete type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Handler(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

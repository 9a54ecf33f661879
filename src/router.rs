//! Ordered route table.
//!
//! Routes are tried in registration order and the first pattern that
//! matches wins. Each pattern is compiled on its own with [`matchit`], so the
//! placeholder grammar is matchit's:
//!
//! - `{name}` matches one non-empty path segment (anything but `/`);
//! - `{*name}` matches the rest of the path;
//! - everything else must match literally.
//!
//! A placeholder may share its segment with literal text (`/files/{name}.txt`,
//! `/user-{id}`), but not with another placeholder: `/{a}-{b}` is an
//! [`InvalidRoute`](Error::InvalidRoute). Patterns must start with `/`.
//!
//! Overlapping patterns are never rejected. Only an exact repeat of a
//! pattern string is a [`DuplicateRoute`](Error::DuplicateRoute): with
//! `/a/{x}` registered before `/a/b`, the request `/a/b` goes to `/a/{x}`.

use std::collections::HashMap;
use std::fmt;

use matchit::Router as MatchitRouter;
use tracing::trace;

use crate::error::Error;
use crate::handler::Endpoint;

/// A compiled path template.
struct Pattern {
    raw: String,
    matcher: MatchitRouter<()>,
}

impl Pattern {
    fn compile(raw: &str) -> Result<Self, Error> {
        let mut matcher = MatchitRouter::new();
        matcher.insert(raw, ()).map_err(|source| Error::InvalidRoute {
            pattern: raw.to_owned(),
            source,
        })?;
        Ok(Self { raw: raw.to_owned(), matcher })
    }

    fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let matched = self.matcher.at(path).ok()?;
        Some(matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A registered pattern and the endpoint it points at.
#[derive(Debug)]
pub struct Route {
    pattern: Pattern,
    endpoint: Endpoint,
}

impl Route {
    pub fn pattern(&self) -> &str { &self.pattern.raw }
    pub fn endpoint(&self) -> &Endpoint { &self.endpoint }
}

/// A successful lookup: the route plus the parameters its pattern captured.
#[derive(Debug)]
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    pub params: HashMap<String, String>,
}

/// The path → endpoint table.
///
/// Build it once during setup; lookups only need `&self`.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route. Fails if the exact `pattern` string is already
    /// registered, if it does not start with `/`, or if it is not valid
    /// template syntax.
    pub fn register(&mut self, pattern: &str, endpoint: impl Into<Endpoint>) -> Result<(), Error> {
        if !pattern.starts_with('/') {
            return Err(Error::RelativeRoute(pattern.to_owned()));
        }
        if self.routes.iter().any(|route| route.pattern() == pattern) {
            return Err(Error::DuplicateRoute(pattern.to_owned()));
        }

        let pattern = Pattern::compile(pattern)?;
        trace!(pattern = %pattern.raw, "route registered");
        self.routes.push(Route { pattern, endpoint: endpoint.into() });
        Ok(())
    }

    /// Returns the first route, in registration order, whose pattern matches `path`.
    pub fn find(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route.pattern.captures(path).map(|params| RouteMatch { route, params })
        })
    }

    /// Registered patterns, in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.routes.iter().map(Route::pattern)
    }

    pub fn len(&self) -> usize { self.routes.len() }
    pub fn is_empty(&self) -> bool { self.routes.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Resource, Response};

    fn noop(_req: &Request, _res: &mut Response) {}

    fn table(patterns: &[&str]) -> Router {
        let mut router = Router::new();
        for pattern in patterns {
            router.register(pattern, Endpoint::function(noop)).expect("valid pattern");
        }
        router
    }

    #[test]
    fn duplicate_pattern_is_rejected_for_any_endpoint_kind() {
        let mut router = table(&["/home"]);
        let err = router.register("/home", Resource::new().get(noop)).expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateRoute(p) if p == "/home"));
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        let mut router = Router::new();
        let err = router.register("/files/{*path}/raw", Endpoint::function(noop)).expect_err("catch-all not last");
        assert!(matches!(err, Error::InvalidRoute { .. }));
        assert!(router.is_empty());
    }

    #[test]
    fn pattern_without_leading_slash_is_rejected() {
        let mut router = Router::new();
        for pattern in ["home", "", "{name}"] {
            let err = router.register(pattern, Endpoint::function(noop)).expect_err("relative pattern");
            assert!(matches!(err, Error::RelativeRoute(p) if p == pattern));
        }
        assert!(router.is_empty());
    }

    #[test]
    fn one_placeholder_per_segment() {
        let mut router = Router::new();
        let err = router.register("/{a}-{b}", Endpoint::function(noop)).expect_err("two placeholders");
        assert!(matches!(err, Error::InvalidRoute { ref pattern, .. } if pattern == "/{a}-{b}"));

        let router = table(&["/files/{name}.txt"]);
        let matched = router.find("/files/report.txt").expect("match");
        assert_eq!(matched.params["name"], "report");
    }

    #[test]
    fn placeholder_captures_one_segment() {
        let router = table(&["/reverse/{name}"]);
        for value in ["abc", "user-1", "with.dot", "%20"] {
            let matched = router.find(&format!("/reverse/{value}")).expect("match");
            assert_eq!(matched.params.get("name").map(String::as_str), Some(value));
        }
        assert!(router.find("/reverse/a/b").is_none());
    }

    #[test]
    fn literal_segments_must_match_exactly() {
        let router = table(&["/books", "/api/{version}/items/{id}"]);
        assert!(router.find("/books").is_some());
        assert!(router.find("/Books").is_none());
        assert!(router.find("/books/").is_none());

        let matched = router.find("/api/v2/items/9").expect("match");
        assert_eq!(matched.route.pattern(), "/api/{version}/items/{id}");
        assert_eq!(matched.params["version"], "v2");
        assert_eq!(matched.params["id"], "9");
    }

    #[test]
    fn catch_all_takes_the_rest_of_the_path() {
        let router = table(&["/files/{*path}"]);
        let matched = router.find("/files/css/main.css").expect("match");
        assert_eq!(matched.params["path"], "css/main.css");
    }

    #[test]
    fn first_registered_pattern_wins_on_overlap() {
        let router = table(&["/a/{x}", "/a/b"]);
        let matched = router.find("/a/b").expect("match");
        assert_eq!(matched.route.pattern(), "/a/{x}");
        assert_eq!(matched.params["x"], "b");

        let router = table(&["/a/b", "/a/{x}"]);
        let matched = router.find("/a/b").expect("match");
        assert_eq!(matched.route.pattern(), "/a/b");
        assert!(matched.params.is_empty());
    }

    #[test]
    fn unknown_path_finds_nothing() {
        let router = table(&["/home", "/{name}"]);
        assert!(router.find("/home/x").is_none());
        assert!(router.find("/deep/path").is_none());
        assert_eq!(router.patterns().collect::<Vec<_>>(), ["/home", "/{name}"]);
    }
}

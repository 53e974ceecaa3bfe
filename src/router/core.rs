use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path/query parameters before heap allocation.
/// The roster routes carry at most one path parameter, so parameters stay
/// stack-allocated on the hot path.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because they come from the static route table;
/// values remain `String` as they are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A single entry in the route table: method, path shape, handler name.
#[derive(Debug, Clone)]
pub struct RouteMeta {
    pub method: Method,
    /// Path pattern with `{name}` parameter segments, e.g. `/api/marines/{id}`.
    pub path_pattern: String,
    /// Name the dispatcher uses to look up the handler coroutine.
    pub handler_name: String,
}

impl RouteMeta {
    pub fn new(method: Method, path_pattern: &str, handler_name: &str) -> Self {
        Self {
            method,
            path_pattern: path_pattern.to_string(),
            handler_name: handler_name.to_string(),
        }
    }
}

/// Result of successfully matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route entry (Arc to avoid cloning the table row).
    pub route: Arc<RouteMeta>,
    /// Path parameters extracted from the URL (e.g. `{id}` → `("id", "123")`).
    pub path_params: ParamVec,
    /// Name of the handler that should process this request.
    pub handler_name: String,
    /// Query string parameters (populated by the server).
    pub query_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name. Last write wins for duplicate names.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name. Last write wins for duplicate names.
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Router that matches HTTP requests against an ordered route table.
///
/// Patterns are compiled once at construction; matching tests each compiled
/// pattern in declaration order and returns on the first hit. With a handful
/// of routes the linear scan is the whole story.
#[derive(Clone)]
pub struct Router {
    routes: Vec<(Method, Regex, Arc<RouteMeta>, Vec<Arc<str>>)>,
}

impl Router {
    /// Compile a route table into a router.
    ///
    /// Declaration order is priority order: the first pattern that matches
    /// both method and path wins.
    #[must_use]
    pub fn new(routes: Vec<RouteMeta>) -> Self {
        let routes: Vec<_> = routes
            .into_iter()
            .map(|route| {
                let (regex, param_names) = Self::path_to_regex(&route.path_pattern);
                let method = route.method.clone();
                (method, regex, Arc::new(route), param_names)
            })
            .collect();

        let routes_summary: Vec<String> = routes
            .iter()
            .map(|(method, _, meta, _)| format!("{} {}", method, meta.path_pattern))
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Self { routes }
    }

    /// Match an HTTP request to a route.
    ///
    /// Returns `None` when no pattern matches, which the server turns into a
    /// 404 response.
    #[must_use]
    pub fn route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");

        for (route_method, regex, meta, param_names) in &self.routes {
            if *route_method != method {
                continue;
            }
            let Some(caps) = regex.captures(path) else {
                continue;
            };
            let mut path_params = ParamVec::new();
            for (i, name) in param_names.iter().enumerate() {
                if let Some(value) = caps.get(i + 1) {
                    path_params.push((name.clone(), value.as_str().to_string()));
                }
            }
            info!(
                method = %method,
                path = %path,
                handler_name = %meta.handler_name,
                route_pattern = %meta.path_pattern,
                path_params = ?path_params,
                "Route matched"
            );
            return Some(RouteMatch {
                route: meta.clone(),
                path_params,
                handler_name: meta.handler_name.clone(),
                query_params: ParamVec::new(),
            });
        }

        warn!(method = %method, path = %path, "No route matched");
        None
    }

    /// Convert a path pattern to a regex and extract parameter names.
    ///
    /// Parameter segments capture one or more digits: the roster's only path
    /// parameters are numeric ids, and a trailing non-digit must not match
    /// (`/api/marines/12abc` is a 404, not a lookup of 12).
    pub(crate) fn path_to_regex(path: &str) -> (Regex, Vec<Arc<str>>) {
        if path == "/" {
            return (
                Regex::new(r"^/$").expect("failed to compile path regex"),
                Vec::new(),
            );
        }

        let mut pattern = String::with_capacity(path.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') {
                let name = segment.trim_start_matches('{').trim_end_matches('}');
                pattern.push_str("/([0-9]+)");
                param_names.push(Arc::from(name));
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        pattern.push('$');
        let regex = Regex::new(&pattern).expect("failed to compile path regex");
        (regex, param_names)
    }
}

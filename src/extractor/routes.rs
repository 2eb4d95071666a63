use crate::bounded::BoundedVec;
use crate::error::{Error, Result};
use crate::model::RouteRecord;
use crate::text::{strip_quotes, trim_whitespace};
use log::debug;
use std::fs;
use std::path::Path;

/// Fixed root every route path starts from.
pub const API_ROOT: &str = "/api";
pub const MAX_NAMESPACE_DEPTH: usize = 10;
/// Longest path a route may carry, in bytes.
pub const MAX_PATH_LEN: usize = 125;
/// Namespace segments are no longer appended once the path reaches this length.
const NAMESPACE_PREFIX_LIMIT: usize = 100;

/// Open namespaces, outermost first.
///
/// Every bare `end` in a routes file closes the innermost namespace, whether
/// or not that `end` actually belonged to a namespace block. A `resources ...
/// do` block therefore pops its enclosing namespace early; this is a known
/// source of misattributed paths.
#[derive(Debug, Clone, Default)]
pub struct NamespaceStack {
    names: Vec<String>,
}

impl NamespaceStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a namespace. Returns `false` when the stack is already at
    /// [`MAX_NAMESPACE_DEPTH`]; the deeper level is then not recorded.
    pub fn push(&mut self, name: &str) -> bool {
        if self.names.len() >= MAX_NAMESPACE_DEPTH {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Builds `/api/<namespaces...>/<resource>` under [`MAX_PATH_LEN`].
    ///
    /// A segment that would push the path past the ceiling is left out
    /// whole rather than cut.
    pub fn path_for(&self, resource_name: &str) -> String {
        let mut path = String::from(API_ROOT);
        for namespace in self.iter() {
            if path.len() >= NAMESPACE_PREFIX_LIMIT {
                break;
            }
            append_segment(&mut path, namespace);
        }
        append_segment(&mut path, resource_name);
        path
    }
}

fn append_segment(path: &mut String, segment: &str) {
    if path.len() + 1 + segment.len() <= MAX_PATH_LEN {
        path.push('/');
        path.push_str(segment);
    }
}

/// Name declared by `namespace :name do` (also `{` blocks and bare spaces).
///
/// A declaration with none of those terminators is not recorded.
fn namespace_name(line: &str) -> Option<&str> {
    let after = &line[line.find(':')? + 1..];
    let end = after
        .find(" do")
        .or_else(|| after.find('{'))
        .or_else(|| after.find(' '))?;
    let name = strip_quotes(trim_whitespace(&after[..end]));
    (!name.is_empty()).then_some(name)
}

/// Name declared by `resources :name`, stopping at a comma, ` do`, or a space.
fn resource_name(line: &str) -> Option<&str> {
    let after = &line[line.find(':')? + 1..];
    let end = after
        .find(',')
        .or_else(|| after.find(" do"))
        .or_else(|| after.find(' '))
        .unwrap_or(after.len());
    let raw = &after[..end];
    let raw = match raw.find(|c: char| c.is_ascii_whitespace()) {
        Some(space) => &raw[..space],
        None => raw,
    };
    let name = strip_quotes(raw);
    (!name.is_empty()).then_some(name)
}

fn closes_block(line: &str) -> bool {
    line == "end" || line.starts_with("end ")
}

/// Parser for a `config/routes.rb` style routing file.
///
/// # Example
///
/// ```
/// use openapi_from_resources::bounded::BoundedVec;
/// use openapi_from_resources::extractor::routes::RoutesParser;
///
/// let mut routes = BoundedVec::new(100);
/// RoutesParser::parse_str("namespace :v1 do\n  resources :widgets\nend\n", &mut routes);
/// assert_eq!(routes[0].path, "/api/v1/widgets");
/// ```
pub struct RoutesParser;

impl RoutesParser {
    /// Reads a routing file and appends its resource routes to `routes`.
    ///
    /// Bytes that are not valid UTF-8 are replaced before parsing. Routes past
    /// the capacity of `routes` are dropped.
    ///
    /// # Arguments
    ///
    /// * `path` - The routing file, usually `config/routes.rb`
    /// * `routes` - Destination list, in declaration order
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read; `routes` is left as
    /// it was.
    pub fn parse_file(path: &Path, routes: &mut BoundedVec<RouteRecord>) -> Result<()> {
        debug!("Parsing routes file: {}", path.display());
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::parse_str(&String::from_utf8_lossy(&bytes), routes);
        Ok(())
    }

    /// Scans routing text and appends one route per `resources` declaration.
    ///
    /// Returns the namespace stack as it stood after the last line.
    pub fn parse_str(content: &str, routes: &mut BoundedVec<RouteRecord>) -> NamespaceStack {
        let mut namespaces = NamespaceStack::new();

        for raw in content.lines() {
            let line = trim_whitespace(raw);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.contains("namespace") {
                if let Some(name) = namespace_name(line) {
                    if namespaces.push(name) {
                        debug!("Entering namespace {} (depth {})", name, namespaces.depth());
                    } else {
                        debug!("Namespace {} exceeds depth {}, not recorded", name, MAX_NAMESPACE_DEPTH);
                    }
                }
            }

            if closes_block(line) {
                if let Some(name) = namespaces.pop() {
                    debug!("Leaving namespace {}", name);
                }
            }

            if line.contains("resources") {
                if routes.is_full() {
                    debug!("Route limit reached, ignoring '{}'", line);
                    continue;
                }
                if let Some(name) = resource_name(line) {
                    let route = RouteRecord::new(namespaces.path_for(name), name.to_string());
                    debug!("Route {} {}", route.methods_label(), route.path);
                    routes.push(route);
                }
            }
        }

        namespaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HttpMethod, MAX_ROUTES};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn parse(content: &str) -> (Vec<RouteRecord>, NamespaceStack) {
        let mut routes = BoundedVec::new(MAX_ROUTES);
        let stack = RoutesParser::parse_str(content, &mut routes);
        (routes.into_vec(), stack)
    }

    fn paths(routes: &[RouteRecord]) -> Vec<&str> {
        routes.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_nested_namespaces() {
        let (routes, stack) = parse(
            r#"
            Rails.application.routes.draw do
              namespace :api do
                namespace :v1 do
                  resources :widgets
                  resources :gadgets, only: [:index]
                end
                resources :status
              end
            end
            "#,
        );
        // The `draw do` block is not a namespace, so the last `end` has nothing to pop
        assert_eq!(
            paths(&routes),
            vec!["/api/api/v1/widgets", "/api/api/v1/gadgets", "/api/api/status"]
        );
        assert_eq!(routes[1].resource_name, "gadgets");
        assert_eq!(routes[0].http_methods, vec![HttpMethod::Get, HttpMethod::Post]);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_depth_is_opens_minus_closes() {
        let (_, stack) = parse("namespace :a do\nnamespace :b do\nnamespace :c do\nend\n");
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_names_are_stripped() {
        // Without a colon the namespace is not recognised at all
        let (routes, _) = parse("namespace 'admin' do\nresources :\"users\"\nend\n");
        assert_eq!(paths(&routes), vec!["/api/users"]);

        let (routes, _) = parse("namespace :'admin' do\nresources :'users', only: :index\nend\n");
        assert_eq!(paths(&routes), vec!["/api/admin/users"]);
    }

    #[test]
    fn test_brace_and_space_terminators() {
        let (_, stack) = parse("namespace :v2 { resources :x }\n");
        assert_eq!(stack.iter().collect::<Vec<_>>(), vec!["v2"]);

        let (_, stack) = parse("namespace :v3 \n");
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_end_with_trailing_comment_closes() {
        let (routes, stack) = parse("namespace :v1 do\nend # v1\nresources :widgets\n");
        assert_eq!(paths(&routes), vec!["/api/widgets"]);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let (routes, _) = parse("# resources :hidden\n\n   \nresources :shown do\n");
        assert_eq!(paths(&routes), vec!["/api/shown"]);
    }

    #[test]
    fn test_resources_do_block_pops_namespace() {
        let (routes, _) = parse(
            "namespace :v1 do\nresources :users do\nresources :posts\nend\nresources :widgets\nend\n",
        );
        assert_eq!(
            paths(&routes),
            vec!["/api/v1/users", "/api/v1/posts", "/api/widgets"]
        );
    }

    #[test]
    fn test_namespace_depth_is_capped() {
        let mut content = String::new();
        for n in 0..12 {
            content.push_str(&format!("namespace :n{} do\n", n));
        }
        content.push_str("resources :deep\n");
        let (routes, stack) = parse(&content);

        assert_eq!(stack.depth(), MAX_NAMESPACE_DEPTH);
        assert_eq!(
            routes[0].path,
            "/api/n0/n1/n2/n3/n4/n5/n6/n7/n8/n9/deep"
        );
    }

    #[test]
    fn test_path_ceiling_omits_whole_segments() {
        let long = "x".repeat(60);
        let content = format!(
            "namespace :{long} do\nnamespace :{long} do\nresources :widgets\n",
            long = long
        );
        let (routes, _) = parse(&content);

        let expected = format!("/api/{}/widgets", long);
        assert_eq!(routes[0].path, expected);
        assert!(routes[0].path.len() <= MAX_PATH_LEN);
    }

    #[test]
    fn test_route_bound() {
        let content: String = (0..105).map(|n| format!("resources :r{}\n", n)).collect();
        let (routes, _) = parse(&content);
        assert_eq!(routes.len(), MAX_ROUTES);
        assert_eq!(routes[MAX_ROUTES - 1].resource_name, "r99");
    }

    #[test]
    fn test_parse_file_missing_keeps_routes() {
        let mut routes = BoundedVec::new(MAX_ROUTES);
        RoutesParser::parse_str("resources :kept\n", &mut routes);

        let result = RoutesParser::parse_file(Path::new("/nonexistent/routes.rb"), &mut routes);
        assert!(result.is_err());
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn test_parse_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routes.rb");
        std::fs::write(&path, "namespace :v1 do\n  resources :widgets\nend\n").unwrap();

        let mut routes = BoundedVec::new(MAX_ROUTES);
        RoutesParser::parse_file(&path, &mut routes).unwrap();
        assert_eq!(routes[0].path, "/api/v1/widgets");
    }
}

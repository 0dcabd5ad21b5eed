//! File-system page routing.
//!
//! The template tree under `templates/pages/` becomes the site's GET routes
//! at startup. Conventions:
//!
//! - `index.html` maps to its directory root (`/`, `/blog`)
//! - any other `name.html` maps to `/dir/name`
//! - files whose stem starts with `_` are partials and are never routed
//! - `404.html` and `500.html` are reserved for error rendering
//! - titles derive from the stem, kebab/snake case to Title Case, with
//!   `index` becoming "Home"
//!
//! Adding a page is adding a file; no route table to edit.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use crate::routes::AppState;

/// Extension the scanner collects; everything else is ignored.
const TEMPLATE_EXT: &str = "html";

/// Stems reserved for error pages.
const RESERVED_STEMS: &[&str] = &["404", "500"];

/// One routable page derived from a template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRoute {
    /// URL path the page is served under, e.g. `/blog/post`.
    pub url_path: String,
    /// Template id as the engine knows it, e.g. `pages/blog/post.html`.
    pub template: String,
    /// Title handed to the template context.
    pub title: String,
}

/// Walk `pages_dir` and derive the routing table, deepest URL paths first.
///
/// The ordering makes registration deterministic and keeps more specific
/// routes ahead of the directory roots above them.
pub fn scan_pages(pages_dir: &Path) -> anyhow::Result<Vec<PageRoute>> {
    let mut routes = Vec::new();
    walk(pages_dir, pages_dir, &mut routes)?;

    routes.sort_by_key(|route| Reverse(segment_depth(&route.url_path)));

    Ok(routes)
}

fn walk(dir: &Path, base: &Path, routes: &mut Vec<PageRoute>) -> anyhow::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            walk(&path, base, routes)?;
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXT) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.starts_with('_') || RESERVED_STEMS.contains(&stem) {
            continue;
        }

        let rel = path.strip_prefix(base)?;
        routes.push(PageRoute {
            url_path: route_path(rel, stem),
            template: format!("pages/{}", path_to_slash(rel)),
            title: page_title(stem),
        });
    }

    Ok(())
}

/// Derive the URL path for a template file given its path relative to the
/// pages root.
///
/// `index.html` -> `/`, `about.html` -> `/about`,
/// `blog/index.html` -> `/blog`, `blog/post.html` -> `/blog/post`.
fn route_path(rel: &Path, stem: &str) -> String {
    let dir = rel
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(path_to_slash);

    match (dir, stem) {
        (None, "index") => "/".to_string(),
        (None, name) => format!("/{name}"),
        (Some(dir), "index") => format!("/{dir}"),
        (Some(dir), name) => format!("/{dir}/{name}"),
    }
}

/// Join path components with `/` regardless of the OS separator.
fn path_to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// `index` -> "Home"; otherwise kebab/snake case to Title Case.
fn page_title(stem: &str) -> String {
    if stem == "index" {
        return "Home".to_string();
    }

    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Counts like a split on `/`: "/" and "/about" are 2, "/blog/post" is 3.
fn segment_depth(url_path: &str) -> usize {
    url_path.split('/').count()
}

/// Drop later routes that repeat an already-seen URL path, keeping scan
/// order. `blog.html` next to `blog/index.html` both claim `/blog`; the
/// router panics on a duplicate registration, so first wins here instead.
fn dedupe(routes: Vec<PageRoute>) -> Vec<PageRoute> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(routes.len());
    for route in routes {
        if seen.insert(route.url_path.clone()) {
            kept.push(route);
        } else {
            tracing::warn!(path = %route.url_path, template = %route.template, "duplicate page route skipped");
        }
    }
    kept
}

/// Register one GET handler per page, in table order.
pub fn page_router(routes: Vec<PageRoute>) -> Router<AppState> {
    let mut router = Router::new();

    for route in dedupe(routes) {
        tracing::info!(path = %route.url_path, template = %route.template, "registered page");
        let page = route.clone();
        router = router.route(
            &route.url_path,
            get(move |State(state): State<AppState>| async move { render_page(&state, &page) }),
        );
    }

    router
}

fn render_page(state: &AppState, page: &PageRoute) -> Response {
    let mut ctx = tera::Context::new();
    ctx.insert("title", &page.title);
    ctx.insert("path", &page.url_path);

    match state.templates.render(&page.template, &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(template = %page.template, error = %e, "page render failed");
            render_error_page(state, StatusCode::INTERNAL_SERVER_ERROR, "Error")
        }
    }
}

/// Render the reserved error template for `status`, with a plain-text
/// fallback if that template is itself broken.
pub fn render_error_page(state: &AppState, status: StatusCode, title: &str) -> Response {
    let template = match status {
        StatusCode::NOT_FOUND => "pages/404.html",
        _ => "pages/500.html",
    };

    let mut ctx = tera::Context::new();
    ctx.insert("title", title);
    ctx.insert("statusCode", &status.as_u16());

    match state.templates.render(template, &ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(template, error = %e, "error page render failed");
            (status, title.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use temp_dir::TempDir;

    #[test]
    fn titles_from_stems() {
        assert_eq!(page_title("index"), "Home");
        assert_eq!(page_title("about"), "About");
        assert_eq!(page_title("contact-us"), "Contact Us");
        assert_eq!(page_title("my_account"), "My Account");
        assert_eq!(page_title("getting-started_guide"), "Getting Started Guide");
    }

    #[test]
    fn url_paths_from_template_paths() {
        assert_eq!(route_path(Path::new("index.html"), "index"), "/");
        assert_eq!(route_path(Path::new("about.html"), "about"), "/about");
        assert_eq!(route_path(Path::new("blog/index.html"), "index"), "/blog");
        assert_eq!(
            route_path(Path::new("blog/post.html"), "post"),
            "/blog/post"
        );
        assert_eq!(
            route_path(Path::new("docs/guides/intro.html"), "intro"),
            "/docs/guides/intro"
        );
    }

    #[test]
    fn scan_skips_partials_reserved_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("index.html"), "i").unwrap();
        fs::write(dir.path().join("about.html"), "a").unwrap();
        fs::write(dir.path().join("_partial.html"), "p").unwrap();
        fs::write(dir.path().join("404.html"), "n").unwrap();
        fs::write(dir.path().join("500.html"), "e").unwrap();
        fs::write(dir.path().join("notes.txt"), "t").unwrap();
        fs::write(dir.path().join("blog/index.html"), "b").unwrap();
        fs::write(dir.path().join("blog/post.html"), "p").unwrap();
        fs::write(dir.path().join("blog/_sidebar.html"), "s").unwrap();

        let routes = scan_pages(dir.path()).unwrap();
        let mut paths: Vec<&str> = routes.iter().map(|r| r.url_path.as_str()).collect();
        paths.sort();
        assert_eq!(paths, ["/", "/about", "/blog", "/blog/post"]);
    }

    #[test]
    fn scan_orders_deeper_routes_first() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("index.html"), "i").unwrap();
        fs::write(dir.path().join("blog/index.html"), "b").unwrap();
        fs::write(dir.path().join("blog/post.html"), "p").unwrap();

        let routes = scan_pages(dir.path()).unwrap();
        let paths: Vec<&str> = routes.iter().map(|r| r.url_path.as_str()).collect();

        let post = paths.iter().position(|p| *p == "/blog/post").unwrap();
        let blog = paths.iter().position(|p| *p == "/blog").unwrap();
        let root = paths.iter().position(|p| *p == "/").unwrap();
        assert!(post < blog, "deeper route must register first: {paths:?}");
        assert!(post < root, "deeper route must register first: {paths:?}");
    }

    #[test]
    fn scan_maps_templates_with_pages_prefix() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("blog/post.html"), "p").unwrap();

        let routes = scan_pages(dir.path()).unwrap();
        assert_eq!(routes[0].template, "pages/blog/post.html");
        assert_eq!(routes[0].title, "Post");
    }

    #[test]
    fn scan_of_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(scan_pages(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn duplicate_url_paths_keep_first() {
        let routes = vec![
            PageRoute {
                url_path: "/blog".to_string(),
                template: "pages/blog/index.html".to_string(),
                title: "Home".to_string(),
            },
            PageRoute {
                url_path: "/blog".to_string(),
                template: "pages/blog.html".to_string(),
                title: "Blog".to_string(),
            },
        ];

        let kept = dedupe(routes);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].template, "pages/blog/index.html");
    }
}

//! Integration tests for Shreck.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shreck-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `static_site` - Router tests against a temporary public root
//! - `cart_persistence` - Storefront controller across simulated page reloads
//!
//! Requests go through the full router with `tower::ServiceExt::oneshot`; no
//! socket is bound.

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use shreck_storefront::config::StorefrontConfig;
use shreck_storefront::routes;
use shreck_storefront::state::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

/// Entry document written by [`TestSite::new`].
pub const INDEX_HTML: &str = "<!doctype html><title>Shreck</title><main id=\"app\"></main>";

/// Catalog written by [`TestSite::new`].
pub const CATALOG_JSON: &str = r#"[
    {"id": "p1", "name": "Camiseta", "category": "ropa", "price": 19.99, "popularity": 80},
    {"id": "p2", "name": "Sudadera oversize", "category": "ropa", "price": 49.5, "popularity": 95},
    {"id": "p3", "name": "Gorra", "category": "accesorios", "price": 15, "popularity": 60},
    {"id": "p4", "name": "Sudadera zip", "category": "ropa", "price": 39.9, "popularity": 70},
    {"id": "p5", "name": "Mochila", "category": "accesorios", "price": 34.95, "popularity": 88}
]"#;

/// A temporary site: `<tmp>/public` is the public root, and `<tmp>` itself is
/// outside it.
pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    /// A site with an entry document, a stylesheet, a script, and a catalog.
    ///
    /// # Panics
    ///
    /// Panics if the temporary files cannot be written.
    #[must_use]
    pub fn new() -> Self {
        let site = Self::empty();
        site.write("index.html", INDEX_HTML);
        site.write("catalog.json", CATALOG_JSON);
        site.write("css/app.css", "body { margin: 0 }");
        site.write("js/app.js", "console.log('shreck');");
        site
    }

    /// A site whose public root exists but is empty.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("public")).expect("create public root");
        Self { dir }
    }

    /// The public root.
    #[must_use]
    pub fn public(&self) -> std::path::PathBuf {
        self.dir.path().join("public")
    }

    /// The directory containing the public root.
    #[must_use]
    pub fn outside(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under the public root, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.public().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(path, contents).expect("write site file");
    }

    /// Build the full application router, as the binary does minus Sentry.
    ///
    /// # Panics
    ///
    /// Panics if the catalog is malformed.
    #[must_use]
    pub fn app(&self) -> Router {
        let config = StorefrontConfig::for_public_dir(self.public());
        let state = AppState::new(config).expect("build app state");
        routes::app(state)
    }

    /// Send a GET request and collect the response body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        send(self.app(), request).await
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// A header value as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// Run `request` through `app` and collect the response.
///
/// # Panics
///
/// Panics if the router fails or the body is not UTF-8.
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response: Response<Body> = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("UTF-8 body"),
    }
}

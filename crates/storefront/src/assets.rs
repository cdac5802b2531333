//! Static asset resolution under the public root.
//!
//! Request paths are resolved lexically first: `.` segments are dropped and
//! `..` segments pop a directory but never climb above the root. The
//! resolved file is then canonicalized so a symlink pointing outside the root
//! is still refused. Paths that match no file fall back to the root
//! `index.html` so client-side routes load the single-page entry document.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use crate::error::AppError;

/// The entry document served for `/` and for unmatched routes.
pub const INDEX_DOCUMENT: &str = "index.html";

const HTML_CACHE_CONTROL: &str = "no-cache";
const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type for a file, by extension (case-insensitive).
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// `Cache-Control` for a file: HTML is always revalidated, everything else
/// is cached as immutable.
#[must_use]
pub fn cache_control_for(path: &Path) -> &'static str {
    if extension(path).as_deref() == Some("html") {
        HTML_CACHE_CONTROL
    } else {
        ASSET_CACHE_CONTROL
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Outcome of mapping a decoded URL path onto the public root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A path under the root (which may or may not exist).
    Inside(PathBuf),
    /// The path cannot be expressed under the root.
    Outside,
}

/// Map a percent-decoded URL path onto `root` without touching the disk.
#[must_use]
pub fn resolve(root: &Path, url_path: &str) -> Resolution {
    let url_path = if url_path == "/" {
        INDEX_DOCUMENT
    } else {
        url_path
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in url_path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => {
                if segment.contains('\0') || !is_plain_segment(segment) {
                    return Resolution::Outside;
                }
                segments.push(segment);
            }
        }
    }

    let resolved = segments
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment));
    if resolved.starts_with(root) {
        Resolution::Inside(resolved)
    } else {
        Resolution::Outside
    }
}

/// A segment that joins as a single normal path component (no drive
/// prefixes or roots).
fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// A file ready to be written to the response.
#[derive(Debug, Clone)]
pub struct Asset {
    pub path: PathBuf,
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

impl Asset {
    async fn read(path: PathBuf) -> Result<Self, AppError> {
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(Self {
                content_type: content_type_for(&path),
                cache_control: cache_control_for(&path),
                path,
                body,
            }),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Asset read failed");
                Err(AppError::NotFound)
            }
        }
    }
}

/// The directory served as the site root.
#[derive(Debug, Clone)]
pub struct PublicRoot {
    root: PathBuf,
    /// `None` while the root did not exist at startup.
    canonical: Option<PathBuf>,
}

impl PublicRoot {
    /// Serve files from `root`.
    ///
    /// The root is canonicalized once here. A missing root is tolerated: it
    /// serves nothing until it appears, and is canonicalized per request
    /// from then on.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let canonical = std::fs::canonicalize(&root)
            .inspect_err(|e| {
                tracing::warn!(root = %root.display(), error = %e, "Public root not found");
            })
            .ok();
        Self { root, canonical }
    }

    async fn canonical_root(&self) -> Result<Cow<'_, Path>, AppError> {
        match &self.canonical {
            Some(canonical) => Ok(Cow::Borrowed(canonical.as_path())),
            None => tokio::fs::canonicalize(&self.root)
                .await
                .map(Cow::Owned)
                .map_err(|_| AppError::NotFound),
        }
    }

    /// The configured root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Load the asset for a percent-decoded request path.
    ///
    /// # Errors
    ///
    /// - `AppError::Forbidden` if the path resolves outside the root.
    /// - `AppError::NotFound` if neither the file nor the fallback document
    ///   can be read.
    pub async fn open(&self, url_path: &str) -> Result<Asset, AppError> {
        let Resolution::Inside(path) = resolve(&self.root, url_path) else {
            tracing::warn!(url_path, "Rejected path outside public root");
            return Err(AppError::Forbidden);
        };

        let is_file = tokio::fs::metadata(&path)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        if !is_file {
            return self.fallback().await;
        }

        let canonical = tokio::fs::canonicalize(&path)
            .await
            .map_err(|_| AppError::NotFound)?;
        if !canonical.starts_with(self.canonical_root().await?.as_ref()) {
            tracing::warn!(url_path, target = %canonical.display(), "Rejected link outside public root");
            return Err(AppError::Forbidden);
        }

        Asset::read(path).await
    }

    /// The entry document, served for any route without a matching file.
    async fn fallback(&self) -> Result<Asset, AppError> {
        Asset::read(self.root.join(INDEX_DOCUMENT)).await
    }
}

//! Document root and the path security gate.
//!
//! Request targets are mapped onto the filesystem here. A target is served
//! only if it resolves, symlinks included, to a regular file strictly below
//! the root whose extension has a known content type.

use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;

use crate::error::HttpError;
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::Response;

const INDEX_FILE: &str = "index.html";

/// Canonical, absolute directory that every served file must live under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRoot {
    path: PathBuf,
}

impl DocumentRoot {
    /// Canonicalizes `path` and checks that it is a directory.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = std::fs::canonicalize(path)?;
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", path.display()),
            ));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maps a request target to an absolute path.
    ///
    /// The target is joined onto the root and resolved component by
    /// component, so `..` applies to the real parent of a symlink target.
    /// Directories resolve to their `index.html`. The result is not yet
    /// checked for containment.
    pub async fn resolve(&self, request: &Request) -> PathBuf {
        let mut path = resolve_path(&self.path.join(request.clean_target())).await;

        if is_dir(&path).await {
            path.push(INDEX_FILE);
        }

        path
    }

    /// Whether `path` lies strictly below the root.
    pub fn contains(&self, path: &Path) -> bool {
        path != self.path && path.starts_with(&self.path)
    }

    /// Resolves `request` and loads the file it names.
    ///
    /// Checks run in order: containment (403), existence (404), content type
    /// (415). HEAD requests get the file size but no body.
    pub async fn serve(&self, request: &Request) -> Result<Response, HttpError> {
        let path = self.resolve(request).await;

        if !self.contains(&path) {
            return Err(HttpError::Forbidden);
        }

        let metadata = match fs::metadata(&path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(HttpError::NotFound),
            Err(e) if is_missing(&e) => return Err(HttpError::NotFound),
            Err(e) => return Err(e.into()),
        };

        let suffix = mime::suffix(&path);
        let content_type =
            mime::content_type_for(&suffix).ok_or(HttpError::UnsupportedMediaType(suffix))?;

        if !request.wants_body() {
            return Ok(Response::head(metadata.len(), content_type));
        }

        let body = fs::read(&path).await?;
        Ok(Response::ok(body, content_type))
    }
}

/// Resolves symlinks while walking `path` one component at a time.
///
/// Every existing prefix is canonicalized before the next component is
/// applied. Once a component is missing the rest is joined lexically, with
/// `..` never climbing above `/`.
async fn resolve_path(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    let mut on_disk = true;

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => {
                resolved.push(part);
                if on_disk {
                    match fs::canonicalize(&resolved).await {
                        Ok(real) => resolved = real,
                        Err(_) => on_disk = false,
                    }
                }
            }
            other => resolved.push(other.as_os_str()),
        }
    }

    resolved
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

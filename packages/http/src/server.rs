//! The static file handler.

use std::io::Read;

use bytes::Bytes;
use http::{header, Method, Request, Response, StatusCode};

use shimfs_vfs::{ErrorKind, File, Fs, FsError, Metadata};

use crate::fmt;
use crate::Error;

/// Serves files from a shimfs source with conditional-request support.
///
/// The request path maps onto the source directly: `/assets/app.css`
/// opens `assets/app.css`. Only `GET` and `HEAD` are accepted.
pub struct FileServer<F> {
    fs: F,
}

impl<F: Fs> FileServer<F> {
    /// Create a handler over `fs`.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Get a reference to the underlying source.
    pub fn inner(&self) -> &F {
        &self.fs
    }

    /// Produce the response for one request.
    ///
    /// Filesystem failures become status codes (`404`, `403`, `500`);
    /// `Err` is reserved for response assembly itself failing.
    pub fn respond<B>(&self, req: &Request<B>) -> Result<Response<Bytes>, Error> {
        let method = req.method();
        if method != Method::GET && method != Method::HEAD {
            log::debug!("{} {}: method not allowed", method, req.uri().path());
            return Ok(Response::builder()
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .header(header::ALLOW, "GET, HEAD")
                .body(Bytes::new())?);
        }

        let fs_path = req.uri().path().trim_start_matches('/');

        let mut file = match self.fs.open(fs_path) {
            Ok(file) => file,
            Err(err) => return error_response(fs_path, &err),
        };
        let meta = match file.metadata() {
            Ok(meta) => meta,
            Err(err) => return error_response(fs_path, &err),
        };

        if meta.is_dir() {
            log::debug!("{}: directory, refusing to list", fs_path);
            return Ok(Response::builder()
                .status(StatusCode::FORBIDDEN)
                .body(Bytes::from_static(b"Forbidden"))?);
        }

        let last_modified = fmt::format_http_date(meta.modified());

        let if_modified_since = req
            .headers()
            .get(header::IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .and_then(fmt::parse_http_date);
        if let Some(since) = if_modified_since {
            if fmt::truncate_to_seconds(meta.modified()) <= since {
                log::debug!("{}: not modified since {}", fs_path, last_modified);
                return Ok(Response::builder()
                    .status(StatusCode::NOT_MODIFIED)
                    .header(header::LAST_MODIFIED, last_modified)
                    .body(Bytes::new())?);
            }
        }

        let body = if method == Method::HEAD {
            Bytes::new()
        } else {
            let mut buf = Vec::with_capacity(meta.len() as usize);
            if let Err(err) = file.read_to_end(&mut buf) {
                return error_response(fs_path, &FsError::Io(err));
            }
            Bytes::from(buf)
        };

        log::debug!("{} {}: 200, {} bytes", method, fs_path, meta.len());
        Ok(Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type(fs_path))
            .header(header::CONTENT_LENGTH, meta.len())
            .header(header::LAST_MODIFIED, last_modified)
            .body(body)?)
    }
}

fn error_response(fs_path: &str, err: &FsError) -> Result<Response<Bytes>, Error> {
    let status = match err.kind() {
        ErrorKind::NotFound | ErrorKind::InvalidPath | ErrorKind::NotADirectory => {
            StatusCode::NOT_FOUND
        }
        ErrorKind::PermissionDenied | ErrorKind::IsADirectory => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    log::debug!("{}: {} ({})", fs_path, status, err);
    let reason = status.canonical_reason().unwrap_or("error");
    Ok(Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Bytes::from(reason))?)
}

fn content_type(fs_path: &str) -> &'static str {
    let ext = match fs_path.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => return "application/octet-stream",
    };
    match ext {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" | "md" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}

//! Static file serving module
//!
//! Maps request paths onto the served root and answers with a file, an
//! index file, a directory listing, a redirect or a 404.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use tokio::fs;

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;

/// Filesystem location of a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    pub fs_path: PathBuf,
    /// The request path ended with `/`
    pub trailing_slash: bool,
}

/// Translate a request path into a path under `root`
///
/// The path is percent-decoded and normalized lexically: empty and `.`
/// segments are dropped and `..` removes the previous segment without ever
/// leaving the root. Returns `None` for paths that cannot name a file
/// (invalid UTF-8 after decoding, embedded NUL).
pub fn translate_path(root: &Path, request_path: &str) -> Option<TranslatedPath> {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or(request_path);
    let trailing_slash = path.trim_end().ends_with('/');
    let decoded = urlencoding::decode(path).ok()?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\0') => return None,
            s if cfg!(windows) && s.contains(['\\', ':']) => {}
            s => segments.push(s),
        }
    }

    let mut fs_path = root.to_path_buf();
    fs_path.extend(segments);
    Some(TranslatedPath {
        fs_path,
        trailing_slash,
    })
}

/// Serve a GET/HEAD request from the served root
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(target) = translate_path(&state.root, ctx.path) else {
        return not_found(ctx);
    };

    let mut file_path = target.fs_path;
    if is_dir(&file_path).await {
        if !ctx.path.ends_with('/') {
            return http::build_redirect_response(&redirect_location(ctx.path, ctx.query));
        }
        match find_index(&file_path, &state.config.http.index_files).await {
            Some(index) => file_path = index,
            None => return serve_listing(ctx, &file_path).await,
        }
    } else if target.trailing_slash {
        return not_found(ctx);
    }

    serve_file(ctx, &file_path).await
}

/// Serve a single regular file, honouring `If-Modified-Since`
async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    // File not found is common (404), no need to log at warning level
    let metadata = match fs::metadata(file_path).await {
        Ok(meta) if meta.is_file() => meta,
        _ => return not_found(ctx),
    };
    let mtime = metadata.modified().ok();

    if let Some(mtime) = mtime {
        if cache::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.has_if_none_match,
            mtime,
        ) {
            return http::build_304_response();
        }
    }

    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return not_found(ctx);
        }
    };

    let last_modified = mtime.map(cache::last_modified);
    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(file_path),
        last_modified.as_deref(),
        ctx.is_head,
    )
}

async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    let entries = match listing::read_entries(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!(
                "Cannot list directory '{}': {e}",
                dir.display()
            ));
            return http::build_error_response(
                StatusCode::NOT_FOUND,
                "No permission to list directory",
                ctx.is_head,
            );
        }
    };

    let display_path = urlencoding::decode(ctx.path)
        .map_or_else(|_| ctx.path.to_string(), std::borrow::Cow::into_owned);
    http::build_listing_response(listing::render_listing(&display_path, &entries), ctx.is_head)
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
}

/// First configured index file that exists as a regular file in `dir`
async fn find_index(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for index_file in index_files {
        let candidate = dir.join(index_file);
        if fs::metadata(&candidate)
            .await
            .is_ok_and(|meta| meta.is_file())
        {
            return Some(candidate);
        }
    }
    None
}

/// `Location` for a directory requested without its trailing slash
///
/// Leading slashes are collapsed so the target stays on this host.
fn redirect_location(path: &str, query: Option<&str>) -> String {
    let mut location = format!("/{}/", path.trim_start_matches('/'));
    if let Some(query) = query {
        location.push('?');
        location.push_str(query);
    }
    location
}

fn not_found(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    http::build_error_response(StatusCode::NOT_FOUND, "File not found", ctx.is_head)
}

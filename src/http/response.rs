//! HTTP response building module
//!
//! Builders for every response the static file handler produces. Each one
//! sets its own Content-Type/Content-Length; [`stamp_base_headers`] then
//! puts `Server`, `Date` and `Connection` in front.

use chrono::Utc;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    HeaderValue, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, DATE, LAST_MODIFIED, LOCATION, SERVER,
};
use hyper::{Response, StatusCode};

use super::cache;

/// Build 200 response with file content
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length);
    if let Some(last_modified) = last_modified {
        builder = builder.header(LAST_MODIFIED, last_modified);
    }

    builder
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response for a generated directory listing
pub fn build_listing_response(html: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = html.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(html)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("listing", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 redirect response (directory requested without trailing slash)
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build an HTML error response and close the connection afterwards
///
/// HEAD requests get the headers (with the full `Content-Length`) only.
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let page = error_page(status, message);
    let content_length = page.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(page)
    };

    Response::builder()
        .status(status)
        .header(CONNECTION, "close")
        .header(CONTENT_TYPE, "text/html;charset=utf-8")
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = status;
            fallback
        })
}

/// Put `Server`, `Date` and, without keep-alive, `Connection: close` in
/// front of the handler's headers
pub fn stamp_base_headers<B>(response: &mut Response<B>, server_name: &str, keep_alive: bool) {
    let handler_headers = std::mem::take(response.headers_mut());
    let headers = response.headers_mut();

    match HeaderValue::from_str(server_name) {
        Ok(server) => {
            headers.insert(SERVER, server);
        }
        Err(_) => crate::logger::log_warning(&format!("Invalid server name: {server_name:?}")),
    }
    if let Ok(date) = HeaderValue::from_str(&cache::http_date(Utc::now())) {
        headers.insert(DATE, date);
    }
    if !keep_alive && !handler_headers.contains_key(CONNECTION) {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
    }

    for (name, value) in &handler_headers {
        headers.append(name.clone(), value.clone());
    }
}

fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{code} {reason}</title>
</head>
<body>
    <h1>{code} {reason}</h1>
    <p>{message}</p>
    <p>{explanation}</p>
</body>
</html>
"#,
        message = escape_html(message),
        explanation = explain(status),
    )
}

/// Escape text for HTML element content (quotes are left alone)
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn explain(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "No file or directory matches the requested path.",
        StatusCode::NOT_IMPLEMENTED => "Only GET and HEAD requests are served.",
        _ => "",
    }
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

//! Cross-origin isolation headers
//!
//! [`CrossOriginIsolation`] wraps the request service and appends the fixed
//! header set to every response it yields, after whatever the handler set.
//! The connection serves through this wrapper only, so no status code or
//! content type can skip it.

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::service::Service;
use hyper::{Request, Response};
use pin_project_lite::pin_project;

/// Headers appended to every response, in wire order
pub const ISOLATION_HEADERS: [(&str, &str); 3] = [
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-embedder-policy", "require-corp"),
    ("cache-control", "no-store"),
];

/// Append the isolation headers at the end of `headers`
///
/// Earlier values under the same names are dropped so each header appears
/// once, in its fixed position. Every other header keeps its relative order.
pub fn apply_isolation_headers(headers: &mut HeaderMap) {
    let names = ISOLATION_HEADERS.map(|(name, _)| HeaderName::from_static(name));

    // HeaderMap::remove reorders entries, so rebuild instead
    if names.iter().any(|name| headers.contains_key(name)) {
        let base = std::mem::take(headers);
        for (name, value) in &base {
            if !names.contains(name) {
                headers.append(name.clone(), value.clone());
            }
        }
    }

    for (name, (_, value)) in names.into_iter().zip(ISOLATION_HEADERS) {
        headers.append(name, HeaderValue::from_static(value));
    }
}

/// Service wrapper that isolates every response of the inner service
#[derive(Debug, Clone)]
pub struct CrossOriginIsolation<S> {
    inner: S,
}

impl<S> CrossOriginIsolation<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CrossOriginIsolation<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = IsolatedResponse<S::Future>;

    fn call(&self, req: Request<ReqBody>) -> Self::Future {
        IsolatedResponse {
            inner: self.inner.call(req),
        }
    }
}

pin_project! {
    /// Response future of [`CrossOriginIsolation`]
    pub struct IsolatedResponse<F> {
        #[pin]
        inner: F,
    }
}

impl<F, ResBody, E> Future for IsolatedResponse<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut response = ready!(self.project().inner.poll(cx))?;
        apply_isolation_headers(response.headers_mut());
        Poll::Ready(Ok(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::{Empty, Full};
    use hyper::body::Bytes;
    use hyper::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
    use hyper::service::service_fn;
    use hyper::StatusCode;
    use std::convert::Infallible;

    fn header_names(headers: &HeaderMap) -> Vec<&str> {
        headers.keys().map(HeaderName::as_str).collect()
    }

    #[test]
    fn test_appended_after_existing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("9"));

        apply_isolation_headers(&mut headers);

        assert_eq!(
            header_names(&headers),
            vec![
                "content-type",
                "content-length",
                "cross-origin-opener-policy",
                "cross-origin-embedder-policy",
                "cache-control",
            ]
        );
        assert_eq!(headers["cross-origin-opener-policy"], "same-origin");
        assert_eq!(headers["cross-origin-embedder-policy"], "require-corp");
        assert_eq!(headers[CACHE_CONTROL], "no-store");
    }

    #[test]
    fn test_existing_cache_control_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/css"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("12"));

        apply_isolation_headers(&mut headers);

        let values: Vec<_> = headers.get_all(CACHE_CONTROL).iter().collect();
        assert_eq!(values, vec!["no-store"]);
        assert_eq!(
            header_names(&headers),
            vec![
                "content-type",
                "content-length",
                "cross-origin-opener-policy",
                "cross-origin-embedder-policy",
                "cache-control",
            ]
        );
    }

    #[test]
    fn test_empty_header_map() {
        let mut headers = HeaderMap::new();
        apply_isolation_headers(&mut headers);
        assert_eq!(headers.len(), 3);
    }

    #[tokio::test]
    async fn test_wrapper_isolates_every_status() {
        for status in [
            StatusCode::OK,
            StatusCode::MOVED_PERMANENTLY,
            StatusCode::NOT_MODIFIED,
            StatusCode::NOT_FOUND,
            StatusCode::NOT_IMPLEMENTED,
        ] {
            let service = CrossOriginIsolation::new(service_fn(
                move |_req: Request<Empty<Bytes>>| async move {
                    let response = Response::builder()
                        .status(status)
                        .header(CONTENT_TYPE, "text/plain")
                        .body(Full::new(Bytes::from_static(b"body")))
                        .unwrap();
                    Ok::<_, Infallible>(response)
                },
            ));

            let response = service.call(Request::new(Empty::new())).await.unwrap();

            assert_eq!(response.status(), status);
            let names = header_names(response.headers());
            assert_eq!(
                names[names.len() - 3..],
                [
                    "cross-origin-opener-policy",
                    "cross-origin-embedder-policy",
                    "cache-control",
                ],
                "status {status}"
            );
        }
    }
}

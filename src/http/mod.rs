//! HTTP protocol layer module
//!
//! Response builders, content types, HTTP dates and the cross-origin
//! isolation middleware. Nothing here touches the filesystem.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use headers::{apply_isolation_headers, CrossOriginIsolation, ISOLATION_HEADERS};
pub use response::{
    build_304_response, build_error_response, build_file_response, build_listing_response,
    build_redirect_response, escape_html, stamp_base_headers,
};

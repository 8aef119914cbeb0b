//! coi-serve: a local static file server for cross-origin isolated pages.
//!
//! Serves a directory over HTTP/1.x the way a plain development file
//! server does (files, index files, listings, redirects, 404s) and appends
//!
//! ```text
//! Cross-Origin-Opener-Policy: same-origin
//! Cross-Origin-Embedder-Policy: require-corp
//! Cache-Control: no-store
//! ```
//!
//! to every response, so pages using `SharedArrayBuffer` (threaded
//! WebAssembly builds, for instance) work when opened from localhost.
//!
//! Requests that hyper's HTTP/1 parser rejects before they reach the
//! handler (malformed request lines or headers, oversized header blocks)
//! are answered by hyper itself with a bare `400`/`431` that carries none
//! of these headers.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::ServerError;

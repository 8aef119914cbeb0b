//! Request handler module
//!
//! Static file serving: path translation, files, index files, directory
//! listings and redirects. Isolation headers are added one layer up, by
//! [`crate::http::CrossOriginIsolation`].

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

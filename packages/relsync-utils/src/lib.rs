pub mod http;

// Re-export main utilities
pub use http::{delete, get, http_status_is_ok, post, send, HeaderMap, HttpError, ResponseData};

//! HTTP request handlers for the web server.

mod api;
mod static_files;
mod upload;

pub use api::{api_status, StatusResponse};
pub use static_files::{index, serve_css, serve_js};
pub use upload::{upload_file, UploadResponse};

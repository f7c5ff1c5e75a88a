//! Static asset constants (HTML, CSS and JavaScript).

/// Upload page.
pub const INDEX_HTML: &str = include_str!("index.html");

/// Stylesheet for the upload page.
pub const CSS: &str = include_str!("styles.css");

/// Drag-and-drop upload and scorecard rendering.
pub const JS: &str = include_str!("scripts.js");

//! Request handlers.
//!
//! Page handlers play the role of page loaders: they gather the content a
//! page needs from the [`ContentClient`](reel_cms::ContentClient) and return
//! it as one JSON payload for the renderer.

pub mod diagnostics;
pub mod pages;
pub mod schema;

//! Content access layer for the Reel CMS.
//!
//! Provides the CMS connection configuration, the HTTP query transport,
//! the GROQ queries the site runs, the [`ContentClient`] page-facing
//! operations, and image URL building for referenced assets.

pub mod api;
pub mod config;
pub mod content;
pub mod image;
pub mod queries;
pub mod transport;

pub use api::SanityApi;
pub use config::CmsConfig;
pub use content::ContentClient;
pub use image::{url_for, ImageUrlBuilder};
pub use transport::{CmsError, QueryParams, QueryTransport};

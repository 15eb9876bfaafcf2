//! Display URLs for CMS image assets.
//!
//! Image references look like `image-<assetId>-<width>x<height>-<ext>`.
//! [`url_for`] turns one into a builder for the image CDN URL, with the
//! CDN's transform parameters (size, format, crop mode, quality). Building
//! a URL performs no I/O.

use std::fmt;

use reel_core::project::{AssetRef, ImageRef};

use crate::config::CmsConfig;

const IMAGE_CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Errors resolving an image reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRefError {
    /// The image field has no asset reference.
    #[error("Image has no asset reference")]
    Missing,

    /// The reference does not follow the `image-<id>-<w>x<h>-<ext>` shape.
    #[error("Malformed image reference: {0}")]
    Malformed(String),
}

/// Anything that can point at an image asset.
pub trait ImageSource {
    fn asset_ref(&self) -> Option<&str>;
}

impl ImageSource for ImageRef {
    fn asset_ref(&self) -> Option<&str> {
        self.asset.as_ref().map(|a| a.reference.as_str())
    }
}

impl ImageSource for AssetRef {
    fn asset_ref(&self) -> Option<&str> {
        Some(&self.reference)
    }
}

impl ImageSource for str {
    fn asset_ref(&self) -> Option<&str> {
        Some(self)
    }
}

impl ImageSource for String {
    fn asset_ref(&self) -> Option<&str> {
        Some(self)
    }
}

/// Output encodings the image CDN can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpg,
    Png,
    Webp,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        })
    }
}

/// How the image is fitted into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    Clip,
    Crop,
    Fill,
    FillMax,
    Max,
    Scale,
    Min,
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Clip => "clip",
            Self::Crop => "crop",
            Self::Fill => "fill",
            Self::FillMax => "fillmax",
            Self::Max => "max",
            Self::Scale => "scale",
            Self::Min => "min",
        })
    }
}

/// A parsed `image-<id>-<w>x<h>-<ext>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAsset {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub extension: String,
}

impl ParsedAsset {
    pub fn parse(reference: &str) -> Result<Self, ImageRefError> {
        let malformed = || ImageRefError::Malformed(reference.to_string());

        let rest = reference.strip_prefix("image-").ok_or_else(malformed)?;
        let (rest, extension) = rest.rsplit_once('-').ok_or_else(malformed)?;
        let (id, dimensions) = rest.rsplit_once('-').ok_or_else(malformed)?;
        let (width, height) = dimensions.split_once('x').ok_or_else(malformed)?;

        let width: u32 = width.parse().map_err(|_| malformed())?;
        let height: u32 = height.parse().map_err(|_| malformed())?;

        if id.is_empty() || extension.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            id: id.to_string(),
            width,
            height,
            extension: extension.to_string(),
        })
    }
}

/// Builder for one image's CDN URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
    reference: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<ImageFormat>,
    auto_format: bool,
    quality: Option<u8>,
    fit: Option<FitMode>,
    dpr: Option<u8>,
}

/// Start building the display URL for `source` in the configured dataset.
pub fn url_for<S: ImageSource + ?Sized>(config: &CmsConfig, source: &S) -> ImageUrlBuilder {
    ImageUrlBuilder {
        project_id: config.project_id.clone(),
        dataset: config.dataset.clone(),
        reference: source.asset_ref().map(str::to_string),
        width: None,
        height: None,
        format: None,
        auto_format: false,
        quality: None,
        fit: None,
        dpr: None,
    }
}

impl ImageUrlBuilder {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Let the CDN pick the best format the browser accepts.
    pub fn auto_format(mut self) -> Self {
        self.auto_format = true;
        self
    }

    /// Compression quality, clamped to 0–100.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.min(100));
        self
    }

    pub fn fit(mut self, fit: FitMode) -> Self {
        self.fit = Some(fit);
        self
    }

    /// Device pixel ratio, clamped to 1–3.
    pub fn dpr(mut self, dpr: u8) -> Self {
        self.dpr = Some(dpr.clamp(1, 3));
        self
    }

    /// Resolve the reference into a URL.
    pub fn url(&self) -> Result<String, ImageRefError> {
        let reference = self.reference.as_deref().ok_or(ImageRefError::Missing)?;
        let asset = ParsedAsset::parse(reference)?;

        let mut url = format!(
            "{IMAGE_CDN_BASE}/{}/{}/{}-{}x{}.{}",
            self.project_id, self.dataset, asset.id, asset.width, asset.height, asset.extension
        );

        let mut params: Vec<String> = Vec::new();
        if let Some(w) = self.width {
            params.push(format!("w={w}"));
        }
        if let Some(h) = self.height {
            params.push(format!("h={h}"));
        }
        if let Some(fm) = self.format {
            params.push(format!("fm={fm}"));
        }
        if self.auto_format {
            params.push("auto=format".to_string());
        }
        if let Some(q) = self.quality {
            params.push(format!("q={q}"));
        }
        if let Some(fit) = self.fit {
            params.push(format!("fit={fit}"));
        }
        if let Some(dpr) = self.dpr {
            params.push(format!("dpr={dpr}"));
        }

        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const REF: &str = "image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg";

    fn image(reference: &str) -> ImageRef {
        ImageRef {
            asset: Some(AssetRef {
                reference: reference.to_string(),
                kind: "reference".to_string(),
            }),
            alt: Some("alt".to_string()),
            url: None,
        }
    }

    #[test]
    fn parses_reference() {
        let asset = ParsedAsset::parse(REF).unwrap();
        assert_eq!(asset.id, "Tb9Ew8CXIwaY6R1kjMvI0uRR");
        assert_eq!((asset.width, asset.height), (2000, 3000));
        assert_eq!(asset.extension, "jpg");
    }

    #[test]
    fn plain_url() {
        let url = url_for(&CmsConfig::default(), &image(REF)).url().unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/cr745m4x/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
        );
    }

    #[test]
    fn transform_parameters_in_order() {
        let url = url_for(&CmsConfig::default(), REF)
            .fit(FitMode::Crop)
            .height(400)
            .width(600)
            .quality(250)
            .auto_format()
            .format(ImageFormat::Webp)
            .dpr(5)
            .url()
            .unwrap();
        assert!(url.ends_with("?w=600&h=400&fm=webp&auto=format&q=100&fit=crop&dpr=3"));
    }

    #[test]
    fn accepts_asset_ref_and_string() {
        let config = CmsConfig::default();
        let asset = AssetRef {
            reference: REF.to_string(),
            kind: "reference".to_string(),
        };
        assert_eq!(
            url_for(&config, &asset).url(),
            url_for(&config, &REF.to_string()).url()
        );
    }

    #[test]
    fn missing_asset() {
        let result = url_for(&CmsConfig::default(), &ImageRef::default()).url();
        assert_eq!(result, Err(ImageRefError::Missing));
    }

    #[test]
    fn malformed_references() {
        for bad in ["file-abc-1x1-pdf", "image-abc-jpg", "image-abc-10xten-png", "image--1x1-png"] {
            assert_matches!(
                url_for(&CmsConfig::default(), bad).url(),
                Err(ImageRefError::Malformed(_)),
                "{bad}"
            );
        }
    }
}

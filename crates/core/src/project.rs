//! The `project` document as returned by the CMS read queries.
//!
//! Decoding is forgiving: the CMS enforces required fields at
//! edit time, so a record that reaches us half-populated (a missing title,
//! a `null` credits list, an unknown category) must still decode. Each field
//! that arrives in an unexpected shape falls back to its empty value instead
//! of failing the whole record.

use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::DocumentId;

/// CMS document type name for projects.
pub const PROJECT_TYPE: &str = "project";

/// Field that orders projects for display (drag-and-drop rank string).
pub const RANK_FIELD: &str = "orderRank";

/// Project category shown on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Commercial,
    Narrative,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::Narrative => "narrative",
        }
    }
}

/// URL-safe identifier, stored by the CMS as `{ "current": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

/// Pointer to a binary asset held by the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(rename = "_type", default = "default_asset_kind")]
    pub kind: String,
}

fn default_asset_kind() -> String {
    "reference".to_string()
}

/// An image field: the asset pointer, its alt text and, when the query
/// dereferenced the asset, its CDN URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub asset: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub url: Option<String>,
}

/// One entry of a project's credit roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    #[serde(default, deserialize_with = "lenient")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
}

/// A project record as projected by the list and by-slug queries.
///
/// Serializes back with the CMS field names so the page renderer receives
/// the same shape the CMS produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProject")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,
    #[serde(rename = "orderRank", skip_serializing_if = "Option::is_none")]
    pub order_rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub credits: Vec<Credit>,
    #[serde(rename = "topStills")]
    pub top_stills: Vec<ImageRef>,
    #[serde(rename = "bottomStills")]
    pub bottom_stills: Vec<ImageRef>,
    #[serde(rename = "vimeoUrl", skip_serializing_if = "Option::is_none")]
    pub vimeo_url: Option<String>,
    pub featured: bool,
}

impl Project {
    /// The current slug value, if the record carries one.
    pub fn slug_str(&self) -> Option<&str> {
        self.slug.as_ref().map(|s| s.current.as_str())
    }

    /// Exact, case-sensitive slug comparison.
    pub fn matches_slug(&self, slug: &str) -> bool {
        self.slug_str() == Some(slug)
    }
}

/// Sort projects ascending by rank.
///
/// Ranks compare as plain strings. Records without a rank go after every
/// ranked record; equal ranks keep their input order.
pub fn sort_by_rank(projects: &mut [Project]) {
    projects.sort_by(|a, b| compare_rank(a.order_rank.as_deref(), b.order_rank.as_deref()));
}

fn compare_rank(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawProject {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    id: String,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    client: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    category: Option<Category>,
    #[serde(default, deserialize_with = "lenient")]
    slug: Option<Slug>,
    #[serde(rename = "orderRank", default, deserialize_with = "lenient")]
    order_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    thumbnail: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    overview: Option<String>,
    #[serde(default, deserialize_with = "credits")]
    credits: Vec<Credit>,
    #[serde(rename = "topStills", default, deserialize_with = "lenient_vec")]
    top_stills: Vec<ImageRef>,
    #[serde(rename = "bottomStills", default, deserialize_with = "lenient_vec")]
    bottom_stills: Vec<ImageRef>,
    /// Single gallery used before the top/bottom split.
    #[serde(default, deserialize_with = "lenient_vec")]
    stills: Vec<ImageRef>,
    #[serde(rename = "vimeoUrl", default, deserialize_with = "lenient")]
    vimeo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    featured: Option<bool>,
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        let top_stills = if raw.top_stills.is_empty() {
            raw.stills
        } else {
            raw.top_stills
        };

        Self {
            id: raw.id,
            title: raw.title,
            client: raw.client,
            category: raw.category,
            slug: raw.slug,
            order_rank: raw.order_rank,
            thumbnail: raw.thumbnail,
            overview: raw.overview,
            credits: raw.credits,
            top_stills,
            bottom_stills: raw.bottom_stills,
            vimeo_url: raw.vimeo_url,
            featured: raw.featured.unwrap_or(false),
        }
    }
}

/// Decode a field, substituting its default when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list element by element, dropping elements that do not fit.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Credits arrive as an array of `{role, name}` objects, or from older
/// records as one free-text block with a `Role: Name` entry per line.
fn credits<'de, D>(deserializer: D) -> Result<Vec<Credit>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => parse_credit_lines(&text),
        other => lenient_vec(other).unwrap_or_default(),
    })
}

fn parse_credit_lines(text: &str) -> Vec<Credit> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(':') {
            Some((role, name)) => Credit {
                role: role.trim().to_string(),
                name: name.trim().to_string(),
            },
            None => Credit {
                role: String::new(),
                name: line.to_string(),
            },
        })
        .collect()
}

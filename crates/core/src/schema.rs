//! Declarative schema for the `project` document type.
//!
//! [`project_schema`] describes every field the studio edits, including the
//! validation rules the studio applies. The descriptor serializes to JSON so
//! it can be exported, and [`validate_document`] evaluates the same rules
//! against a raw document. The evaluator is pure logic with no I/O.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::project::{Category, PROJECT_TYPE, RANK_FIELD};
use crate::slug::PROJECT_SLUG_MAX_LEN;

/// Preview subtitles are cut to this many characters.
const PREVIEW_SUBTITLE_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Descriptor types
// ---------------------------------------------------------------------------

/// The kind of value a field holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FieldType {
    String,
    Text { rows: u32 },
    Slug { source: String, max_length: usize },
    Image { hotspot: bool, fields: Vec<FieldDef> },
    Array { of: Vec<FieldType> },
    Object { fields: Vec<FieldDef> },
    Url,
    Boolean,
}

/// A validation rule attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value", rename_all = "camelCase")]
pub enum Rule {
    Required,
    MaxLength(usize),
    OneOf(Vec<String>),
    UriScheme(Vec<String>),
}

impl Rule {
    fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MaxLength(_) => "max_length",
            Self::OneOf(_) => "one_of",
            Self::UriScheme(_) => "uri_scheme",
        }
    }
}

/// One selectable value of a string field rendered as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListOption {
    pub title: String,
    pub value: String,
}

/// A single field of a document or object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    pub title: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<ListOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl FieldDef {
    pub fn new(name: &str, title: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            field_type,
            description: None,
            rules: Vec::new(),
            hidden: false,
            initial_value: None,
            list: Vec::new(),
            layout: None,
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn initial_value(mut self, value: Value) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// Render as a radio list of `(title, value)` choices.
    pub fn radio(mut self, choices: &[(&str, &str)]) -> Self {
        self.list = choices
            .iter()
            .map(|(title, value)| ListOption {
                title: title.to_string(),
                value: value.to_string(),
            })
            .collect();
        self.layout = Some("radio".to_string());
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// Which fields feed the editorial list preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub title: String,
    pub media: String,
    pub subtitle: String,
}

/// A prepared list preview row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub title: Option<String>,
    pub media: Option<Value>,
    pub subtitle: String,
}

impl PreviewConfig {
    /// Select the preview fields from a document and prepare the row.
    pub fn select(&self, document: &Map<String, Value>) -> Preview {
        let title = document
            .get(&self.title)
            .and_then(Value::as_str)
            .map(str::to_string);
        let media = document.get(&self.media).filter(|v| !v.is_null()).cloned();
        let subtitle = document.get(&self.subtitle).and_then(Value::as_str);
        Self::prepare(title, media, subtitle)
    }

    /// Build the preview row: the subtitle is the first 100 characters of
    /// the overview plus `...`, or `No overview` when there is none.
    pub fn prepare(title: Option<String>, media: Option<Value>, overview: Option<&str>) -> Preview {
        let subtitle = match overview.filter(|s| !s.is_empty()) {
            Some(text) => {
                let head: String = text.chars().take(PREVIEW_SUBTITLE_LEN).collect();
                format!("{head}...")
            }
            None => "No overview".to_string(),
        };
        Preview {
            title,
            media,
            subtitle,
        }
    }
}

/// A document type: its fields and list preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSchema {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub fields: Vec<FieldDef>,
    pub preview: PreviewConfig,
}

impl DocumentSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A studio desk entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DeskItem {
    /// Drag-and-drop list that maintains the rank field of `type_name`.
    OrderableList { type_name: String, title: String },
}

/// Studio configuration: where the content lives and how the desk is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioConfig {
    pub name: String,
    pub title: String,
    pub project_id: String,
    pub dataset: String,
    pub desk: Vec<DeskItem>,
    pub schema: Vec<DocumentSchema>,
}

impl StudioConfig {
    /// Studio with a single orderable `project` list.
    pub fn new(project_id: &str, dataset: &str) -> Self {
        Self {
            name: "reel-cms".to_string(),
            title: "Reel CMS".to_string(),
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
            desk: vec![DeskItem::OrderableList {
                type_name: PROJECT_TYPE.to_string(),
                title: "Projects".to_string(),
            }],
            schema: vec![project_schema()],
        }
    }
}

// ---------------------------------------------------------------------------
// The project schema
// ---------------------------------------------------------------------------

fn alt_field() -> FieldDef {
    FieldDef::new("alt", "Alternative Text", FieldType::String)
        .description("Important for SEO and accessibility.")
        .rule(Rule::Required)
}

fn still_image() -> FieldType {
    FieldType::Image {
        hotspot: true,
        fields: vec![alt_field()],
    }
}

/// The canonical `project` document schema.
pub fn project_schema() -> DocumentSchema {
    let credit = FieldType::Object {
        fields: vec![
            FieldDef::new("role", "Role", FieldType::String).rule(Rule::Required),
            FieldDef::new("name", "Name", FieldType::String).rule(Rule::Required),
        ],
    };

    let fields = vec![
        FieldDef::new("title", "Project Title", FieldType::String)
            .rule(Rule::Required)
            .rule(Rule::MaxLength(100)),
        FieldDef::new("client", "Client", FieldType::String)
            .description("Optional client name (will display above project title)")
            .rule(Rule::MaxLength(100)),
        FieldDef::new("category", "Category", FieldType::String)
            .radio(&[
                ("Commercial", Category::Commercial.as_str()),
                ("Narrative", Category::Narrative.as_str()),
            ])
            .rule(Rule::OneOf(vec![
                Category::Commercial.as_str().into(),
                Category::Narrative.as_str().into(),
            ]))
            .rule(Rule::Required),
        FieldDef::new(
            "slug",
            "Slug",
            FieldType::Slug {
                source: "title".to_string(),
                max_length: PROJECT_SLUG_MAX_LEN,
            },
        )
        .rule(Rule::Required),
        FieldDef::new(RANK_FIELD, "Order Rank", FieldType::String)
            .description("Used for drag-and-drop ordering in the studio")
            .hidden(),
        FieldDef::new(
            "thumbnail",
            "Project Thumbnail",
            FieldType::Image {
                hotspot: true,
                fields: vec![alt_field()],
            },
        )
        .rule(Rule::Required),
        FieldDef::new("overview", "Project Overview", FieldType::Text { rows: 4 })
            .description("Brief description of the project"),
        FieldDef::new("credits", "Project Credits", FieldType::Array { of: vec![credit] }),
        FieldDef::new(
            "topStills",
            "Top Still Images",
            FieldType::Array {
                of: vec![still_image()],
            },
        )
        .description("Images to display above the film strip on hover"),
        FieldDef::new(
            "bottomStills",
            "Bottom Still Images",
            FieldType::Array {
                of: vec![still_image()],
            },
        )
        .description("Images to display below the film strip on hover"),
        FieldDef::new("vimeoUrl", "Vimeo Video URL", FieldType::Url)
            .description("The Vimeo video URL for this project")
            .rule(Rule::Required)
            .rule(Rule::UriScheme(vec!["http".into(), "https".into()])),
        FieldDef::new("featured", "Featured Project", FieldType::Boolean)
            .description("Show this project on the homepage")
            .initial_value(Value::Bool(false)),
    ];

    DocumentSchema {
        name: PROJECT_TYPE.to_string(),
        title: "Project".to_string(),
        kind: "document".to_string(),
        fields,
        preview: PreviewConfig {
            title: "title".to_string(),
            media: "thumbnail".to_string(),
            subtitle: "overview".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path to the field, e.g. `credits[0].role`.
    pub field: String,
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Aggregated result of evaluating a schema against one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

/// Evaluate every field rule of `schema` against `document`.
pub fn validate_document(schema: &DocumentSchema, document: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();
    validate_fields(&schema.fields, document, "", &mut errors);
    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn validate_fields(
    fields: &[FieldDef],
    object: &Map<String, Value>,
    prefix: &str,
    errors: &mut Vec<FieldViolation>,
) {
    for field in fields {
        let path = format!("{prefix}{}", field.name);
        let value = object.get(&field.name);

        for rule in &field.rules {
            if let Some(message) = evaluate_rule(rule, &field.field_type, value) {
                errors.push(FieldViolation {
                    field: path.clone(),
                    rule: rule.name().to_string(),
                    message,
                    value: value.cloned(),
                });
            }
        }

        if let Some(value) = value {
            validate_nested(&field.field_type, value, &path, errors);
        }
    }
}

fn validate_nested(
    field_type: &FieldType,
    value: &Value,
    path: &str,
    errors: &mut Vec<FieldViolation>,
) {
    match (field_type, value) {
        (FieldType::Image { fields, .. } | FieldType::Object { fields }, Value::Object(inner)) => {
            validate_fields(fields, inner, &format!("{path}."), errors);
        }
        (FieldType::Array { of }, Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                // Members carry no `_type` discriminator here, so the first
                // member type applies.
                if let Some(member) = of.first() {
                    validate_nested(member, item, &format!("{path}[{index}]"), errors);
                }
            }
        }
        _ => {}
    }
}

fn is_missing(field_type: &FieldType, value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Object(obj)) => match field_type {
            FieldType::Slug { .. } => obj
                .get("current")
                .and_then(Value::as_str)
                .map_or(true, str::is_empty),
            FieldType::Image { .. } => !obj.contains_key("asset"),
            _ => false,
        },
        _ => false,
    }
}

fn evaluate_rule(rule: &Rule, field_type: &FieldType, value: Option<&Value>) -> Option<String> {
    match rule {
        Rule::Required => is_missing(field_type, value).then(|| "Required".to_string()),
        Rule::MaxLength(max) => {
            let text = match value? {
                Value::String(s) => s.as_str(),
                Value::Object(obj) => obj.get("current")?.as_str()?,
                _ => return None,
            };
            (text.chars().count() > *max)
                .then(|| format!("Must be at most {max} characters long"))
        }
        Rule::OneOf(allowed) => {
            let text = value?.as_str()?;
            (!allowed.iter().any(|a| a == text))
                .then(|| format!("Must be one of: {}", allowed.join(", ")))
        }
        Rule::UriScheme(schemes) => {
            let text = value?.as_str()?;
            let valid = text
                .split_once("://")
                .is_some_and(|(scheme, rest)| {
                    !rest.is_empty() && schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
                });
            (!valid).then(|| format!("Must be a URL with scheme {}", schemes.join(" or ")))
        }
    }
}

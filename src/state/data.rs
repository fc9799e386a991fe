//! Shared data structures for the application state
//!
//! These structs represent the project descriptors read from each
//! project's `info.json` and shared between the catalog and the UI layer.
//! JSON keys follow the site's own descriptor format.

use serde::{Deserialize, Deserializer};

use super::lightbox::ImageRef;

/// Cards show at most this many characters of the description
pub const CARD_DESCRIPTION_LIMIT: usize = 100;

/// A single portfolio project
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    /// Unique id, also the gallery sort key
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    /// Category used by the gallery filter (e.g. "residencial")
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    /// Cover image shown on the gallery card
    #[serde(rename = "imagem", default)]
    pub cover: ImageRef,
    /// Every photo of the project, in display order
    #[serde(rename = "imagens", default)]
    pub images: Vec<ImageRef>,
    #[serde(rename = "detalhes", default)]
    pub details: Option<ProjectDetails>,
}

/// Technical sheet shown in the detail panel
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectDetails {
    #[serde(default, deserialize_with = "lenient_text")]
    pub area: Option<String>,
    #[serde(rename = "ano", default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(rename = "localizacao", default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(rename = "tempo", default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    #[serde(rename = "responsavel", default, deserialize_with = "lenient_text")]
    pub lead: Option<String>,
}

impl ProjectDetails {
    /// Labelled rows in display order; missing values are shown as "-"
    pub fn rows(&self) -> [(&'static str, &str); 5] {
        fn value(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or("-")
        }

        [
            ("Built area", value(&self.area)),
            ("Year completed", value(&self.year)),
            ("Location", value(&self.location)),
            ("Execution time", value(&self.duration)),
            ("Lead", value(&self.lead)),
        ]
    }
}

/// Accept strings, numbers and booleans for free-text detail fields
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl Project {
    /// Category with its first character uppercased, as shown on cards
    pub fn display_category(&self) -> String {
        capitalize(&self.category)
    }

    /// Description cut to `limit` characters with a trailing "..." when longer
    pub fn truncated_description(&self, limit: usize) -> String {
        if self.description.chars().count() > limit {
            let cut: String = self.description.chars().take(limit).collect();
            format!("{}...", cut)
        } else {
            self.description.clone()
        }
    }

    /// The image shown first in the detail panel
    pub fn image_at(&self, index: usize) -> &str {
        self.images
            .get(index)
            .map(String::as_str)
            .unwrap_or(&self.cover)
    }
}

/// Which projects the gallery shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Exact category match; `All` matches everything
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => project.category == *category,
        }
    }

    /// Button label for the filter bar
    pub fn label(&self) -> String {
        match self {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Only(category) => capitalize(category),
        }
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

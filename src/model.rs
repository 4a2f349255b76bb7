//! Canonical result schema
//!
//! These are the shapes that leave the core: strategies hand back loose JSON
//! mappings, the validator turns them into these, and the asset materializer
//! fills in the `*_file` references on a copy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of fact an attribute extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Name,
    Logo,
    Partners,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttributeType::Name => "name",
            AttributeType::Logo => "logo",
            AttributeType::Partners => "partners",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoFormat {
    Svg,
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
}

impl LogoFormat {
    /// Parse a strategy-supplied format string. Unknown formats yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Some(LogoFormat::Svg),
            "png" => Some(LogoFormat::Png),
            "jpg" | "jpeg" => Some(LogoFormat::Jpg),
            _ => None,
        }
    }
}

/// A found logo, or its confirmed absence.
///
/// When `found` is false the remaining fields carry no meaning and are
/// ignored downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoResult {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<LogoFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Inline markup, e.g. an `<svg>` element.
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<String>,
    /// Standard base64 of the same payload.
    #[serde(rename = "base64", default, skip_serializing_if = "Option::is_none")]
    pub encoded_data: Option<String>,

    // Populated only by the asset materializer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpg_file: Option<String>,
}

impl LogoResult {
    /// Record a materialized file under `<ext>_file`.
    pub(crate) fn set_file(&mut self, ext: &str, path: String) {
        match ext {
            "svg" => self.svg_file = Some(path),
            "jpg" => self.jpg_file = Some(path),
            _ => self.png_file = Some(path),
        }
    }
}

/// One recognized partner/customer logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerEntry {
    pub name: String,
    pub logo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_file: Option<String>,
}

/// The partner grid of a site. `count` always equals `partners.len()` when
/// built through [`PartnersResult::from_entries`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnersResult {
    pub count: usize,
    pub partners: Vec<PartnerEntry>,
}

impl PartnersResult {
    pub fn from_entries(partners: Vec<PartnerEntry>) -> Self {
        Self {
            count: partners.len(),
            partners,
        }
    }
}

/// A validated attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Name(String),
    Partners(PartnersResult),
    Logo(LogoResult),
}

impl AttributeValue {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Name(_) => AttributeType::Name,
            AttributeValue::Logo(_) => AttributeType::Logo,
            AttributeValue::Partners(_) => AttributeType::Partners,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            AttributeValue::Name(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_logo(&self) -> Option<&LogoResult> {
        match self {
            AttributeValue::Logo(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_partners(&self) -> Option<&PartnersResult> {
        match self {
            AttributeValue::Partners(p) => Some(p),
            _ => None,
        }
    }
}

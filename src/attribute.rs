//! Attribute specs and the extractor contracts
//!
//! A site declares its attributes as [`AttributeSpec`]s. Each spec carries
//! exactly one extractor, and the extractor's shape is tied to the attribute
//! type by construction.

use scraper::Html;
use serde_json::Value;

use crate::error::ExtractError;
use crate::model::{AttributeType, AttributeValue};
use crate::validate::{normalize_logo, normalize_partners};

/// `document -> display name`
pub trait NameExtractor {
    fn extract_name(&self, document: &Html) -> Result<String, ExtractError>;
}

/// `document -> LogoResult-like mapping`
pub trait LogoExtractor {
    fn extract_logo(&self, document: &Html) -> Result<Value, ExtractError>;
}

/// `document -> PartnersResult-like mapping`
pub trait PartnersExtractor {
    fn extract_partners(&self, document: &Html) -> Result<Value, ExtractError>;
}

impl<F> NameExtractor for F
where
    F: Fn(&Html) -> Result<String, ExtractError>,
{
    fn extract_name(&self, document: &Html) -> Result<String, ExtractError> {
        self(document)
    }
}

impl<F> LogoExtractor for F
where
    F: Fn(&Html) -> Result<Value, ExtractError>,
{
    fn extract_logo(&self, document: &Html) -> Result<Value, ExtractError> {
        self(document)
    }
}

impl<F> PartnersExtractor for F
where
    F: Fn(&Html) -> Result<Value, ExtractError>,
{
    fn extract_partners(&self, document: &Html) -> Result<Value, ExtractError> {
        self(document)
    }
}

/// The one extractor bound to an attribute.
pub enum Extractor {
    Name(Box<dyn NameExtractor>),
    Logo(Box<dyn LogoExtractor>),
    Partners(Box<dyn PartnersExtractor>),
}

impl Extractor {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Extractor::Name(_) => AttributeType::Name,
            Extractor::Logo(_) => AttributeType::Logo,
            Extractor::Partners(_) => AttributeType::Partners,
        }
    }
}

/// Binding of an attribute name, its type and its strategy. Immutable once
/// built.
pub struct AttributeSpec {
    name: String,
    extractor: Extractor,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, extractor: Extractor) -> Self {
        Self {
            name: name.into(),
            extractor,
        }
    }

    pub fn name_attr(name: impl Into<String>, extractor: impl NameExtractor + 'static) -> Self {
        Self::new(name, Extractor::Name(Box::new(extractor)))
    }

    pub fn logo(name: impl Into<String>, extractor: impl LogoExtractor + 'static) -> Self {
        Self::new(name, Extractor::Logo(Box::new(extractor)))
    }

    pub fn partners(name: impl Into<String>, extractor: impl PartnersExtractor + 'static) -> Self {
        Self::new(name, Extractor::Partners(Box::new(extractor)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.extractor.attribute_type()
    }

    /// Run the bound strategy. Logo and partner results go through the
    /// validator; names pass through untouched.
    pub fn extract(&self, document: &Html) -> Result<AttributeValue, ExtractError> {
        match &self.extractor {
            Extractor::Name(e) => e.extract_name(document).map(AttributeValue::Name),
            Extractor::Logo(e) => {
                let raw = e.extract_logo(document)?;
                normalize_logo(&raw).map(AttributeValue::Logo)
            }
            Extractor::Partners(e) => {
                let raw = e.extract_partners(document)?;
                normalize_partners(&raw).map(AttributeValue::Partners)
            }
        }
    }
}

impl std::fmt::Debug for AttributeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeSpec")
            .field("name", &self.name)
            .field("type", &self.attribute_type())
            .finish()
    }
}

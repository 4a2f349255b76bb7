//! Site descriptors and the per-site scrape pass

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::attribute::AttributeSpec;
use crate::error::{ConfigError, ExtractError};
use crate::fetch::Fetch;
use crate::model::AttributeValue;

/// A target site: identity plus its ordered attribute specs.
#[derive(Debug)]
pub struct SiteDescriptor {
    name: String,
    url: String,
    base_url: String,
    attributes: Vec<AttributeSpec>,
}

/// The outcome of one scrape pass. Attribute order follows the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub name: String,
    pub url: String,
    pub base_url: String,
    pub data: IndexMap<String, Option<AttributeValue>>,
}

impl SiteDescriptor {
    /// Attribute names must be unique within the site.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        attributes: Vec<AttributeSpec>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let mut seen = HashSet::with_capacity(attributes.len());
        for attr in &attributes {
            if !seen.insert(attr.name()) {
                return Err(ConfigError::DuplicateAttribute {
                    site: name,
                    attribute: attr.name().to_string(),
                });
            }
        }

        let url = url.into();
        Ok(Self {
            name,
            base_url: url.clone(),
            url,
            attributes,
        })
    }

    /// Resolve relative links against `base_url` instead of the canonical URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    /// Fetch the canonical URL and extract every attribute.
    ///
    /// Each call starts from scratch. If the fetch fails the pass is abandoned
    /// and every attribute is recorded as `null`.
    pub fn scrape(&self, fetch: &dyn Fetch) -> SiteRecord {
        match fetch.fetch_text(&self.url) {
            Ok(html) => self.scrape_html(&html),
            Err(e) => {
                error!(site = %self.name, url = %self.url, error = %e, "fetch failed, skipping site");
                self.record(self.attributes.iter().map(|a| (a.name().to_string(), None)).collect())
            }
        }
    }

    /// Extract from already fetched markup.
    pub fn scrape_html(&self, html: &str) -> SiteRecord {
        let document = Html::parse_document(html);
        self.extract_all(&document)
    }

    /// Run every attribute in declared order. A failing attribute is logged and
    /// recorded as `null`; the others are unaffected.
    pub fn extract_all(&self, document: &Html) -> SiteRecord {
        let mut data = IndexMap::with_capacity(self.attributes.len());

        for attr in &self.attributes {
            let value = match extract_isolated(attr, document) {
                Ok(value) => {
                    info!(site = %self.name, attribute = attr.name(), "extracted");
                    Some(value)
                }
                Err(e) => {
                    warn!(site = %self.name, attribute = attr.name(), error = %e, "extraction failed");
                    None
                }
            };
            data.insert(attr.name().to_string(), value);
        }

        self.record(data)
    }

    fn record(&self, data: IndexMap<String, Option<AttributeValue>>) -> SiteRecord {
        SiteRecord {
            name: self.name.clone(),
            url: self.url.clone(),
            base_url: self.base_url.clone(),
            data,
        }
    }
}

/// Run one strategy, turning a panic into an [`ExtractError`].
fn extract_isolated(attr: &AttributeSpec, document: &Html) -> Result<AttributeValue, ExtractError> {
    match panic::catch_unwind(AssertUnwindSafe(|| attr.extract(document))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ExtractError::Panicked(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use serde_json::{json, Value};
    use std::cell::Cell;

    fn name_from_title(document: &Html) -> Result<String, ExtractError> {
        let selector = scraper::Selector::parse("title")
            .map_err(|e| ExtractError::InvalidSelector(e.to_string()))?;
        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .ok_or_else(|| ExtractError::Malformed("page has no title".to_string()))
    }

    fn site_with(logo: AttributeSpec) -> SiteDescriptor {
        SiteDescriptor::new(
            "Example Co",
            "https://example.com/",
            vec![
                AttributeSpec::name_attr("company_name", name_from_title),
                logo,
                AttributeSpec::partners(
                    "partners",
                    |_: &Html| -> Result<Value, ExtractError> {
                        Ok(json!({"partners": [{"name": "acme", "logo_url": "/img/acme.png"}]}))
                    },
                ),
            ],
        )
        .unwrap()
    }

    const PAGE: &str = "<html><head><title> Example Co </title></head><body></body></html>";

    #[test]
    fn test_failing_attribute_is_isolated() {
        let site = site_with(AttributeSpec::logo(
            "company_logo",
            |_: &Html| -> Result<Value, ExtractError> {
                Err(ExtractError::Malformed("no img.logo on page".to_string()))
            },
        ));

        let record = site.scrape_html(PAGE);
        let keys: Vec<&str> = record.data.keys().map(String::as_str).collect();
        assert_eq!(keys, ["company_name", "company_logo", "partners"]);

        assert_eq!(record.data["company_name"].as_ref().unwrap().as_name(), Some("Example Co"));
        assert_eq!(record.data["company_logo"], None);
        assert_eq!(record.data["partners"].as_ref().unwrap().as_partners().unwrap().count, 1);
    }

    #[test]
    fn test_panicking_attribute_is_isolated() {
        let site = site_with(AttributeSpec::logo(
            "company_logo",
            |_: &Html| -> Result<Value, ExtractError> { panic!("selector blew up") },
        ));

        let record = site.scrape_html(PAGE);
        assert_eq!(record.data["company_logo"], None);
        assert!(record.data["company_name"].is_some());
        assert!(record.data["partners"].is_some());
    }

    #[test]
    fn test_fetch_failure_nulls_every_attribute() {
        let site = site_with(AttributeSpec::logo(
            "company_logo",
            |_: &Html| -> Result<Value, ExtractError> { Ok(json!({"found": false})) },
        ));
        let fetch = |url: &str| -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        };

        let record = site.scrape(&fetch);
        assert_eq!(record.data.len(), 3);
        assert!(record.data.values().all(Option::is_none));
    }

    #[test]
    fn test_scrape_uses_injected_fetch_and_starts_fresh() {
        let site = site_with(AttributeSpec::logo(
            "company_logo",
            |_: &Html| -> Result<Value, ExtractError> { Ok(json!({"found": false})) },
        ));
        let calls = Cell::new(0);
        let fetch = |url: &str| -> Result<Vec<u8>, FetchError> {
            assert_eq!(url, "https://example.com/");
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                Ok(PAGE.as_bytes().to_vec())
            } else {
                Err(FetchError::Transport {
                    url: url.to_string(),
                    message: "connection reset".to_string(),
                })
            }
        };

        let first = site.scrape(&fetch);
        assert!(first.data["company_name"].is_some());

        let second = site.scrape(&fetch);
        assert_eq!(second.data["company_name"], None);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_record_field_order() {
        let site = site_with(AttributeSpec::logo(
            "company_logo",
            |_: &Html| -> Result<Value, ExtractError> { Ok(json!({"found": false})) },
        ))
        .with_base_url("https://cdn.example.com/");

        let json = serde_json::to_string(&site.scrape_html(PAGE)).unwrap();
        let name = json.find("\"name\"").unwrap();
        let url = json.find("\"url\"").unwrap();
        let base = json.find("\"base_url\"").unwrap();
        let data = json.find("\"data\"").unwrap();
        assert!(name < url && url < base && base < data);
        assert!(json.contains("https://cdn.example.com/"));
    }

    #[test]
    fn test_duplicate_attribute_names_are_rejected() {
        let result = SiteDescriptor::new(
            "Example Co",
            "https://example.com/",
            vec![
                AttributeSpec::name_attr("company_name", name_from_title),
                AttributeSpec::name_attr("company_name", name_from_title),
            ],
        );

        match result {
            Err(ConfigError::DuplicateAttribute { site, attribute }) => {
                assert_eq!(site, "Example Co");
                assert_eq!(attribute, "company_name");
            }
            other => panic!("expected duplicate attribute error, got {other:?}"),
        }
    }
}

//! Webflow (<https://webflow.com/>)

use std::collections::HashSet;

use scraper::Html;
use serde_json::{json, Value};

use super::{
    file_name, first, format_for, replace_non_word, selector, title, COMPANY_LOGO, COMPANY_NAME,
    PARTNERS,
};
use crate::attribute::{AttributeSpec, LogoExtractor, NameExtractor, PartnersExtractor};
use crate::error::{ConfigError, ExtractError};
use crate::site::SiteDescriptor;

pub const WEBFLOW_URL: &str = "https://webflow.com/";

/// `<title>` up to the first ` - ` or ` | `.
pub struct WebflowName;

impl NameExtractor for WebflowName {
    fn extract_name(&self, document: &Html) -> Result<String, ExtractError> {
        let Some(title) = title(document)? else {
            return Ok("Webflow".to_string());
        };
        let cut = title
            .split_once(" - ")
            .or_else(|| title.split_once(" | "))
            .map(|(head, _)| head.trim().to_string());
        Ok(cut.unwrap_or(title))
    }
}

pub struct WebflowLogo;

impl LogoExtractor for WebflowLogo {
    fn extract_logo(&self, document: &Html) -> Result<Value, ExtractError> {
        let img = match first(document, r#"img[alt="Webflow"]"#)? {
            Some(img) => Some(img),
            None => first(document, "img.logo")?,
        };
        let src = img
            .and_then(|img| img.value().attr("src"))
            .filter(|s| !s.is_empty());

        Ok(match src {
            Some(src) => json!({"found": true, "format": format_for(src), "url": src}),
            None => json!({"found": false}),
        })
    }
}

/// Customer grid: `.logo_wrapper img.logo_grid-logos`, named by alt text or
/// file name.
pub struct WebflowPartners;

impl PartnersExtractor for WebflowPartners {
    fn extract_partners(&self, document: &Html) -> Result<Value, ExtractError> {
        let wrappers = selector(".logo_wrapper")?;
        let img = selector("img.logo_grid-logos")?;

        let mut seen = HashSet::new();
        let mut partners = Vec::new();

        for wrapper in document.select(&wrappers) {
            let Some(el) = wrapper.select(&img).next() else {
                continue;
            };
            let Some(src) = el.value().attr("src").filter(|s| !s.is_empty()) else {
                continue;
            };

            let alt = el.value().attr("alt").unwrap_or("").trim();
            let raw_name = if alt.is_empty() {
                name_from_file(file_name(src))
            } else {
                alt.to_lowercase().replace(' ', "_")
            };

            let name = replace_non_word(&raw_name, "_").trim_matches('_').to_string();
            if name.is_empty() || !seen.insert(name.clone()) {
                continue;
            }
            partners.push(json!({"name": name, "logo_url": src}));
        }

        Ok(json!({"count": partners.len(), "partners": partners}))
    }
}

/// `64f0_Monday.com.svg` -> `monday`
fn name_from_file(file: &str) -> String {
    let stem = file.split('.').next().unwrap_or(file);
    match stem.rsplit_once('_') {
        Some((_, last)) => last.to_lowercase(),
        None => stem.to_lowercase(),
    }
}

pub fn webflow_site() -> Result<SiteDescriptor, ConfigError> {
    SiteDescriptor::new(
        "Webflow",
        WEBFLOW_URL,
        vec![
            AttributeSpec::name_attr(COMPANY_NAME, WebflowName),
            AttributeSpec::logo(COMPANY_LOGO, WebflowLogo),
            AttributeSpec::partners(PARTNERS, WebflowPartners),
        ],
    )
}

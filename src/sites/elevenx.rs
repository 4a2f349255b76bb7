//! 11X (<https://www.11x.ai/>)

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

pub const ELEVENX_URL: &str = "https://www.11x.ai/";

pub struct ElevenXName;

impl NameExtractor for ElevenXName {
    fn extract_name(&self, document: &Html) -> Result<String, ExtractError> {
        Ok(title(document)?.unwrap_or_else(|| "11X".to_string()))
    }
}

pub struct ElevenXLogo;

impl LogoExtractor for ElevenXLogo {
    fn extract_logo(&self, document: &Html) -> Result<Value, ExtractError> {
        let src = first(document, "img._11x-logo")?
            .and_then(|img| img.value().attr("src"))
            .filter(|s| !s.is_empty());

        Ok(match src {
            Some(src) => json!({"found": true, "format": format_for(src), "url": src}),
            None => json!({"found": false}),
        })
    }
}

/// SVG logos inside `.logo3_wrapper`. File names look like
/// `<hash>_<company>.svg`; the first segment is dropped.
pub struct ElevenXPartners;

impl PartnersExtractor for ElevenXPartners {
    fn extract_partners(&self, document: &Html) -> Result<Value, ExtractError> {
        let wrappers = selector(".logo3_wrapper")?;
        let img = selector("img")?;

        let mut seen = HashSet::new();
        let mut partners = Vec::new();

        for wrapper in document.select(&wrappers) {
            let Some(src) = wrapper.select(&img).next().and_then(|el| el.value().attr("src")) else {
                continue;
            };
            if !src.ends_with(".svg") {
                continue;
            }

            let name = company_from_file(file_name(src));
            if !seen.insert(name.clone()) {
                continue;
            }
            partners.push(json!({"name": name, "logo_url": src}));
        }

        Ok(json!({"count": partners.len(), "partners": partners}))
    }
}

fn company_from_file(file: &str) -> String {
    let stem = file.replace(".svg", "");
    let parts: Vec<&str> = stem.split(['_', '-']).collect();
    let company = if parts.len() > 1 {
        parts[1..].join("_")
    } else {
        parts.join("_")
    };
    replace_non_word(&company.to_lowercase(), "")
}

pub fn elevenx_site() -> Result<SiteDescriptor, ConfigError> {
    SiteDescriptor::new(
        "11X",
        ELEVENX_URL,
        vec![
            AttributeSpec::name_attr(COMPANY_NAME, ElevenXName),
            AttributeSpec::logo(COMPANY_LOGO, ElevenXLogo),
            AttributeSpec::partners(PARTNERS, ElevenXPartners),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html>
    <head><title>11x | Digital Workers</title></head>
    <body>
        <img class="_11x-logo" src="https://cdn.prod.website-files.com/abc/11x-logo.svg">
        <div class="logo3_wrapper"><img src="https://cdn.test/6650_Brex-Logo.svg"></div>
        <div class="logo3_wrapper"><img src="https://cdn.test/7781_brex-logo.svg"></div>
        <div class="logo3_wrapper"><img src="https://cdn.test/9912_Otter.ai.svg"></div>
        <div class="logo3_wrapper"><img src="https://cdn.test/photo.png"></div>
        <div class="logo3_wrapper"><span>no image</span></div>
    </body>
    </html>
    "#;

    #[test]
    fn test_elevenx_name() {
        let document = Html::parse_document(PAGE);
        assert_eq!(ElevenXName.extract_name(&document).unwrap(), "11x | Digital Workers");

        let untitled = Html::parse_document("<html><body></body></html>");
        assert_eq!(ElevenXName.extract_name(&untitled).unwrap(), "11X");
    }

    #[test]
    fn test_elevenx_logo() {
        let document = Html::parse_document(PAGE);
        let raw = ElevenXLogo.extract_logo(&document).unwrap();
        assert_eq!(raw["found"], true);
        assert_eq!(raw["format"], "svg");
        assert_eq!(raw["url"], "https://cdn.prod.website-files.com/abc/11x-logo.svg");
    }

    #[test]
    fn test_elevenx_partners() {
        let document = Html::parse_document(PAGE);
        let raw = ElevenXPartners.extract_partners(&document).unwrap();

        let names: Vec<&str> = raw["partners"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["brex_logo", "otterai"]);
    }

    #[test]
    fn test_company_from_file() {
        assert_eq!(company_from_file("6650_Brex-Logo.svg"), "brex_logo");
        assert_eq!(company_from_file("ramp.svg"), "ramp");
    }
}

//! Scale AI (<https://scale.com/>)

use std::collections::HashSet;

use base64::Engine;
use scraper::Html;
use serde_json::{json, Value};
use tracing::warn;
use url::Url;

use super::{first, selector, text_of, COMPANY_LOGO, COMPANY_NAME, PARTNERS};
use crate::attribute::{AttributeSpec, LogoExtractor, NameExtractor, PartnersExtractor};
use crate::error::{ConfigError, ExtractError};
use crate::site::SiteDescriptor;

pub const SCALE_URL: &str = "https://scale.com/";

/// First `<h2>` on the page, or "Scale".
pub struct ScaleName;

impl NameExtractor for ScaleName {
    fn extract_name(&self, document: &Html) -> Result<String, ExtractError> {
        Ok(first(document, "h2")?
            .map(text_of)
            .unwrap_or_else(|| "Scale".to_string()))
    }
}

/// The inline header SVG, returned both raw and base64 encoded.
pub struct ScaleLogo;

impl LogoExtractor for ScaleLogo {
    fn extract_logo(&self, document: &Html) -> Result<Value, ExtractError> {
        let Some(svg) = first(document, "svg.w-auto.h-full.fill-current.text-white")? else {
            return Ok(json!({"found": false}));
        };

        let markup = svg.html();
        let encoded = base64::engine::general_purpose::STANDARD.encode(markup.as_bytes());
        Ok(json!({
            "found": true,
            "format": "svg",
            "data": markup,
            "base64": encoded,
        }))
    }
}

/// Customer logos from the `li.flex.justify-center.items-center` grid.
///
/// Scale renders its logos through the Next.js image proxy, so the partner
/// name is recovered from the proxied `url` query parameter.
pub struct ScalePartners {
    /// Heuristic: the same grid ends with this many logos that are not
    /// customers. They are dropped only when more than this many were found.
    /// Tied to the current page content, not to any structural rule.
    pub trailing_non_partners: usize,
}

impl Default for ScalePartners {
    fn default() -> Self {
        Self {
            trailing_non_partners: 3,
        }
    }
}

impl PartnersExtractor for ScalePartners {
    fn extract_partners(&self, document: &Html) -> Result<Value, ExtractError> {
        let items = selector("li.flex, li.justify-center, li.items-center")?;
        let img = selector("img")?;

        let mut sources: Vec<String> = document
            .select(&items)
            .filter_map(|li| li.select(&img).next())
            .filter_map(|el| el.value().attr("src").map(String::from))
            .collect();

        if sources.len() > self.trailing_non_partners {
            sources.truncate(sources.len() - self.trailing_non_partners);
        }

        let base = Url::parse(SCALE_URL).map_err(|e| ExtractError::Malformed(e.to_string()))?;
        let mut seen = HashSet::new();
        let mut partners = Vec::new();

        for src in sources {
            let Some(name) = proxied_name(&base, &src) else {
                warn!(src = %src, "cannot derive partner name");
                continue;
            };
            if !seen.insert(name.clone()) {
                continue;
            }

            let full_url = match src.strip_prefix('/') {
                Some(rest) => format!("{SCALE_URL}{rest}"),
                None => src.clone(),
            };
            partners.push(json!({
                "name": name,
                "logo_url": src,
                "full_url": full_url,
            }));
        }

        Ok(json!({"count": partners.len(), "partners": partners}))
    }
}

/// `/_next/image?url=%2Fstatic%2Fopenai.png&w=256` -> `openai`
fn proxied_name(base: &Url, src: &str) -> Option<String> {
    let parsed = base.join(src).ok()?;
    let target = parsed
        .query_pairs()
        .find(|(k, _)| k == "url")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default();
    let last = target.rsplit('/').next().unwrap_or("");
    Some(last.replace(".png", ""))
}

pub fn scale_site() -> Result<SiteDescriptor, ConfigError> {
    SiteDescriptor::new(
        "Scale AI",
        SCALE_URL,
        vec![
            AttributeSpec::name_attr(COMPANY_NAME, ScaleName),
            AttributeSpec::logo(COMPANY_LOGO, ScaleLogo),
            AttributeSpec::partners(PARTNERS, ScalePartners::default()),
        ],
    )
}

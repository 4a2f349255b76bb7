//! Built-in site strategies
//!
//! Each module knows the markup of one target site and exposes its name, logo
//! and partners extractors plus a constructor binding them into a
//! [`SiteDescriptor`].

mod elevenx;
mod scale;
mod webflow;

pub use elevenx::*;
pub use scale::*;
pub use webflow::*;

use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use scraper::{ElementRef, Html, Selector};

use crate::error::{ConfigError, ExtractError};
use crate::site::SiteDescriptor;

/// Attribute names shared by every built-in site.
pub const COMPANY_NAME: &str = "company_name";
pub const COMPANY_LOGO: &str = "company_logo";
pub const PARTNERS: &str = "partners";

/// All built-in sites, in scrape order.
pub fn registry() -> Result<Vec<SiteDescriptor>, ConfigError> {
    Ok(vec![scale_site()?, elevenx_site()?, webflow_site()?])
}

pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector(format!("{css}: {e}")))
}

pub(crate) fn first<'a>(document: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, ExtractError> {
    Ok(document.select(&selector(css)?).next())
}

pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Title text, if the page has a non-empty `<title>`.
pub(crate) fn title(document: &Html) -> Result<Option<String>, ExtractError> {
    Ok(first(document, "title")?.map(text_of).filter(|t| !t.is_empty()))
}

/// Last path segment of a URL, ignoring query and fragment.
pub(crate) fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// `svg` for `.svg` sources, `png` for everything else.
pub(crate) fn format_for(src: &str) -> &'static str {
    if src.ends_with(".svg") {
        "svg"
    } else {
        "png"
    }
}

static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Collapse runs of non-word characters into `replacement`.
pub(crate) fn replace_non_word(s: &str, replacement: &str) -> String {
    RE_NON_WORD
        .replace_all(s, NoExpand(replacement))
        .into_owned()
}

//! Path and URL helpers shared by the materializer

use url::Url;

/// Site name lowercased with spaces replaced by underscores.
pub fn site_slug(site_name: &str) -> String {
    site_name.to_lowercase().replace(' ', "_")
}

/// Make a partner name safe to use as a file stem.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned.to_string()
    }
}

/// File extension implied by a URL's suffix: `svg`, `png` or `jpg`, with
/// `png` as the fallback. Query string and fragment are ignored.
pub fn infer_extension(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();

    if path.ends_with(".svg") {
        "svg"
    } else if path.ends_with(".png") {
        "png"
    } else if path.ends_with(".jpg") || path.ends_with(".jpeg") {
        "jpg"
    } else {
        "png"
    }
}

/// Resolve a possibly relative URL against `base`.
///
/// Anything already carrying a scheme separator is returned as is, as is any
/// URL that cannot be joined.
pub fn resolve_url(raw: &str, base: Option<&str>) -> String {
    if raw.contains("://") {
        return raw.to_string();
    }
    let Some(base) = base.filter(|b| !b.is_empty()) else {
        return raw.to_string();
    };

    match Url::parse(base).and_then(|b| b.join(raw)) {
        Ok(joined) => joined.to_string(),
        Err(_) => raw.to_string(),
    }
}

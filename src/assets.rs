//! Asset materialization
//!
//! Takes a validated [`SiteRecord`] and returns a copy whose logo and partner
//! entries point at files on disk. The input record is never touched.
//!
//! Layout under the asset root:
//! - `logos/<site_slug>/logo.<ext>`
//! - `partners/<site_slug>/<partner_name>.<ext>`
//!
//! Recorded paths are relative to the asset root and always use `/`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use base64::Engine;
use tracing::{debug, warn};

use crate::error::AssetError;
use crate::fetch::{download, Fetch};
use crate::model::{AttributeValue, LogoFormat, LogoResult, PartnersResult};
use crate::paths::{infer_extension, resolve_url, sanitize_file_name, site_slug};
use crate::site::SiteRecord;

pub struct AssetMaterializer<'a> {
    fetch: &'a dyn Fetch,
    asset_root: PathBuf,
}

impl<'a> AssetMaterializer<'a> {
    pub fn new(fetch: &'a dyn Fetch, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            fetch,
            asset_root: asset_root.into(),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Materialize every logo and partner attribute of one site.
    pub fn materialize(&self, record: &SiteRecord) -> SiteRecord {
        let slug = site_slug(&record.name);

        let data = record
            .data
            .iter()
            .map(|(name, value)| {
                let value = value.as_ref().map(|value| match value {
                    AttributeValue::Logo(logo) => {
                        AttributeValue::Logo(self.materialize_logo(&slug, logo, &record.base_url))
                    }
                    AttributeValue::Partners(partners) => AttributeValue::Partners(
                        self.materialize_partners(&slug, partners, &record.base_url),
                    ),
                    AttributeValue::Name(_) => value.clone(),
                });
                (name.clone(), value)
            })
            .collect();

        SiteRecord {
            name: record.name.clone(),
            url: record.url.clone(),
            base_url: record.base_url.clone(),
            data,
        }
    }

    /// Write inline SVG content and/or download the logo URL.
    ///
    /// The two paths are independent; both may produce a file.
    pub fn materialize_logo(&self, slug: &str, logo: &LogoResult, base_url: &str) -> LogoResult {
        let mut out = logo.clone();
        if !logo.found {
            return out;
        }

        if logo.format == Some(LogoFormat::Svg) {
            if let Some(svg) = svg_content(logo) {
                let rel = format!("logos/{slug}/logo.svg");
                match self.write_text(&rel, &svg) {
                    Ok(()) => {
                        debug!(path = %rel, "wrote inline svg logo");
                        out.svg_file = Some(rel);
                    }
                    Err(e) => warn!(path = %rel, error = %e, "failed to write svg logo"),
                }
            }
        }

        if let Some(url) = logo.url.as_deref().filter(|u| !u.is_empty()) {
            let ext = infer_extension(url);
            let rel = format!("logos/{slug}/logo.{ext}");
            let fetch_url = resolve_url(url, Some(base_url));
            if download(self.fetch, &fetch_url, &self.asset_root.join(&rel)) {
                out.set_file(ext, rel);
            }
        }

        out
    }

    /// Download each partner logo. A failed download leaves that entry without
    /// `logo_file` and moves on.
    ///
    /// Names that sanitize to an already used file get `_2`, `_3`, ...
    /// appended, so no two entries in the batch share a file.
    pub fn materialize_partners(
        &self,
        slug: &str,
        partners: &PartnersResult,
        base_url: &str,
    ) -> PartnersResult {
        let mut taken = HashSet::new();
        let entries = partners
            .partners
            .iter()
            .map(|entry| {
                let mut out = entry.clone();
                if entry.logo_url.is_empty() {
                    return out;
                }

                let fetch_url = match entry.full_url.as_deref().filter(|u| !u.is_empty()) {
                    Some(full) => full.to_string(),
                    None => resolve_url(&entry.logo_url, Some(base_url)),
                };
                if fetch_url != entry.logo_url {
                    out.full_url = Some(fetch_url.clone());
                }

                let ext = infer_extension(&entry.logo_url);
                let rel = unique_path(&mut taken, slug, &sanitize_file_name(&entry.name), ext);
                if download(self.fetch, &fetch_url, &self.asset_root.join(&rel)) {
                    out.logo_file = Some(rel);
                }
                out
            })
            .collect();

        PartnersResult::from_entries(entries)
    }

    fn write_text(&self, rel: &str, content: &str) -> Result<(), AssetError> {
        let dest = self.asset_root.join(rel);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, content)?;
        Ok(())
    }
}

/// `partners/<slug>/<stem>.<ext>`, suffixed until unused within `taken`.
/// Compared case-insensitively.
fn unique_path(taken: &mut HashSet<String>, slug: &str, stem: &str, ext: &str) -> String {
    let mut rel = format!("partners/{slug}/{stem}.{ext}");
    let mut n = 2;
    while !taken.insert(rel.to_lowercase()) {
        rel = format!("partners/{slug}/{stem}_{n}.{ext}");
        n += 1;
    }
    rel
}

/// SVG markup for a logo: the decoded `base64` payload if usable, otherwise
/// the inline `data`.
fn svg_content(logo: &LogoResult) -> Option<String> {
    if let Some(encoded) = logo.encoded_data.as_deref().filter(|s| !s.is_empty()) {
        match decode_utf8(encoded) {
            Ok(svg) => return Some(svg),
            Err(e) => warn!(error = %e, "undecodable svg payload, trying inline data"),
        }
    }
    logo.inline_data.clone().filter(|s| !s.is_empty())
}

fn decode_utf8(encoded: &str) -> Result<String, AssetError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| AssetError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AssetError::Decode(e.to_string()))
}

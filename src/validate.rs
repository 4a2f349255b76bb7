//! Result validation and normalization
//!
//! Strategies return loose JSON mappings. Whatever they put in there, the
//! canonical records produced here only carry the recognized fields, and the
//! partner count is always recomputed.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ExtractError;
use crate::model::{LogoFormat, LogoResult, PartnerEntry, PartnersResult};

/// Build a canonical [`LogoResult`] from a raw strategy mapping.
///
/// Recognized keys are `found`, `format`, `url`, `data` and `base64`; anything
/// else is dropped. A missing or non-boolean `found` counts as `false`.
pub fn normalize_logo(raw: &Value) -> Result<LogoResult, ExtractError> {
    let map = as_object(raw, "logo")?;

    let format = match map.get("format") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let parsed = LogoFormat::parse(s);
            if parsed.is_none() {
                warn!(format = %s, "dropping unrecognized logo format");
            }
            parsed
        }
        Some(other) => {
            warn!(format = %other, "dropping non-string logo format");
            None
        }
    };

    Ok(LogoResult {
        found: map.get("found").and_then(Value::as_bool).unwrap_or(false),
        format,
        url: string_field(map, &["url"]),
        inline_data: string_field(map, &["data"]),
        encoded_data: string_field(map, &["base64"]),
        ..Default::default()
    })
}

/// Build a canonical [`PartnersResult`] from a raw strategy mapping.
///
/// `count` is recomputed from the normalized list; the strategy's own count is
/// ignored. Entries that are not mappings are skipped.
pub fn normalize_partners(raw: &Value) -> Result<PartnersResult, ExtractError> {
    let map = as_object(raw, "partners")?;

    let entries = match map.get("partners") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            return Err(ExtractError::Malformed(
                "`partners` is not a list".to_string(),
            ))
        }
    };

    let mut partners = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            warn!(index = idx, "skipping partner entry that is not a mapping");
            continue;
        };
        partners.push(PartnerEntry {
            name: string_field(entry, &["name"]).unwrap_or_else(|| "unknown".to_string()),
            logo_url: string_field(entry, &["logo_url", "logoUrl"]).unwrap_or_default(),
            full_url: string_field(entry, &["full_url", "fullUrl"]),
            logo_file: None,
        });
    }

    Ok(PartnersResult::from_entries(partners))
}

fn as_object<'a>(raw: &'a Value, what: &str) -> Result<&'a Map<String, Value>, ExtractError> {
    raw.as_object()
        .ok_or_else(|| ExtractError::Malformed(format!("{what} result is not a mapping")))
}

/// First string value found under any of `keys`.
fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| map.get(*k).and_then(Value::as_str))
        .map(String::from)
}

//! Output aggregation

use std::path::Path;

use tracing::info;

use crate::assets::AssetMaterializer;
use crate::error::OutputError;
use crate::site::SiteRecord;

/// Materialize assets for every record, in order.
pub fn aggregate(records: &[SiteRecord], materializer: &AssetMaterializer<'_>) -> Vec<SiteRecord> {
    records
        .iter()
        .map(|record| {
            info!(site = %record.name, "materializing assets");
            materializer.materialize(record)
        })
        .collect()
}

/// Materialize assets and write the whole list as one pretty-printed JSON
/// document. Returns the records that were written.
pub fn write_document(
    records: &[SiteRecord],
    materializer: &AssetMaterializer<'_>,
    path: &Path,
) -> Result<Vec<SiteRecord>, OutputError> {
    let augmented = aggregate(records, materializer);
    save_records(&augmented, path)?;
    info!(path = %path.display(), sites = augmented.len(), "data saved");
    Ok(augmented)
}

/// Serialize records as-is. Non-ASCII text is written verbatim.
pub fn save_records(records: &[SiteRecord], path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| io_error(path, source))?;
    }
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|source| io_error(path, source))
}

/// Load a document previously written by [`write_document`].
pub fn read_document(path: &Path) -> Result<Vec<SiteRecord>, OutputError> {
    let text = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    Ok(serde_json::from_str(&text)?)
}

fn io_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.display().to_string(),
        source,
    }
}

//! Brand fact scraper
//!
//! Extracts a display name, a logo and a partner/customer logo grid from a
//! fixed set of sites, normalizes the results and saves referenced assets:
//! - [`attribute`]: extractor contracts and attribute specs
//! - [`site`]: site descriptors and the scrape pass
//! - [`validate`]: logo and partner normalization
//! - [`assets`]: asset download and file annotation
//! - [`output`]: the aggregated JSON document
//! - [`sites`]: built-in per-site strategies

pub mod assets;
pub mod attribute;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod output;
pub mod paths;
pub mod site;
pub mod sites;
pub mod validate;

pub use assets::AssetMaterializer;
pub use attribute::{AttributeSpec, Extractor, LogoExtractor, NameExtractor, PartnersExtractor};
pub use config::{Config, FetchConfig};
pub use error::{AssetError, ConfigError, ExtractError, FetchError, OutputError};
pub use fetch::{download, Fetch, HttpFetcher};
pub use model::*;
pub use output::{read_document, write_document};
pub use site::{SiteDescriptor, SiteRecord};

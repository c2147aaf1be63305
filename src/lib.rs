//! slotdoc: converts a slot game HTML write-up into a YAML game record, resolving the game's
//! canonical identity against a paginated catalog API.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod convert;
pub mod document;
pub mod fields;
pub mod model;
pub mod output;
pub mod progress;
pub mod providers;
pub mod record;
pub mod slug;

// Re-exports for CLI and consumers.
pub use catalog::{find_game, CatalogError, CatalogSource, HttpCatalog, SearchOptions};
pub use convert::{build_from_document, convert_file, ConvertError, ConvertOptions, Converted};
pub use document::{Document, Group, Sections, LAYOUT};
pub use model::{GameRecord, GameText, Symbol};
pub use progress::Progress;
pub use providers::{Provider, ProviderTable};
pub use record::{CatalogLookup, Identity, RecordError};

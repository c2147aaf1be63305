//! Record building: section fields, provider lookup, generated and catalog identity.

use crate::catalog::{find_game, CatalogError, CatalogGame, CatalogSource, SearchOptions};
use crate::document::{Group, Sections};
use crate::fields::{characteristics, symbols, text_items, MetaData};
use crate::model::{GameRecord, GameText, RECORD_VERSION};
use crate::providers::{Provider, ProviderTable};
use crate::slug::{slugify, DASH, NONE};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that prevent a record from being built.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Document has no '{field}' meta line (expected e.g. 'Game{label}: ...' before the <h1>).")]
    MissingMeta { field: &'static str, label: &'static str },

    #[error("Provider {name} couldn't be found in the provider table (looked up id '{id}').")]
    UnknownProvider { name: String, id: String },
}

/// `serverId` / `gameKey` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub server_id: String,
    pub game_key: String,
}

impl Identity {
    /// Generated identity: `<urlSlug prefix>-<name-slug>` and `<serverId prefix>_<nameslug>`.
    pub fn fallback(provider: &Provider, name: &str) -> Self {
        Self {
            server_id: join_prefix(&provider.prefix.url_slug, '-', &slugify(name, DASH)),
            game_key: join_prefix(&provider.prefix.server_id, '_', &slugify(name, NONE)),
        }
    }
}

impl From<CatalogGame> for Identity {
    fn from(game: CatalogGame) -> Self {
        Self {
            server_id: game.url_slug,
            game_key: game.server_id,
        }
    }
}

fn join_prefix(prefix: &str, connector: char, rest: &str) -> String {
    if prefix.is_empty() {
        rest.to_string()
    } else {
        format!("{}{}{}", prefix, connector, rest)
    }
}

/// Normalize every section into the record's text block.
pub fn game_text(sections: &Sections<'_>) -> GameText {
    GameText {
        intro: text_items(sections.get(Group::Intro)),
        expect: text_items(sections.get(Group::Expect)),
        characteristics: characteristics(sections.get(Group::Characteristics)),
        played: text_items(sections.get(Group::Played)),
        odds: text_items(sections.get(Group::Odds)),
        symbols: symbols(sections.get(Group::Symbols)),
        test: text_items(sections.get(Group::Test)),
        advantages: text_items(sections.get(Group::Advantages)),
        advanced: Vec::new(),
        play: text_items(sections.get(Group::Play)),
    }
}

/// Game name from the meta block.
pub fn game_name(meta: &MetaData) -> Result<&str, RecordError> {
    meta.name().ok_or(RecordError::MissingMeta {
        field: "name",
        label: "Name",
    })
}

/// Find the meta block's provider in `table`.
pub fn resolve_provider<'t>(
    meta: &MetaData,
    table: &'t ProviderTable,
) -> Result<&'t Provider, RecordError> {
    let name = meta.provider().ok_or(RecordError::MissingMeta {
        field: "provider",
        label: "Provider",
    })?;
    let id = slugify(name, NONE);
    table.find(&id).ok_or_else(|| RecordError::UnknownProvider {
        name: name.to_string(),
        id,
    })
}

/// How the canonical identity is looked up.
pub enum CatalogLookup<'a> {
    /// Keep the generated identity.
    Skip,
    /// Search this catalog source.
    Search {
        source: &'a mut dyn CatalogSource,
        options: SearchOptions<'a>,
    },
    /// Catalog could not be set up; reported and the generated identity kept.
    Unavailable(CatalogError),
}

/// Generated identity, replaced by the catalog's when the lookup finds the game.
///
/// Catalog failures never abort: they are logged and the generated identity stands.
pub fn resolve_identity(provider: &Provider, name: &str, lookup: CatalogLookup<'_>) -> Identity {
    let fallback = Identity::fallback(provider, name);
    match lookup {
        CatalogLookup::Skip => fallback,
        CatalogLookup::Unavailable(e) => {
            warn!("Catalog lookup unavailable: {}. serverId and gameKey will be generated.", e);
            fallback
        }
        CatalogLookup::Search { source, options } => {
            match find_game(source, provider, name, &options) {
                Ok(Some(game)) => game.into(),
                Ok(None) => {
                    info!("{} not found in catalog. serverId and gameKey will be generated.", name);
                    fallback
                }
                Err(e) => {
                    warn!("Catalog lookup failed: {}. serverId and gameKey will be generated.", e);
                    fallback
                }
            }
        }
    }
}

/// Assemble the record from its parts.
pub fn build_record(meta: &MetaData, name: &str, identity: Identity, text: GameText) -> GameRecord {
    GameRecord {
        name: name.to_string(),
        title: meta.title().map(String::from),
        server_id: identity.server_id,
        game_key: identity.game_key,
        meta_description: meta.meta_description().map(String::from),
        version: RECORD_VERSION,
        text,
    }
}

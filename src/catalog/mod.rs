//! Catalog lookup: find a provider's game in the paginated games API by name slug.
//!
//! Each page is a JSON array mixing `{"type": "game", ...}` entries with one
//! `{"type": "loadmore", "items": n}` sentinel telling whether another page follows.

mod client;
mod error;

pub use client::{CatalogClient, CatalogClientBuilder};
pub use error::CatalogError;

use crate::progress::{emit, Progress, ProgressFn};
use crate::providers::Provider;
use crate::slug::same_slug;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

/// Default cap on pages requested per search.
pub const DEFAULT_MAX_PAGES: u32 = 200;

/// Environment variable holding the catalog endpoint.
pub const GAMES_API_ENV: &str = "GAMES_API";

/// A game as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogGame {
    pub name: String,
    #[serde(rename = "urlSlug", deserialize_with = "string_or_number")]
    pub url_slug: String,
    #[serde(rename = "serverId", deserialize_with = "string_or_number")]
    pub server_id: String,
}

/// One entry of a catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogItem {
    #[serde(rename = "game")]
    Game(CatalogGame),
    /// Pagination sentinel; `items > 0` means another page exists.
    #[serde(rename = "loadmore")]
    LoadMore {
        #[serde(default, deserialize_with = "lenient_count")]
        items: u64,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(u64),
    Text(String),
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Scalar::deserialize(d)? {
        Scalar::Number(n) => n.to_string(),
        Scalar::Text(s) => s,
    })
}

/// `items` as sent by the API: a count, a numeric string, or null (treated as 0).
fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(match Option::<Scalar>::deserialize(d)? {
        Some(Scalar::Number(n)) => n,
        Some(Scalar::Text(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

/// Decode a page entry by entry. Entries that do not fit the schema become
/// [CatalogItem::Other], so the page length is kept and neighbours stay usable.
pub fn parse_page(values: Vec<serde_json::Value>) -> Vec<CatalogItem> {
    values
        .into_iter()
        .map(|value| {
            CatalogItem::deserialize(&value).unwrap_or_else(|e| {
                debug!("skipping catalog entry {}: {}", value, e);
                CatalogItem::Other
            })
        })
        .collect()
}

/// Query parameters for page `page` of `vendor`'s games, sorted by name.
pub fn page_query(vendor: &str, page: u32) -> [(&'static str, String); 5] {
    [
        ("vendor", vendor.to_string()),
        ("mobile", "false".to_string()),
        ("orderBy", "name".to_string()),
        ("sortOrder", "asc".to_string()),
        ("page", page.to_string()),
    ]
}

/// Source of catalog pages.
pub trait CatalogSource {
    /// Fetch page `page` (0-based) of `vendor`'s games.
    fn fetch_page(&mut self, vendor: &str, page: u32) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Human-readable location of a page, for progress output.
    fn describe_page(&self, vendor: &str, page: u32) -> String {
        format!("{} page {}", vendor, page)
    }
}

/// Catalog pages fetched over HTTP from a configured endpoint.
pub struct HttpCatalog {
    endpoint: Url,
    client: CatalogClient,
}

impl HttpCatalog {
    pub fn new(endpoint: &str, client: CatalogClient) -> Result<Self, CatalogError> {
        if endpoint.trim().is_empty() {
            return Err(CatalogError::MissingEndpoint);
        }
        let endpoint = Url::parse(endpoint.trim()).map_err(|e| CatalogError::InvalidUrl {
            input: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { endpoint, client })
    }

    pub fn page_url(&self, vendor: &str, page: u32) -> Result<Url, CatalogError> {
        Url::parse_with_params(self.endpoint.as_str(), page_query(vendor, page)).map_err(|e| {
            CatalogError::InvalidUrl {
                input: self.endpoint.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch_page(&mut self, vendor: &str, page: u32) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = self.page_url(vendor, page)?;
        debug!("GET {}", url);
        let values: Vec<serde_json::Value> = self.client.get_json(&url)?;
        Ok(parse_page(values))
    }

    fn describe_page(&self, vendor: &str, page: u32) -> String {
        match self.page_url(vendor, page) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{} page {}", self.endpoint, page),
        }
    }
}

/// Options for [find_game].
pub struct SearchOptions<'a> {
    /// Stop after this many pages (at least one page is always requested).
    pub max_pages: u32,
    pub progress: ProgressFn<'a>,
}

impl Default for SearchOptions<'_> {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            progress: None,
        }
    }
}

/// Walk `provider`'s catalog pages for a game whose name slug equals `game_name`'s.
///
/// Returns `Ok(None)` when the provider has no games, the last page is reached, or the
/// page cap is hit. Fails before any request if the provider has no vendor name.
pub fn find_game(
    source: &mut dyn CatalogSource,
    provider: &Provider,
    game_name: &str,
    options: &SearchOptions<'_>,
) -> Result<Option<CatalogGame>, CatalogError> {
    let vendor = provider
        .db_name
        .as_deref()
        .ok_or_else(|| CatalogError::MissingVendor {
            provider: provider.id.to_string(),
        })?;

    let location = source.describe_page(vendor, 0);
    info!("Searching for {} in {}", game_name, location);
    emit(
        options.progress,
        Progress::Searching {
            game: game_name,
            location: &location,
        },
    );

    let max_pages = options.max_pages.max(1);
    for page in 0..max_pages {
        emit(options.progress, Progress::CheckingPage(page));
        let items = source.fetch_page(vendor, page)?;

        // A page holding only the sentinel is the API's way of saying "nothing here".
        if items.len() < 2 {
            info!("No games of {} were found", provider.name);
            emit(
                options.progress,
                Progress::NoProviderGames {
                    provider: &provider.name,
                },
            );
            return Ok(None);
        }

        let found = items.iter().find_map(|item| match item {
            CatalogItem::Game(game) if same_slug(&game.name, game_name) => Some(game),
            _ => None,
        });
        if let Some(game) = found {
            info!("Found {} on page {}", game.name, page);
            emit(options.progress, Progress::Found(&game.name));
            return Ok(Some(game.clone()));
        }

        let more = items.iter().any(|item| match item {
            CatalogItem::LoadMore { items } => *items > 0,
            _ => false,
        });
        if !more {
            emit(options.progress, Progress::NotFound);
            return Ok(None);
        }
    }

    warn!(
        "Stopped searching for {} after {} pages",
        game_name, max_pages
    );
    emit(options.progress, Progress::PageLimit(max_pages));
    Ok(None)
}

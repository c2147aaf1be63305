//! Game record written to YAML.
//!
//! Field names and order follow the consuming site's `version: 2` game schema.

use serde::{Deserialize, Serialize};

/// Schema version stamped on every record.
pub const RECORD_VERSION: u32 = 2;

/// One game, as written to `<slug>.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Catalog URL slug; generated from provider prefix and name when no catalog match.
    #[serde(rename = "serverId")]
    pub server_id: String,
    /// Catalog server id; generated from provider prefix and name when no catalog match.
    #[serde(rename = "gameKey")]
    pub game_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    pub version: u32,
    pub text: GameText,
}

/// Body sections of a game record. Text entries are inner HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameText {
    pub intro: Vec<String>,
    pub expect: Vec<String>,
    /// `"Key: Value"` lines.
    pub characteristics: Vec<String>,
    pub played: Vec<String>,
    pub odds: Vec<String>,
    pub symbols: Vec<Symbol>,
    pub test: Vec<String>,
    pub advantages: Vec<String>,
    /// Not present in write-ups; always empty.
    pub advanced: Vec<String>,
    pub play: Vec<String>,
}

/// Paytable symbol: title line plus optional description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

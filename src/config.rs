//! Optional config file loading. Search order: ./slotdoc.toml, then
//! $XDG_CONFIG_HOME/slotdoc/config.toml (or ~/.config/slotdoc/config.toml).

use crate::providers::ProviderEntry;
use serde::Deserialize;

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Catalog endpoint. The GAMES_API environment variable takes precedence.
    pub games_api: Option<String>,
    /// Never query the catalog; always generate serverId and gameKey.
    pub skip_catalog: Option<bool>,
    /// Maximum catalog pages to walk per search (default 200).
    pub max_pages: Option<u32>,
    /// HTTP User-Agent header.
    pub user_agent: Option<String>,
    /// Delay in seconds between catalog requests (default 0).
    pub request_delay_secs: Option<u64>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// HTTP attempts per request for transient failures (default 3).
    pub retry_count: Option<u32>,
    /// Delay in seconds before each retry (e.g. [1, 2]).
    pub retry_backoff_secs: Option<Vec<u64>>,
    /// Extra providers; an entry whose id matches a built-in one replaces it.
    pub providers: Vec<ProviderEntry>,
}

/// Search order: (1) ./slotdoc.toml, (2) $XDG_CONFIG_HOME/slotdoc/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("slotdoc.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("slotdoc").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            let s = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            let config: Config = toml::from_str(&s)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
            return Ok(Some(config));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let c: Config = toml::from_str("").unwrap();
        assert!(c.games_api.is_none());
        assert!(c.skip_catalog.is_none());
        assert!(c.max_pages.is_none());
        assert!(c.user_agent.is_none());
        assert!(c.retry_backoff_secs.is_none());
        assert!(c.providers.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let s = r#"
            games_api = "https://api.example.com/games"
            skip_catalog = false
            max_pages = 50
            user_agent = "Custom/1.0"
            request_delay_secs = 1
            timeout_secs = 60
            retry_count = 5
            retry_backoff_secs = [1, 2, 4, 8]

            [[providers]]
            id = "hacksawgaming"
            name = "Hacksaw Gaming"
            db_name = "hacksaw"
            url_slug_prefix = "hacksaw"
            server_id_prefix = "hs"

            [[providers]]
            id = "novomatic"
            name = "Novomatic"
            server_id_prefix = "nvm"
        "#;
        let c: Config = toml::from_str(s).unwrap();
        assert_eq!(c.games_api.as_deref(), Some("https://api.example.com/games"));
        assert_eq!(c.skip_catalog, Some(false));
        assert_eq!(c.max_pages, Some(50));
        assert_eq!(c.user_agent.as_deref(), Some("Custom/1.0"));
        assert_eq!(c.request_delay_secs, Some(1));
        assert_eq!(c.timeout_secs, Some(60));
        assert_eq!(c.retry_count, Some(5));
        assert_eq!(
            c.retry_backoff_secs.as_deref(),
            Some([1, 2, 4, 8].as_slice())
        );
        assert_eq!(c.providers.len(), 2);
        assert_eq!(c.providers[0].db_name.as_deref(), Some("hacksaw"));
        assert!(c.providers[1].db_name.is_none());
        assert_eq!(c.providers[1].url_slug_prefix, "");
    }

    #[test]
    fn parse_partial_config() {
        let c: Config = toml::from_str("skip_catalog = true").unwrap();
        assert_eq!(c.skip_catalog, Some(true));
        assert!(c.games_api.is_none());
        assert!(c.timeout_secs.is_none());
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(toml::from_str::<Config>("games_api = [").is_err());
    }

    #[test]
    fn provider_entry_requires_id_and_name() {
        assert!(toml::from_str::<Config>("[[providers]]\nid = \"x\"").is_err());
    }
}

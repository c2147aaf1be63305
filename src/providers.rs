//! Game provider table. Lookup is by exact id: the provider's name slugified without separator.

use serde::Deserialize;
use std::borrow::Cow;

/// Prefixes prepended to generated identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPrefix {
    /// Prefix for the generated `serverId` (URL slug), joined with `-`.
    pub url_slug: Cow<'static, str>,
    /// Prefix for the generated `gameKey`, joined with `_`.
    pub server_id: Cow<'static, str>,
}

/// A game provider known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    /// Vendor name used by the catalog API. Providers without one cannot be searched.
    pub db_name: Option<Cow<'static, str>>,
    pub prefix: ProviderPrefix,
}

const fn builtin(
    id: &'static str,
    name: &'static str,
    db_name: Option<&'static str>,
    url_slug: &'static str,
    server_id: &'static str,
) -> Provider {
    Provider {
        id: Cow::Borrowed(id),
        name: Cow::Borrowed(name),
        db_name: match db_name {
            Some(s) => Some(Cow::Borrowed(s)),
            None => None,
        },
        prefix: ProviderPrefix {
            url_slug: Cow::Borrowed(url_slug),
            server_id: Cow::Borrowed(server_id),
        },
    }
}

/// Built-in providers.
pub const BUILTIN_PROVIDERS: &[Provider] = &[
    builtin("amatic", "Amatic", Some("amatic"), "amatic", "am"),
    builtin("bellfruit", "Bellfruit", Some("bellfruit"), "bellfruit", "bf"),
    builtin("bigtimegaming", "Big Time Gaming", Some("bigtimegaming"), "btg", "btg"),
    builtin("blueprint", "Blueprint", Some("blueprint"), "blueprint", "bp"),
    builtin("elkstudios", "ELK Studios", Some("elk"), "elk", "elk"),
    builtin("gamomat", "Gamomat", Some("gamomat"), "gamomat", "gm"),
    builtin("greentube", "Greentube", Some("greentube"), "", "gt"),
    builtin("igt", "IGT", Some("igt"), "igt", "igt"),
    builtin("merkur", "Merkur", Some("merkur"), "merkur", "mk"),
    builtin("microgaming", "Microgaming", Some("microgaming"), "microgaming", "mg"),
    builtin("netent", "NetEnt", Some("netent"), "netent", "ne"),
    builtin("novomatic", "Novomatic", Some("novomatic"), "", "nvm"),
    builtin("playngo", "Play'n GO", Some("playngo"), "playngo", "png"),
    builtin("pragmaticplay", "Pragmatic Play", Some("pragmatic"), "pragmatic", "pp"),
    builtin("pushgaming", "Push Gaming", Some("pushgaming"), "push", "pg"),
    builtin("quickspin", "Quickspin", Some("quickspin"), "quickspin", "qs"),
    builtin("redtiger", "Red Tiger", Some("redtiger"), "redtiger", "rt"),
    builtin("relaxgaming", "Relax Gaming", Some("relax"), "relax", "rx"),
    builtin("thunderkick", "Thunderkick", Some("thunderkick"), "thunderkick", "tk"),
    builtin("yggdrasil", "Yggdrasil", None, "yggdrasil", "ygg"),
];

/// Provider entry as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub url_slug_prefix: String,
    #[serde(default)]
    pub server_id_prefix: String,
}

impl From<ProviderEntry> for Provider {
    fn from(e: ProviderEntry) -> Self {
        Provider {
            id: Cow::Owned(e.id),
            name: Cow::Owned(e.name),
            db_name: e.db_name.filter(|s| !s.is_empty()).map(Cow::Owned),
            prefix: ProviderPrefix {
                url_slug: Cow::Owned(e.url_slug_prefix),
                server_id: Cow::Owned(e.server_id_prefix),
            },
        }
    }
}

/// Provider lookup table: built-ins plus config entries, later ids replacing earlier ones.
#[derive(Debug, Clone)]
pub struct ProviderTable {
    providers: Vec<Provider>,
}

impl Default for ProviderTable {
    fn default() -> Self {
        Self {
            providers: BUILTIN_PROVIDERS.to_vec(),
        }
    }
}

impl ProviderTable {
    /// Built-in table with `extra` added; an extra entry with an existing id replaces it.
    pub fn with_extra(extra: impl IntoIterator<Item = Provider>) -> Self {
        let mut table = Self::default();
        for p in extra {
            match table.providers.iter_mut().find(|q| q.id == p.id) {
                Some(existing) => *existing = p,
                None => table.providers.push(p),
            }
        }
        table
    }

    pub fn find(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::{slugify, NONE};

    #[test]
    fn builtin_ids_are_name_slugs() {
        for p in BUILTIN_PROVIDERS {
            assert_eq!(slugify(&p.name, NONE), p.id, "provider {}", p.name);
        }
    }

    #[test]
    fn find_is_exact() {
        let table = ProviderTable::default();
        assert_eq!(
            table.find("novomatic").map(|p| p.name.as_ref()),
            Some("Novomatic")
        );
        assert!(table.find("Novomatic").is_none());
        assert!(table.find("novo").is_none());
    }

    #[test]
    fn extra_entries_add_and_replace() {
        let entries: Vec<ProviderEntry> = vec![
            ProviderEntry {
                id: "novomatic".into(),
                name: "Novomatic".into(),
                db_name: Some("nvm".into()),
                url_slug_prefix: "novo".into(),
                server_id_prefix: "n".into(),
            },
            ProviderEntry {
                id: "hacksaw".into(),
                name: "Hacksaw".into(),
                db_name: Some(String::new()),
                url_slug_prefix: String::new(),
                server_id_prefix: "hs".into(),
            },
        ];
        let before = ProviderTable::default().len();
        let table = ProviderTable::with_extra(entries.into_iter().map(Provider::from));
        assert_eq!(table.len(), before + 1);
        let novo = table.find("novomatic");
        assert_eq!(novo.and_then(|p| p.db_name.as_deref()), Some("nvm"));
        assert_eq!(novo.map(|p| p.prefix.url_slug.as_ref()), Some("novo"));
        // Empty db_name means "not searchable".
        assert!(table.find("hacksaw").is_some_and(|p| p.db_name.is_none()));
    }
}

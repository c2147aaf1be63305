//! Section normalizers: turn segmented elements into record fields.

use crate::document::{inner_markup, text_content};
use crate::model::Symbol;
use crate::slug::{slugify, NONE};
use scraper::ElementRef;
use std::collections::BTreeMap;
use tracing::debug;

/// `Key: Value` metadata lines from the top of a write-up, keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaData {
    fields: BTreeMap<String, String>,
}

impl MetaData {
    /// Read one field per element. Elements without `": "` are skipped.
    pub fn from_elements(elements: &[ElementRef<'_>]) -> Self {
        let mut fields = BTreeMap::new();
        for el in elements {
            let line = text_content(*el);
            match line.split_once(": ") {
                Some((key, value)) => {
                    fields.insert(meta_key(key), value.to_string());
                }
                None => debug!("ignoring meta line without \": \": {:?}", line),
            }
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn provider(&self) -> Option<&str> {
        self.get("provider")
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.get("meta_description")
    }
}

/// `GameProviderName` -> `provider_name`: drop the first `Game`, then snake_case on capitals.
pub fn meta_key(raw: &str) -> String {
    let stripped = raw.replacen("Game", "", 1);
    let mut key = String::with_capacity(stripped.len() + 4);
    for (i, c) in stripped.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            key.push('_');
        }
        key.extend(c.to_lowercase());
    }
    key
}

fn is_list(el: ElementRef<'_>) -> bool {
    matches!(el.value().name(), "ul" | "ol")
}

fn list_items<'a>(list: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == "li")
}

/// Inner markup per element; lists contribute one entry per `<li>`.
pub fn text_items(elements: &[ElementRef<'_>]) -> Vec<String> {
    let mut items = Vec::with_capacity(elements.len());
    for el in elements {
        if is_list(*el) {
            items.extend(list_items(*el).map(inner_markup));
        } else {
            items.push(inner_markup(*el));
        }
    }
    items
}

/// `"Key: value"` list items as `"Key: Value"`.
pub fn characteristics(elements: &[ElementRef<'_>]) -> Vec<String> {
    elements
        .iter()
        .flat_map(|el| el.descendants().filter_map(ElementRef::wrap))
        .filter(|el| el.value().name() == "li")
        .map(|li| capitalize_value(&text_content(li)))
        .collect()
}

fn capitalize_value(line: &str) -> String {
    match line.split_once(": ") {
        Some((key, value)) => {
            let mut chars = value.chars();
            match chars.next() {
                Some(first) => format!("{}: {}{}", key, first.to_uppercase(), chars.as_str()),
                None => format!("{}: ", key),
            }
        }
        None => line.trim().to_string(),
    }
}

/// Alternating title/text elements as symbols. A trailing title has no text.
pub fn symbols(elements: &[ElementRef<'_>]) -> Vec<Symbol> {
    let mut result: Vec<Symbol> = Vec::with_capacity(elements.len() / 2 + 1);
    for (index, el) in elements.iter().enumerate() {
        let content = text_content(*el);
        if index % 2 == 0 {
            result.push(Symbol {
                key: slugify(&content, NONE),
                title: content,
                text: None,
            });
        } else if let Some(last) = result.last_mut() {
            last.text = Some(content);
        }
    }
    result
}

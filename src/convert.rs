//! One write-up in, one YAML record out.

use crate::document::{Document, DocumentError, Group};
use crate::fields::MetaData;
use crate::model::GameRecord;
use crate::output::{default_output_path, write_yaml, WriteError};
use crate::progress::{emit, Progress, ProgressFn};
use crate::providers::ProviderTable;
use crate::record::{
    build_record, game_name, game_text, resolve_identity, resolve_provider, CatalogLookup,
    RecordError,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Record(#[from] RecordError),

    #[error("{0}")]
    Write(#[from] WriteError),
}

/// Options for [convert_file].
pub struct ConvertOptions<'a> {
    pub providers: &'a ProviderTable,
    pub catalog: CatalogLookup<'a>,
    /// Output path; defaults to `<input dir>/<name slug>.yml`.
    pub output: Option<PathBuf>,
    pub progress: ProgressFn<'a>,
}

/// Result of a successful conversion.
#[derive(Debug)]
pub struct Converted {
    pub record: GameRecord,
    pub path: PathBuf,
}

/// Build the record for `document` without writing it.
pub fn build_from_document(
    document: &Document,
    providers: &ProviderTable,
    catalog: CatalogLookup<'_>,
) -> Result<GameRecord, RecordError> {
    let sections = document.segment();
    let meta = MetaData::from_elements(sections.get(Group::Meta));
    let provider = resolve_provider(&meta, providers)?;
    let name = game_name(&meta)?;
    let text = game_text(&sections);
    let identity = resolve_identity(provider, name, catalog);
    Ok(build_record(&meta, name, identity, text))
}

/// Read `input`, build its record, and write it as YAML.
///
/// Nothing is written when the document lacks a name or its provider is unknown.
pub fn convert_file(input: &Path, options: ConvertOptions<'_>) -> Result<Converted, ConvertError> {
    emit(options.progress, Progress::Reading(input));
    let document = Document::from_file(input)?;

    emit(options.progress, Progress::Parsing);
    let record = build_from_document(&document, options.providers, options.catalog)?;

    let path = options
        .output
        .unwrap_or_else(|| default_output_path(input, &record.name));
    emit(options.progress, Progress::Writing(&path));
    write_yaml(&record, &path)?;
    info!("Wrote {}", path.display());

    Ok(Converted { record, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, CatalogItem, CatalogSource, SearchOptions};
    use crate::model::Symbol;
    use std::cell::RefCell;
    use std::error::Error;

    const WRITE_UP: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Book of Ra</title></head><body>
<p></p>
<p>GameName: Book of Ra</p>
<p>GameProvider: Novomatic</p>
<p>Title: Book of Ra: Slot Review</p>
<p>MetaDescription: Play Book of Ra &amp; win.</p>
<h1>Book of Ra</h1>
<p>An <strong>Egyptian</strong> classic.</p>
<h2>What to expect</h2>
<p>Ten lines &amp; free spins.</p>
<ul><li>Volatility: high</li><li>Paylines: 10</li></ul>
<h2>How to play</h2>
<ol><li>Set the stake</li><li>Spin</li></ol>
<h2>Odds</h2>
<p>RTP is 92.13%.</p>
<h2>Symbols</h2>
<h3>Book</h3>
<p>Wild and scatter.</p>
<h3>Explorer</h3>
<p>Pays 5000x.</p>
<h3>Pharaoh</h3>
<h2>Our test</h2>
<p>We played <a href="">100 spins</a>.</p>
<h2>Advantages</h2>
<ul><li>Simple</li><li>Free spins</li></ul>
<h2>Play now</h2>
<p>Try it <a href="/demo">for free</a>.</p>
<p>&nbsp;</p>
<p>Good luck!</p>
</body></html>"#;

    struct Pages(Vec<CatalogItem>);

    impl CatalogSource for Pages {
        fn fetch_page(&mut self, _: &str, _: u32) -> Result<Vec<CatalogItem>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn converts_write_up_offline() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("book.html");
        std::fs::write(&input, WRITE_UP)?;
        let providers = ProviderTable::default();

        let events = RefCell::new(Vec::new());
        let on_progress = |p: &Progress<'_>| events.borrow_mut().push(format!("{:?}", p));
        let converted = convert_file(
            &input,
            ConvertOptions {
                providers: &providers,
                catalog: CatalogLookup::Skip,
                output: None,
                progress: Some(&on_progress),
            },
        )?;

        assert_eq!(converted.path, dir.path().join("book-of-ra.yml"));
        let r = &converted.record;
        assert_eq!(r.name, "Book of Ra");
        assert_eq!(r.title.as_deref(), Some("Book of Ra: Slot Review"));
        assert_eq!(r.meta_description.as_deref(), Some("Play Book of Ra & win."));
        assert_eq!(r.server_id, "book-of-ra");
        assert_eq!(r.game_key, "nvm_bookofra");
        assert_eq!(r.version, 2);
        assert_eq!(r.text.intro, vec!["An <strong>Egyptian</strong> classic."]);
        assert_eq!(r.text.expect, vec!["Ten lines & free spins."]);
        assert_eq!(
            r.text.characteristics,
            vec!["Volatility: High", "Paylines: 10"]
        );
        assert_eq!(r.text.played, vec!["Set the stake", "Spin"]);
        assert_eq!(r.text.odds, vec!["RTP is 92.13%."]);
        assert_eq!(r.text.symbols.len(), 3);
        assert_eq!(
            r.text.symbols[2],
            Symbol {
                key: "pharaoh".into(),
                title: "Pharaoh".into(),
                text: None
            }
        );
        assert_eq!(r.text.test, vec!["We played 100 spins."]);
        assert_eq!(r.text.advantages, vec!["Simple", "Free spins"]);
        assert!(r.text.advanced.is_empty());
        assert_eq!(
            r.text.play,
            vec![r#"Try it <a href="/demo">for free</a>."#, "Good luck!"]
        );

        let written: GameRecord =
            serde_yaml::from_str(&std::fs::read_to_string(&converted.path)?)?;
        assert_eq!(&written, r);

        let events = events.borrow();
        assert!(events.first().is_some_and(|e| e.starts_with("Reading")));
        assert!(events.last().is_some_and(|e| e.starts_with("Writing")));
        Ok(())
    }

    #[test]
    fn catalog_match_is_written() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("book.htm");
        std::fs::write(&input, WRITE_UP)?;
        let output = dir.path().join("custom.yml");
        let providers = ProviderTable::default();
        let mut pages = Pages(vec![
            CatalogItem::Game(crate::catalog::CatalogGame {
                name: "Book Of Ra".into(),
                url_slug: "book-of-ra-classic".into(),
                server_id: "nvm_bookofraclassic".into(),
            }),
            CatalogItem::LoadMore { items: 0 },
        ]);
        let converted = convert_file(
            &input,
            ConvertOptions {
                providers: &providers,
                catalog: CatalogLookup::Search {
                    source: &mut pages,
                    options: SearchOptions::default(),
                },
                output: Some(output.clone()),
                progress: None,
            },
        )?;
        assert_eq!(converted.path, output);
        assert_eq!(converted.record.server_id, "book-of-ra-classic");
        assert_eq!(converted.record.game_key, "nvm_bookofraclassic");
        assert!(output.exists());
        Ok(())
    }

    #[test]
    fn unknown_provider_writes_nothing() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("x.html");
        std::fs::write(
            &input,
            "<body><p>GameName: X</p><p>GameProvider: Nobody</p><h1>X</h1></body>",
        )?;
        let providers = ProviderTable::default();
        let result = convert_file(
            &input,
            ConvertOptions {
                providers: &providers,
                catalog: CatalogLookup::Skip,
                output: None,
                progress: None,
            },
        );
        assert!(matches!(
            result,
            Err(ConvertError::Record(RecordError::UnknownProvider { .. }))
        ));
        assert!(!dir.path().join("x.yml").exists());
        Ok(())
    }
}

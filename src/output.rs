//! YAML output: file naming and writing the game record.

use crate::model::GameRecord;
use crate::slug::{slugify, DASH};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from writing the record.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Cannot write output: {path}: parent directory does not exist.")]
    MissingParent { path: PathBuf },

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write output: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File stem for a game: its dashed slug, or `game` when nothing survives slugging.
pub fn file_stem(name: &str) -> String {
    let stem = slugify(name, DASH);
    if stem.is_empty() {
        "game".to_string()
    } else {
        stem
    }
}

/// `<input dir>/<slug>.yml`.
pub fn default_output_path(input: &Path, name: &str) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{}.yml", file_stem(name)))
}

/// Serialize `record` as block-style YAML.
pub fn to_yaml(record: &GameRecord) -> Result<String, WriteError> {
    Ok(serde_yaml::to_string(record)?)
}

/// Write `record` to `path`, replacing any existing file.
pub fn write_yaml(record: &GameRecord, path: &Path) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(WriteError::MissingParent {
                path: path.to_path_buf(),
            });
        }
    }
    let yaml = to_yaml(record)?;
    let io_err = |e| WriteError::Io {
        path: path.to_path_buf(),
        source: e,
    };
    let mut f = File::create(path).map_err(io_err)?;
    f.write_all(yaml.as_bytes()).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameText, Symbol, RECORD_VERSION};
    use std::error::Error;

    fn record() -> GameRecord {
        let long = "Line ".repeat(60);
        GameRecord {
            name: "Book of Ra".into(),
            title: Some("Book of Ra: Free Play".into()),
            server_id: "book-of-ra".into(),
            game_key: "nvm_bookofra".into(),
            meta_description: Some("Play Book of Ra".into()),
            version: RECORD_VERSION,
            text: GameText {
                intro: vec![long.trim_end().to_string(), "Rock & <b>roll</b>".into()],
                characteristics: vec!["Volatility: High".into()],
                symbols: vec![
                    Symbol {
                        key: "book".into(),
                        title: "Book".into(),
                        text: Some("Wild: 10x".into()),
                    },
                    Symbol {
                        key: "ra".into(),
                        title: "Ra".into(),
                        text: None,
                    },
                ],
                ..GameText::default()
            },
        }
    }

    #[test]
    fn file_stem_slugifies_with_dashes() {
        assert_eq!(file_stem("Book of Ra"), "book-of-ra");
        assert_eq!(file_stem("???"), "game");
    }

    #[test]
    fn default_output_path_is_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("docs/games/book.html"), "Book of Ra"),
            PathBuf::from("docs/games/book-of-ra.yml")
        );
        assert_eq!(
            default_output_path(Path::new("book.html"), "Book of Ra"),
            PathBuf::from("book-of-ra.yml")
        );
    }

    #[test]
    fn yaml_is_block_style_without_wrapping() -> Result<(), Box<dyn Error>> {
        let rec = record();
        let yaml = to_yaml(&rec)?;
        assert!(yaml.contains("\n  intro:\n"));
        assert!(yaml.contains(rec.text.intro[0].as_str()));
        assert!(!yaml.contains("{"));
        Ok(())
    }

    #[test]
    fn written_file_round_trips() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("book-of-ra.yml");
        let rec = record();
        write_yaml(&rec, &path)?;
        let parsed: GameRecord = serde_yaml::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(parsed, rec);
        assert!(parsed.text.play.is_empty());
        assert!(parsed.text.advanced.is_empty());
        Ok(())
    }

    #[test]
    fn missing_parent_is_reported() {
        let path = PathBuf::from("/nonexistent_dir_slotdoc_xyz/book-of-ra.yml");
        assert!(matches!(
            write_yaml(&record(), &path),
            Err(WriteError::MissingParent { .. })
        ));
    }
}

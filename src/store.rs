//! Flat-file config store for overlay settings.
//!
//! File format (`config/config.ini` next to the executable):
//! ```text
//! [Settings]
//! opacity = 50
//! grid_enabled = 0
//! grid_size = 40
//! line_color = (0, 255, 0, 255)
//!
//! [Default]
//! opacity = 50
//! ...
//! ```
//!
//! `[Settings]` holds the current values; `[Default]` holds the factory
//! values that `reset` restores and that `save` never touches. Keys are
//! matched case-insensitively, `=` and `:` both delimit, and lines starting
//! with `#` or `;` are comments. A save rewrites only the `[Settings]` keys
//! and carries every other record and key through unchanged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use thiserror::Error;
use tracing::info;

use crate::constants::paths;
use crate::settings::{LineColor, OverlaySettings};

/// Record holding the current values
pub const RECORD_SETTINGS: &str = "Settings";

/// Record holding the factory values restored by reset
pub const RECORD_DEFAULT: &str = "Default";

const KEY_OPACITY: &str = "opacity";
const KEY_GRID_ENABLED: &str = "grid_enabled";
const KEY_GRID_SIZE: &str = "grid_size";
const KEY_LINE_COLOR: &str = "line_color";

/// Errors from interpreting stored text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A line is neither a record header, a key-value pair, nor a comment.
    #[error("malformed line: '{0}'")]
    MalformedLine(String),

    /// The named record does not appear in the file.
    #[error("record [{0}] not found")]
    MissingRecord(&'static str),

    /// A required key is absent from its record.
    #[error("record [{record}] has no '{key}' key")]
    MissingKey {
        record: &'static str,
        key: &'static str,
    },

    /// A value does not parse as the field's integer type.
    #[error("'{key}' value '{value}' is not a valid integer")]
    InvalidInt { key: &'static str, value: String },

    /// A value is not a recognized boolean spelling.
    #[error("'{key}' value '{value}' is not a valid boolean")]
    InvalidBool { key: &'static str, value: String },

    /// A color tuple is structurally wrong or has an out-of-range component.
    #[error("malformed color tuple '{text}': {reason}")]
    MalformedColor { text: String, reason: String },
}

/// Errors from config store operations, split by the failing layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stored text could not be interpreted.
    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

// ── Document model ────────────────────────────────────────────────────────────

/// One `[name]` record and its key-value pairs, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    name: String,
    entries: Vec<(String, String)>,
}

impl Record {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        match self
            .entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

/// The whole file: records in file order, unknown content preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Document {
    records: Vec<Record>,
}

impl Document {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut doc = Document::default();
        let mut current: Option<usize> = None;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim();
                current = Some(match doc.records.iter().position(|r| r.name == name) {
                    Some(idx) => idx,
                    None => {
                        doc.records.push(Record::new(name));
                        doc.records.len() - 1
                    }
                });
                continue;
            }

            let Some(delim) = line.find(['=', ':']) else {
                return Err(ParseError::MalformedLine(line.to_string()));
            };
            let Some(idx) = current else {
                return Err(ParseError::MalformedLine(line.to_string()));
            };
            let key = line[..delim].trim();
            let value = line[delim + 1..].trim();
            doc.records[idx].set(key, value.to_string());
        }

        Ok(doc)
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push('[');
            out.push_str(&record.name);
            out.push_str("]\n");
            for (key, value) in &record.entries {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    fn record_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.name == name)
    }
}

// ── Value codecs ──────────────────────────────────────────────────────────────

fn format_bool(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ParseError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_int<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidInt {
        key,
        value: value.to_string(),
    })
}

fn format_line_color(color: LineColor) -> String {
    format!("({}, {}, {}, {})", color.r, color.g, color.b, color.a)
}

fn parse_line_color(text: &str) -> Result<LineColor, ParseError> {
    let inner = text.trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace());
    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() != 4 {
        return Err(ParseError::MalformedColor {
            text: text.to_string(),
            reason: format!("expected 4 comma-separated components, got {}", parts.len()),
        });
    }

    let mut components = [0u8; 4];
    for (slot, part) in components.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| ParseError::MalformedColor {
                text: text.to_string(),
                reason: format!("component '{}' is not an integer in 0-255", part.trim()),
            })?;
    }

    Ok(LineColor::from_rgba_array(components))
}

fn record_from_settings(name: &str, settings: &OverlaySettings) -> Record {
    let mut record = Record::new(name);
    write_settings_into(&mut record, settings);
    record
}

fn write_settings_into(record: &mut Record, settings: &OverlaySettings) {
    record.set(KEY_OPACITY, settings.opacity_percent.to_string());
    record.set(KEY_GRID_ENABLED, format_bool(settings.grid_enabled).to_string());
    record.set(KEY_GRID_SIZE, settings.grid_size.to_string());
    record.set(KEY_LINE_COLOR, format_line_color(settings.line_color));
}

fn settings_from_record(doc: &Document, name: &'static str) -> Result<OverlaySettings, ParseError> {
    let record = doc.record(name).ok_or(ParseError::MissingRecord(name))?;
    let value = |key: &'static str| {
        record
            .get(key)
            .ok_or(ParseError::MissingKey { record: name, key })
    };

    let mut settings = OverlaySettings {
        opacity_percent: parse_int(KEY_OPACITY, value(KEY_OPACITY)?)?,
        grid_enabled: parse_bool(KEY_GRID_ENABLED, value(KEY_GRID_ENABLED)?)?,
        grid_size: parse_int(KEY_GRID_SIZE, value(KEY_GRID_SIZE)?)?,
        line_color: parse_line_color(value(KEY_LINE_COLOR)?)?,
    };
    settings.validate_and_clamp();
    Ok(settings)
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Handle to the two-record settings file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

/// Config file location for a given executable path.
pub fn store_path_from_exe_path(exe_path: &Path) -> anyhow::Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(paths::CONFIG_DIR).join(paths::CONFIG_FILE))
}

impl ConfigStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the fixed location next to the executable.
    pub fn at_default_location() -> anyhow::Result<Self> {
        let exe_path = std::env::current_exe().context("resolve current executable")?;
        Ok(Self::new(store_path_from_exe_path(&exe_path)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed the file with a `[Settings]` and a `[Default]` record, both at
    /// factory values, if it does not exist yet. Existing files are left
    /// alone.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                action: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let defaults = OverlaySettings::default();
        let doc = Document {
            records: vec![
                record_from_settings(RECORD_SETTINGS, &defaults),
                record_from_settings(RECORD_DEFAULT, &defaults),
            ],
        };
        self.write_document(&doc)?;
        info!(path = %self.path.display(), "created config store with defaults");
        Ok(())
    }

    /// Overwrite the `[Settings]` keys with the given values. The `[Default]`
    /// record and any unrecognized content are carried through unchanged.
    pub fn save(&self, settings: &OverlaySettings) -> Result<(), StoreError> {
        self.ensure_exists()?;
        let mut doc = self.read_document()?;
        let record = doc
            .record_mut(RECORD_SETTINGS)
            .ok_or_else(|| self.parse_error(ParseError::MissingRecord(RECORD_SETTINGS)))?;
        write_settings_into(record, settings);
        self.write_document(&doc)
    }

    /// Parse the `[Settings]` record, clamping out-of-domain values.
    pub fn load(&self) -> Result<OverlaySettings, StoreError> {
        self.ensure_exists()?;
        let doc = self.read_document()?;
        settings_from_record(&doc, RECORD_SETTINGS).map_err(|e| self.parse_error(e))
    }

    /// Parse the `[Default]` record. `save` never rewrites it, so this is
    /// stable across any number of saves.
    pub fn reset(&self) -> Result<OverlaySettings, StoreError> {
        self.ensure_exists()?;
        let doc = self.read_document()?;
        settings_from_record(&doc, RECORD_DEFAULT).map_err(|e| self.parse_error(e))
    }

    fn read_document(&self) -> Result<Document, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            action: "read",
            path: self.path.clone(),
            source,
        })?;
        Document::parse(&text).map_err(|e| self.parse_error(e))
    }

    fn write_document(&self, doc: &Document) -> Result<(), StoreError> {
        fs::write(&self.path, doc.render()).map_err(|source| StoreError::Io {
            action: "write",
            path: self.path.clone(),
            source,
        })
    }

    fn parse_error(&self, source: ParseError) -> StoreError {
        StoreError::Parse {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LineColor, OverlaySettings};
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("config.ini"))
    }

    fn unwrap_parse(result: Result<OverlaySettings, StoreError>) -> ParseError {
        match result {
            Err(StoreError::Parse { source, .. }) => source,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_store_path_is_config_dir_next_to_executable() {
        let path = store_path_from_exe_path(Path::new("/opt/griddy/griddy")).unwrap();
        assert_eq!(path, Path::new("/opt/griddy/config/config.ini"));
    }

    #[test]
    fn test_load_creates_store_with_defaults() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let loaded = store.load().unwrap();
        assert_eq!(loaded, OverlaySettings::default());
        assert!(store.path().exists());
    }

    #[test]
    fn test_ensure_exists_leaves_existing_file_alone() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();

        let mut settings = OverlaySettings::default();
        settings.set_opacity(77);
        store.save(&settings).unwrap();

        store.ensure_exists().unwrap();
        assert_eq!(store.load().unwrap().opacity_percent, 77);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let saved = OverlaySettings {
            opacity_percent: 80,
            grid_enabled: true,
            grid_size: 25,
            line_color: LineColor::rgba(255, 0, 0, 255),
        };
        store.save(&saved).unwrap();
        assert_eq!(store.load().unwrap(), saved);
    }

    #[test]
    fn test_opacity_roundtrips_across_whole_domain() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut settings = OverlaySettings::default();
        for percent in 0..=100 {
            settings.set_opacity(percent);
            store.save(&settings).unwrap();
            assert_eq!(store.load().unwrap().opacity_percent, percent);
        }
    }

    #[test]
    fn test_color_roundtrips() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut settings = OverlaySettings::default();
        for color in [
            LineColor::rgba(0, 0, 0, 0),
            LineColor::rgba(255, 255, 255, 255),
            LineColor::rgba(1, 2, 3, 4),
            LineColor::rgba(128, 0, 64, 200),
        ] {
            settings.set_line_color(color);
            store.save(&settings).unwrap();
            assert_eq!(store.load().unwrap().line_color, color);
        }
    }

    #[test]
    fn test_reset_returns_factory_defaults_after_saves() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut settings = OverlaySettings::default();
        settings.set_opacity(80);
        settings.set_grid_enabled(true);
        settings.set_grid_size(25);
        settings.set_line_color(LineColor::rgba(255, 0, 0, 255));
        store.save(&settings).unwrap();
        settings.set_opacity(12);
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap().opacity_percent, 12);
        assert_eq!(store.reset().unwrap(), OverlaySettings::default());
    }

    #[test]
    fn test_load_clamps_out_of_domain_grid_size() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        fs::write(store.path(), text.replacen("grid_size = 40", "grid_size = 5", 1)).unwrap();
        assert_eq!(store.load().unwrap().grid_size, 10);

        let text = fs::read_to_string(store.path()).unwrap();
        fs::write(store.path(), text.replacen("grid_size = 5", "grid_size = 500", 1)).unwrap();
        assert_eq!(store.load().unwrap().grid_size, 200);
    }

    #[test]
    fn test_load_rejects_unparseable_int() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        fs::write(store.path(), text.replacen("opacity = 50", "opacity = banana", 1)).unwrap();
        assert_eq!(
            unwrap_parse(store.load()),
            ParseError::InvalidInt {
                key: "opacity",
                value: "banana".to_string(),
            }
        );

        let text = fs::read_to_string(store.path()).unwrap();
        fs::write(store.path(), text.replacen("opacity = banana", "opacity = -5", 1)).unwrap();
        assert!(matches!(
            unwrap_parse(store.load()),
            ParseError::InvalidInt { key: "opacity", .. }
        ));
    }

    #[test]
    fn test_load_rejects_malformed_color() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();

        let seeded = fs::read_to_string(store.path()).unwrap();
        for bad in ["(1, 2, 3)", "(1, 2, 3, 400)", "(a, b, c, d)", "()"] {
            fs::write(
                store.path(),
                seeded.replace("(0, 255, 0, 255)", bad),
            )
            .unwrap();
            assert!(matches!(
                unwrap_parse(store.load()),
                ParseError::MalformedColor { .. }
            ));
        }
    }

    #[test]
    fn test_save_preserves_unknown_records_and_keys() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let text = text.replacen(
            "[Settings]\n",
            "[Settings]\ncustom_key = kept\n",
            1,
        ) + "[Extra]\nanswer = 42\n";
        fs::write(store.path(), text).unwrap();

        let mut settings = OverlaySettings::default();
        settings.set_grid_size(120);
        store.save(&settings).unwrap();

        let rewritten = fs::read_to_string(store.path()).unwrap();
        assert!(rewritten.contains("custom_key = kept"));
        assert!(rewritten.contains("[Extra]"));
        assert!(rewritten.contains("answer = 42"));
        assert_eq!(store.load().unwrap().grid_size, 120);
    }

    #[test]
    fn test_save_requires_settings_record() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[Default]\nopacity = 50\n").unwrap();

        let result = store.save(&OverlaySettings::default());
        assert!(matches!(
            result,
            Err(StoreError::Parse {
                source: ParseError::MissingRecord(RECORD_SETTINGS),
                ..
            })
        ));
    }

    #[test]
    fn test_reset_errors_when_default_record_removed() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "[Settings]\nopacity = 50\ngrid_enabled = 0\ngrid_size = 40\nline_color = (0, 255, 0, 255)\n",
        )
        .unwrap();

        store.save(&OverlaySettings::default()).unwrap();
        assert_eq!(
            unwrap_parse(store.reset()),
            ParseError::MissingRecord(RECORD_DEFAULT)
        );
    }

    #[test]
    fn test_parse_accepts_comments_colons_and_mixed_case_keys() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "# hand-edited\n[Settings]\nOpacity: 66\nGrid_Enabled = yes\n; note\nGrid_Size = 40\nLine_Color = 10, 20, 30, 40\n\n[Default]\nopacity = 50\ngrid_enabled = 0\ngrid_size = 40\nline_color = (0, 255, 0, 255)\n",
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.opacity_percent, 66);
        assert!(loaded.grid_enabled);
        assert_eq!(loaded.line_color, LineColor::rgba(10, 20, 30, 40));
    }

    #[test]
    fn test_parse_rejects_stray_line() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[Settings]\nnot a pair\n").unwrap();

        assert_eq!(
            unwrap_parse(store.load()),
            ParseError::MalformedLine("not a pair".to_string())
        );
    }

    #[test]
    fn test_bool_spellings() {
        assert!(parse_bool("grid_enabled", "TRUE").unwrap());
        assert!(parse_bool("grid_enabled", "on").unwrap());
        assert!(!parse_bool("grid_enabled", "Off").unwrap());
        assert!(!parse_bool("grid_enabled", "0").unwrap());
        assert!(parse_bool("grid_enabled", "2").is_err());
    }

    #[test]
    fn test_color_text_forms() {
        assert_eq!(
            format_line_color(LineColor::rgba(0, 255, 0, 255)),
            "(0, 255, 0, 255)"
        );
        assert_eq!(
            parse_line_color("(0, 255, 0, 255)").unwrap(),
            LineColor::rgba(0, 255, 0, 255)
        );
        // Parens are optional on input, matching how the file may be hand-edited.
        assert_eq!(
            parse_line_color(" 1,2 , 3,4 ").unwrap(),
            LineColor::rgba(1, 2, 3, 4)
        );
    }
}

//! Reading and writing documents.
//!
//! Every failure is reported with the path and the kind of document that was
//! being read, so a broken input is easy to locate.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tinct_engine::{reference_from_json_str, AlphaConfig, DocumentKind, Palette, StyleMap};
use tracing::{debug, warn};

/// Whether `path` names a YAML document.
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn read_text(path: &Path, kind: DocumentKind) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {kind} {}", path.display()))
}

fn read_yaml<T: DeserializeOwned>(path: &Path, kind: DocumentKind) -> Result<T> {
    let text = read_text(path, kind)?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing {kind} {}", path.display()))
}

/// Loads a palette, as YAML when the extension says so.
pub fn read_palette(path: &Path) -> Result<Palette> {
    if is_yaml(path) {
        return read_yaml(path, DocumentKind::Palette);
    }
    let text = read_text(path, DocumentKind::Palette)?;
    Palette::from_json_str(&text).with_context(|| format!("loading {}", path.display()))
}

/// Loads the shared alpha config. A missing file is an empty config.
pub fn read_alpha(path: &Path) -> Result<AlphaConfig> {
    match fs::metadata(path) {
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "alpha config not found, using no shared alpha");
            return Ok(AlphaConfig::default());
        }
        _ => {}
    }
    if is_yaml(path) {
        return read_yaml(path, DocumentKind::AlphaConfig);
    }
    let text = read_text(path, DocumentKind::AlphaConfig)?;
    AlphaConfig::from_json_str(&text).with_context(|| format!("loading {}", path.display()))
}

pub fn read_template(path: &Path) -> Result<StyleMap> {
    let text = read_text(path, DocumentKind::Template)?;
    StyleMap::template_from_json_str(&text).with_context(|| format!("loading {}", path.display()))
}

/// Loads `themes[0].style` from a reference theme.
pub fn read_reference(path: &Path) -> Result<Map<String, Value>> {
    let text = read_text(path, DocumentKind::Reference)?;
    reference_from_json_str(&text).with_context(|| format!("loading {}", path.display()))
}

/// Loads a theme document as untyped JSON.
pub fn read_theme(path: &Path) -> Result<Value> {
    let text = read_text(path, DocumentKind::Theme)?;
    serde_json::from_str(&text).with_context(|| format!("parsing theme {}", path.display()))
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating directory {}", dir.display())),
        _ => Ok(()),
    }
}

/// Writes `value` as two-space indented JSON with a trailing newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {}", path.display()))?;
    text.push('\n');
    create_parent(path)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}

/// Writes a palette back in the format its extension names.
pub fn write_palette(path: &Path, palette: &Palette) -> Result<()> {
    if !is_yaml(path) {
        return write_json(path, palette);
    }
    let text = serde_yaml::to_string(palette)
        .with_context(|| format!("serializing {}", path.display()))?;
    create_parent(path)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), "wrote yaml");
    Ok(())
}

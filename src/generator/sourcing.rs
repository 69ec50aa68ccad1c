use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::themes::load_theme;
use crate::error::{ProserError, Result};
use crate::models::GeneratorOptions;
use crate::utils::strings;

/// Shapes accepted in a custom paragraph file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ParagraphFile {
    List(Vec<String>),
    Document {
        #[serde(default)]
        paragraphs: Vec<String>,
    },
}

impl ParagraphFile {
    fn into_paragraphs(self) -> Vec<String> {
        match self {
            ParagraphFile::List(paragraphs) => paragraphs,
            ParagraphFile::Document { paragraphs } => paragraphs,
        }
    }
}

/// Returns every paragraph available for `options`.
///
/// Paragraphs found under `custom_data_root` win outright. The bundled theme is only used
/// when that root is unset or yields nothing.
pub fn generate(options: &GeneratorOptions) -> Result<Vec<String>> {
    if let Some(root) = &options.custom_data_root {
        let custom = load_custom_paragraphs(root)?;
        if !custom.is_empty() {
            debug!(count = custom.len(), root = %root.display(), "using custom paragraphs");
            return Ok(custom);
        }
        debug!(root = %root.display(), "no custom paragraphs found, falling back to theme");
    }

    load_theme(options.default_theme)
}

/// Merges all paragraph files under `root`, in sorted path order.
///
/// A single malformed file fails the whole merge.
pub fn load_custom_paragraphs(root: &Path) -> Result<Vec<String>> {
    let mut paragraphs = Vec::new();

    for path in discover_json_files(root) {
        let content = fs::read_to_string(&path).map_err(|source| ProserError::SourceRead {
            path: path.clone(),
            source,
        })?;

        if strings::is_blank(&content) {
            debug!(path = %path.display(), "skipping empty paragraph file");
            continue;
        }

        let malformed = |source| ProserError::MalformedSourceFile {
            path: path.clone(),
            source,
        };
        // syntax errors keep serde's line and column, shape errors are checked after
        let value: Value = serde_json::from_str(&content).map_err(malformed)?;
        let found = match value {
            Value::Null => Vec::new(),
            Value::String(s) if strings::is_blank(&s) => Vec::new(),
            value => serde_json::from_value::<ParagraphFile>(value)
                .map_err(malformed)?
                .into_paragraphs(),
        };
        debug!(path = %path.display(), count = found.len(), "read paragraph file");
        paragraphs.extend(found.into_iter().filter(|p| !strings::is_blank(p)));
    }

    Ok(paragraphs)
}

fn discover_json_files(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        warn!(root = %root.display(), "custom data root is not a readable directory");
        return Vec::new();
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();

    paths.sort();
    paths
}

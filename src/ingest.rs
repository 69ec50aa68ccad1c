use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{ProserError, Result};

// two or more line breaks, lines holding only spaces or tabs count as empty
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("paragraph break pattern is valid")
});

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r\n|\n|\r|\x0C)+").expect("line break pattern is valid"));

/// Splits plain text into paragraphs on empty lines.
///
/// Line breaks inside a paragraph collapse to a single `\n`, and each paragraph is trimmed.
pub fn split_into_paragraphs(raw: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(raw)
        .map(|block| LINE_BREAKS.replace_all(block, "\n").trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Reads each text file in order and appends its paragraphs.
///
/// `cancel` is checked before every file. A cancelled run returns `None`, dropping whatever
/// was read so far.
pub fn parse_files<P: AsRef<Path>>(paths: &[P], cancel: &AtomicBool) -> Result<Option<Vec<String>>> {
    let mut result = Vec::new();

    for path in paths {
        if cancel.load(Ordering::Relaxed) {
            debug!("paragraph parsing cancelled");
            return Ok(None);
        }

        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ProserError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        let paragraphs = split_into_paragraphs(&content);
        debug!(path = %path.display(), count = paragraphs.len(), "parsed text file");
        result.extend(paragraphs);
    }

    Ok(Some(result))
}

/// Writes `paragraphs` as a single JSON array.
pub fn save_paragraphs(path: &Path, paragraphs: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(paragraphs).map_err(std::io::Error::from)?;
    fs::write(path, json)?;
    info!(path = %path.display(), count = paragraphs.len(), "File saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn splits_on_empty_lines() {
        let raw = "First paragraph\ncontinues here.\n\nSecond one.\r\n\r\n\r\nThird\r\nline.";
        assert_eq!(
            split_into_paragraphs(raw),
            vec!["First paragraph\ncontinues here.", "Second one.", "Third\nline."]
        );
    }

    #[test]
    fn whitespace_only_lines_separate_paragraphs() {
        let raw = "  One.  \n   \t\n  Two.\n";
        assert_eq!(split_into_paragraphs(raw), vec!["One.", "Two."]);
    }

    #[test]
    fn leading_and_trailing_breaks_produce_no_empty_paragraphs() {
        let raw = "\n\n\nOnly one.\n\n\n";
        assert_eq!(split_into_paragraphs(raw), vec!["Only one."]);
        assert!(split_into_paragraphs("").is_empty());
        assert!(split_into_paragraphs("\r\n\r\n").is_empty());
    }

    #[test]
    fn form_feeds_and_lone_carriage_returns_collapse() {
        assert_eq!(split_into_paragraphs("a\x0Cb\rc"), vec!["a\nb\nc"]);
    }

    #[test]
    fn combines_all_input_files_in_order() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<_> = ["one", "two", "three"]
            .iter()
            .map(|name| {
                let path = dir.path().join(format!("{name}.txt"));
                fs::write(&path, format!("{name}\n\n{name} again")).unwrap();
                path
            })
            .collect();

        let parsed = parse_files(&paths, &AtomicBool::new(false)).unwrap().unwrap();
        assert_eq!(
            parsed,
            vec!["one", "one again", "two", "two again", "three", "three again"]
        );
    }

    #[test]
    fn cancelled_parsing_discards_partial_results() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "text").unwrap();

        assert_eq!(parse_files(&[path], &AtomicBool::new(true)).unwrap(), None);
    }

    #[test]
    fn missing_inputs_are_reported() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt");

        assert!(matches!(
            parse_files(&[missing], &AtomicBool::new(false)),
            Err(ProserError::SourceRead { .. })
        ));
    }

    #[test]
    fn saves_a_compact_json_array() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out").join("result.json");
        let paragraphs = vec!["one".to_string(), "two".to_string()];

        save_paragraphs(&out, &paragraphs).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), r#"["one","two"]"#);
    }
}

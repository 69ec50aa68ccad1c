use rust_embed::RustEmbed;

use crate::error::{ProserError, Result};
use crate::models::DefaultTheme;

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Asset;

/// Loads the bundled corpus for `theme`.
pub fn load_theme(theme: DefaultTheme) -> Result<Vec<String>> {
    let file = Asset::get(theme.resource_path())
        .ok_or_else(|| ProserError::UnknownTheme(theme.name().to_string()))?;

    // a corpus that fails to parse is a packaging error, surfaced as MalformedSourceFile
    serde_json::from_slice(file.data.as_ref()).map_err(|source| {
        ProserError::MalformedSourceFile {
            path: theme.resource_path().into(),
            source,
        }
    })
}

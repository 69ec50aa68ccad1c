use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProserError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DefaultTheme {
    #[serde(rename = "Alice in Wonderland")]
    AliceInWonderland,
    #[serde(rename = "Ghost in the Shell")]
    GhostInTheShell,
    #[default]
    #[serde(rename = "Lorem Ipsum")]
    LoremIpsum,
}

impl DefaultTheme {
    pub const ALL: [DefaultTheme; 3] = [
        DefaultTheme::AliceInWonderland,
        DefaultTheme::GhostInTheShell,
        DefaultTheme::LoremIpsum,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DefaultTheme::AliceInWonderland => "Alice in Wonderland",
            DefaultTheme::GhostInTheShell => "Ghost in the Shell",
            DefaultTheme::LoremIpsum => "Lorem Ipsum",
        }
    }

    /// Path of the bundled corpus, relative to `resources/`.
    pub fn resource_path(self) -> &'static str {
        match self {
            DefaultTheme::AliceInWonderland => "themes/alice_in_wonderland.json",
            DefaultTheme::GhostInTheShell => "themes/ghost_in_the_shell.json",
            DefaultTheme::LoremIpsum => "themes/lorem_ipsum.json",
        }
    }

    fn slug(self) -> String {
        self.name().to_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for DefaultTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DefaultTheme {
    type Err = ProserError;

    // accepts "Alice in Wonderland", "alice in wonderland" or "alice-in-wonderland"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|theme| theme.slug() == wanted)
            .ok_or_else(|| ProserError::UnknownTheme(s.to_string()))
    }
}

/// Where paragraphs come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Directory holding one or more paragraph JSON files. Overrides the bundled themes
    /// whenever it yields at least one paragraph.
    #[serde(default)]
    pub custom_data_root: Option<PathBuf>,
    /// Bundled corpus used when no custom paragraphs were found.
    #[serde(default)]
    pub default_theme: DefaultTheme,
}

impl GeneratorOptions {
    pub fn with_theme(theme: DefaultTheme) -> Self {
        Self {
            custom_data_root: None,
            default_theme: theme,
        }
    }
}

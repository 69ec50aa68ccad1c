use serde_json::Value;
use tracing::{debug, info, warn};

use super::state::SessionState;
use crate::error::{ProserError, Result};
use crate::generator::{self, pick_many, pick_random, pick_random_sentence};
use crate::models::{DefaultTheme, GeneratorOptions};

type Generate = Box<dyn Fn(&GeneratorOptions) -> Result<Vec<String>>>;

/// Session-scoped home of the merged paragraph set.
///
/// Paragraphs are generated once, stored under `<prefix>.sourceText` next to the options
/// that produced them (`<prefix>.sourceOptions`) and served from there until they are
/// replaced. Stored paragraphs are only reused while those options match the current ones.
/// Otherwise nothing expires: a theme change or an explicit [`SourceCache::refresh`] is
/// what regenerates them.
pub struct SourceCache<S: SessionState> {
    state: S,
    prefix: String,
    options: GeneratorOptions,
    generate: Generate,
    slot: Option<Vec<String>>,
}

impl<S: SessionState> SourceCache<S> {
    pub fn new(state: S, prefix: impl Into<String>, options: GeneratorOptions) -> Self {
        Self {
            state,
            prefix: prefix.into(),
            options,
            generate: Box::new(generator::generate),
            slot: None,
        }
    }

    /// Like [`SourceCache::new`], but a theme saved by an earlier session takes precedence
    /// over the one in `options`.
    pub fn open(state: S, prefix: impl Into<String>, options: GeneratorOptions) -> Result<Self> {
        let mut cache = Self::new(state, prefix, options);
        if let Some(theme) = cache.stored_theme()? {
            cache.options.default_theme = theme;
        }
        Ok(cache)
    }

    /// Replaces the paragraph generator, which is [`generator::generate`] by default.
    pub fn with_generator(
        mut self,
        generate: impl Fn(&GeneratorOptions) -> Result<Vec<String>> + 'static,
    ) -> Self {
        self.generate = Box::new(generate);
        self
    }

    pub fn theme(&self) -> DefaultTheme {
        self.options.default_theme
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    fn source_key(&self) -> String {
        format!("{}.sourceText", self.prefix)
    }

    fn options_key(&self) -> String {
        format!("{}.sourceOptions", self.prefix)
    }

    fn theme_key(&self) -> String {
        format!("{}.theme", self.prefix)
    }

    /// The cached paragraphs, generated and stored on first use.
    pub fn source_paragraphs(&mut self) -> Result<&[String]> {
        let paragraphs = match self.slot.take() {
            Some(paragraphs) => paragraphs,
            None => self.materialize()?,
        };
        Ok(self.slot.insert(paragraphs).as_slice())
    }

    fn materialize(&mut self) -> Result<Vec<String>> {
        if let Some(stored) = self.stored_paragraphs()? {
            debug!(count = stored.len(), "source text cache hit");
            return Ok(stored);
        }

        debug!("source text cache miss, generating");
        let generated = (self.generate)(&self.options)?;
        if let Err(e) = self.write_paragraphs(&generated) {
            warn!("failed to cache source paragraphs: {}", e);
        }
        Ok(generated)
    }

    fn stored_paragraphs(&self) -> Result<Option<Vec<String>>> {
        if !self.stored_options_match()? {
            debug!("cached source text was built from other options");
            return Ok(None);
        }

        let Some(value) = self.state.get(&self.source_key())? else {
            return Ok(None);
        };

        match serde_json::from_value::<Vec<String>>(value) {
            Ok(paragraphs) if !paragraphs.is_empty() => Ok(Some(paragraphs)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("ignoring unreadable cached source text: {}", e);
                Ok(None)
            }
        }
    }

    fn stored_options_match(&self) -> Result<bool> {
        let Some(value) = self.state.get(&self.options_key())? else {
            return Ok(false);
        };
        Ok(serde_json::from_value::<GeneratorOptions>(value).is_ok_and(|o| o == self.options))
    }

    // an unknown saved theme must not lock the user out of `change_theme`
    fn stored_theme(&self) -> Result<Option<DefaultTheme>> {
        let name = match self.state.get(&self.theme_key())? {
            Some(Value::String(name)) => name,
            Some(other) => other.to_string(),
            None => return Ok(None),
        };

        match name.parse() {
            Ok(theme) => Ok(Some(theme)),
            Err(e) => {
                warn!("ignoring saved theme, keeping {}: {}", self.options.default_theme, e);
                Ok(None)
            }
        }
    }

    // paragraphs go first so a failed options write leaves a mismatch, never stale text
    fn write_paragraphs(&mut self, paragraphs: &[String]) -> Result<()> {
        let options = serde_json::to_value(&self.options)
            .map_err(|e| ProserError::Persistence(e.to_string()))?;
        let source_key = self.source_key();
        let options_key = self.options_key();
        self.state.update(&source_key, Value::from(paragraphs.to_vec()))?;
        self.state.update(&options_key, options)
    }

    /// Overwrites the cached paragraphs. Storage failures are returned, not swallowed.
    pub fn set_source_paragraphs(&mut self, paragraphs: Vec<String>) -> Result<()> {
        self.write_paragraphs(&paragraphs)?;
        self.slot = Some(paragraphs);
        Ok(())
    }

    /// Regenerates from the current options and overwrites the cache.
    pub fn refresh(&mut self) -> Result<&[String]> {
        let generated = (self.generate)(&self.options)?;
        self.set_source_paragraphs(generated)?;
        self.source_paragraphs()
    }

    /// Generates paragraphs for `theme` before anything is written, so a failed generation
    /// leaves the saved theme and paragraphs as they were.
    pub fn change_theme(&mut self, theme: DefaultTheme) -> Result<&[String]> {
        let mut options = self.options.clone();
        options.default_theme = theme;
        let generated = (self.generate)(&options)?;

        let key = self.theme_key();
        self.state.update(&key, Value::from(theme.name()))?;
        self.options = options;
        self.set_source_paragraphs(generated)?;
        info!("Default theme updated to {}", theme);
        self.source_paragraphs()
    }

    /// Forgets the cached paragraphs so the next read regenerates them.
    pub fn invalidate(&mut self) -> Result<()> {
        self.slot = None;
        let source_key = self.source_key();
        let options_key = self.options_key();
        self.state.remove(&source_key)?;
        self.state.remove(&options_key)
    }

    pub fn random_paragraph(&mut self) -> Result<String> {
        let paragraphs = self.source_paragraphs()?;
        pick_random(paragraphs).cloned().ok_or(ProserError::EmptySource)
    }

    pub fn random_paragraphs(&mut self, count: usize) -> Result<Vec<String>> {
        let paragraphs = self.source_paragraphs()?;
        if paragraphs.is_empty() {
            return Err(ProserError::EmptySource);
        }
        Ok(pick_many(paragraphs, count).into_iter().cloned().collect())
    }

    pub fn random_sentence(&mut self) -> Result<String> {
        let paragraph = self.random_paragraph()?;
        pick_random_sentence(&paragraph)
    }
}

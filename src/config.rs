//! Chunker configuration and layered settings.
//!
//! Both chunkers take a plain config struct with sensible defaults:
//!
//! ```rust
//! use rubric::{ChunkerConfig, SplitterConfig};
//!
//! let structural = ChunkerConfig::default();
//! assert_eq!(structural.min_text_len, 5);
//! assert_eq!(structural.id_width, 4);
//!
//! let fallback = SplitterConfig::new(800, 100).unwrap();
//! assert_eq!(fallback.size, 800);
//! assert!(SplitterConfig::new(100, 100).is_err());
//! ```
//!
//! [`Settings`] bundles them for the command-line driver and loads them
//! from an optional TOML file overlaid with `RUBRIC__*` environment
//! variables (`RUBRIC__CHUNKER__MIN_TEXT_LEN=10`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::{Error, Result};

/// Widest zero-padded sequence number an id may use.
const MAX_ID_WIDTH: usize = 20;

/// Configuration for the structural chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Text chunks with fewer grapheme clusters than this are dropped as
    /// noise (page numbers, stray pipes). Code and table chunks are exempt.
    pub min_text_len: usize,
    /// Zero-padding width of the sequence number in chunk ids.
    pub id_width: usize,
}

impl ChunkerConfig {
    /// Default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_text_len: 5,
            id_width: 4,
        }
    }

    /// Set the noise threshold for text chunks.
    #[must_use]
    pub const fn with_min_text_len(self, min_text_len: usize) -> Self {
        Self {
            min_text_len,
            ..self
        }
    }

    /// Set the id sequence padding.
    #[must_use]
    pub const fn with_id_width(self, id_width: usize) -> Self {
        Self { id_width, ..self }
    }

    /// Check that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `id_width` is unreasonably wide.
    pub fn validate(&self) -> Result<()> {
        if self.id_width > MAX_ID_WIDTH {
            return Err(Error::InvalidConfig(format!(
                "id_width {} exceeds {MAX_ID_WIDTH}",
                self.id_width
            )));
        }
        Ok(())
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the fallback recursive splitter.
///
/// The defaults (1000 bytes, 200 overlap) are large enough to hold a
/// whole exam question with room to spare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Maximum chunk size in bytes.
    pub size: usize,
    /// Bytes of trailing context carried into the next chunk.
    pub overlap: usize,
    /// Separators, coarsest first. `""` means "between graphemes".
    pub separators: Vec<String>,
}

impl SplitterConfig {
    /// Create a config with the default separators.
    ///
    /// # Errors
    ///
    /// Returns an error if `size == 0` or `overlap >= size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        let config = Self {
            size,
            overlap,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the separator hierarchy.
    ///
    /// # Errors
    ///
    /// Returns an error if `separators` is empty.
    pub fn with_separators(self, separators: &[&str]) -> Result<Self> {
        let config = Self {
            separators: separators.iter().map(|&s| s.to_string()).collect(),
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChunkSize`], [`Error::OverlapExceedsSize`] or
    /// [`Error::InvalidConfig`] for an empty separator list.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidChunkSize(self.size));
        }
        if self.overlap >= self.size {
            return Err(Error::OverlapExceedsSize {
                size: self.size,
                overlap: self.overlap,
            });
        }
        if self.separators.is_empty() {
            return Err(Error::InvalidConfig("separators must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            overlap: 200,
            separators: ["\n\n", "\n", " ", ""].iter().map(|&s| s.to_string()).collect(),
        }
    }
}

/// Everything the command-line driver needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Structural chunker settings.
    pub chunker: ChunkerConfig,
    /// Fallback splitter settings.
    pub splitter: SplitterConfig,
    /// Where `<source>_chunks.jsonl` files are written.
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path` (or `rubric.toml` in the working
    /// directory if present) and `RUBRIC__*` environment variables.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly named file is missing or malformed, or if
    /// the merged values do not validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("rubric").required(false),
        };
        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("RUBRIC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.chunker.validate()?;
        settings.splitter.validate()?;
        Ok(settings)
    }
}

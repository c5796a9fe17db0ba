// ABOUTME: Configuration module for the deckhand application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::convert::{Backend, ConvertConfig};
use crate::deck::DeckConfig;
use crate::errors::{DeckError, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_CONVERT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NATIVE_SCALE: f32 = 2.0;

/// Global configuration for the application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub footer_text: Option<String>,
    pub divider_keywords: Vec<String>,
    pub convert_timeout_secs: u64,
    pub native_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            footer_text: None,
            divider_keywords: DeckConfig::default().divider_keywords,
            convert_timeout_secs: DEFAULT_CONVERT_TIMEOUT_SECS,
            native_scale: DEFAULT_NATIVE_SCALE,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Unparseable numbers fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let footer_text = lookup("DECKHAND_FOOTER").filter(|s| !s.trim().is_empty());
        let divider_keywords = lookup("DECKHAND_DIVIDER_KEYWORDS")
            .map(|s| parse_keyword_list(&s))
            .unwrap_or(defaults.divider_keywords);
        let convert_timeout_secs = lookup("DECKHAND_CONVERT_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.convert_timeout_secs);
        let native_scale = lookup("DECKHAND_SCALE")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|scale| scale.is_finite() && *scale > 0.0)
            .unwrap_or(defaults.native_scale);

        Self {
            footer_text,
            divider_keywords,
            convert_timeout_secs,
            native_scale,
        }
    }

    /// Get a deck configuration with CLI overrides applied
    pub fn get_deck_config(&self, title: Option<String>, footer: Option<String>) -> DeckConfig {
        let mut config = DeckConfig {
            title,
            divider_keywords: self.divider_keywords.clone(),
            ..DeckConfig::default()
        };
        config.render.footer_text = footer.or_else(|| self.footer_text.clone());
        config
    }

    /// Get a conversion configuration with CLI overrides applied
    pub fn get_convert_config(
        &self,
        width: u32,
        height: u32,
        pattern: String,
        directory: Option<PathBuf>,
        native_scale: Option<f32>,
    ) -> Result<ConvertConfig> {
        if width == 0 || height == 0 {
            return Err(DeckError::ConfigError(format!(
                "Output dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let backend = match native_scale {
            Some(scale) if !(scale.is_finite() && scale > 0.0) => {
                return Err(DeckError::ConfigError(format!(
                    "Scale must be a positive number, got {}",
                    scale
                )));
            }
            Some(scale) => Backend::Native { scale },
            None => Backend::Rsvg,
        };

        Ok(ConvertConfig {
            width,
            height,
            pattern,
            directory: directory.unwrap_or_else(|| PathBuf::from(".")),
            timeout_secs: self.convert_timeout_secs,
            backend,
        })
    }
}

fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

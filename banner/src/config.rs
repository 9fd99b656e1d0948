use std::path::PathBuf;
use std::str::FromStr;

use crate::infrastructure::storage::DEFAULT_JPEG_QUALITY;

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Steam root from `STEAM_PATH`; the CLI argument takes precedence
    pub steam_root: Option<PathBuf>,
    pub jpeg_quality: u8,
    pub log_format: LogFormat,
    // Raw values that failed to parse, reported by validate()
    invalid_quality: Option<String>,
    invalid_log_format: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let steam_root = lookup("STEAM_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let raw_quality = lookup("BANNER_JPEG_QUALITY");
        let jpeg_quality = raw_quality
            .as_deref()
            .and_then(|s| s.trim().parse::<u8>().ok())
            .unwrap_or(DEFAULT_JPEG_QUALITY);
        let invalid_quality = raw_quality.filter(|s| s.trim().parse::<u8>().is_err());

        let raw_format = lookup("BANNER_LOG_FORMAT");
        let log_format = raw_format
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let invalid_log_format = raw_format.filter(|s| s.parse::<LogFormat>().is_err());

        Self {
            steam_root,
            jpeg_quality,
            log_format,
            invalid_quality,
            invalid_log_format,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(raw) = &self.invalid_quality {
            return Err(format!("BANNER_JPEG_QUALITY must be a number, got {:?}", raw));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err("BANNER_JPEG_QUALITY must be between 1 and 100".to_string());
        }

        if let Some(raw) = &self.invalid_log_format {
            return Err(format!(
                "BANNER_LOG_FORMAT must be pretty or json, got {:?}",
                raw
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

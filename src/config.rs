use std::path::Path;
use std::fs;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Complete tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,
    /// Output formatting
    pub output: OutputConfig,
    /// Decoding limits
    pub decode: DecodeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level or filter directive
    pub level: String,
    /// Enable JSON logging
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix hex output with `0x`
    pub hex_prefix: bool,
    /// Print hex digits in uppercase
    pub uppercase: bool,
    /// Spaces per nesting level in tree output
    pub indent: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Deepest list nesting rendered before giving up
    pub max_depth: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            hex_prefix: true,
            uppercase: false,
            indent: 2,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

impl OutputConfig {
    /// Formats bytes as hex per the configured style
    pub fn hex(&self, bytes: &[u8]) -> String {
        let digits = if self.uppercase {
            hex::encode_upper(bytes)
        } else {
            hex::encode(bytes)
        };
        if self.hex_prefix {
            format!("0x{}", digits)
        } else {
            digits
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context("Failed to read configuration file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        fs::write(path, content)
            .context("Failed to write configuration file")?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        EnvFilter::try_new(&self.log.level)
            .with_context(|| format!("Invalid log level: {}", self.log.level))?;

        if self.output.indent > 16 {
            anyhow::bail!("indent must be at most 16");
        }

        if self.decode.max_depth == 0 {
            anyhow::bail!("max_depth must be greater than 0");
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How answers are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Raw,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "raw" => Ok(Self::Raw),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Raw => "raw",
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Used when neither the command line nor /etc/resolv.conf names a server
    #[serde(default = "default_server")]
    pub default_server: String,

    /// Per-exchange timeout; also bounds each read of a zone transfer
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_server: default_server(),
            timeout_ms: default_timeout_ms(),
            format: OutputFormat::default(),
        }
    }
}

fn default_server() -> String {
    "9.9.9.9".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

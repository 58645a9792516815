use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a recursive transfer does when a zone refuses or cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum TransferFailurePolicy {
    /// Stop the whole run on the first failed session.
    #[default]
    #[serde(rename = "abort")]
    Abort,
    /// Record the label as failed, leave its subtree unexplored and carry on.
    #[serde(rename = "skip")]
    SkipSubtree,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxfrConfig {
    #[serde(default)]
    pub on_failure: TransferFailurePolicy,

    /// Parent directory for the per-run output directory
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
}

impl Default for AxfrConfig {
    fn default() -> Self {
        Self {
            on_failure: TransferFailurePolicy::default(),
            output_root: default_output_root(),
        }
    }
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

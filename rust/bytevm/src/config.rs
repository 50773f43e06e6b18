//! VM configuration, loadable from TOML.
//!
//! ```toml
//! max_instructions = 50000
//! strict_opcodes = true
//! output_limit = 1024
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const DEFAULT_MAX_INSTRUCTIONS: u64 = 1_000_000;
const DEFAULT_OUTPUT_LIMIT: usize = 4096;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid toml: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VmConfig {
    /// Instructions a single [`Vm::run`](crate::Vm::run) may execute before it
    /// gives up with `InstructionLimitExceeded`.
    pub max_instructions: u64,
    /// When set, `run` reports an unregistered opcode as an error rather than
    /// as a halt.
    pub strict_opcodes: bool,
    /// Bytes retained by the default syscall's output buffer.
    pub output_limit: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_instructions: DEFAULT_MAX_INSTRUCTIONS,
            strict_opcodes: false,
            output_limit: DEFAULT_OUTPUT_LIMIT,
        }
    }
}

impl VmConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&content)
    }
}

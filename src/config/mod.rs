//! TOML configuration for the council front end.
//!
//! Every section falls back to its defaults, so an empty or partial file is
//! valid. [`CouncilConfig::load_or_default`] also tolerates a missing or
//! malformed file.

use crate::council::{CouncilSettings, PromptComposer};
use crate::council::prompt::{
    DEFAULT_RECALL_LIMIT, DEFAULT_ROLE_FRAMING, DEFAULT_TRANSCRIPT_WINDOW,
};
use crate::council::service::DEFAULT_OPERATOR_NAME;
use crate::transport::adapters::process::LoginShell;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Default root for the registry file and history directory.
pub const DEFAULT_DATA_DIR: &str = ".council";
/// Directory under the data root holding day logs and the index.
pub const HISTORY_DIR_NAME: &str = "history";
/// Stub advisor registered on a fresh install.
pub const DEFAULT_SEED_ADVISOR: &str = "诸葛亮";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was being read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that was being parsed.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Top-level council configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouncilConfig {
    /// Root for `advisors.json` and the `history/` directory.
    pub data_dir: String,
    /// Speaker name recorded on operator turns.
    pub operator_name: String,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Stub advisor registered when no registry exists yet. Blank disables
    /// seeding.
    pub seed_advisor: Option<String>,
    /// Prompt composition.
    pub prompt: PromptConfig,
    /// Login-shell fallback.
    pub shell: ShellConfig,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_owned(),
            operator_name: DEFAULT_OPERATOR_NAME.to_owned(),
            log_level: "info".to_owned(),
            seed_advisor: Some(DEFAULT_SEED_ADVISOR.to_owned()),
            prompt: PromptConfig::default(),
            shell: ShellConfig::default(),
        }
    }
}

/// Prompt composition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Number of most recent transcript turns shown to an advisor.
    pub transcript_window: usize,
    /// Number of recalled days shown to an advisor.
    pub recall_limit: usize,
    /// Council convention text opening every prompt.
    pub role_framing: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            transcript_window: DEFAULT_TRANSCRIPT_WINDOW,
            recall_limit: DEFAULT_RECALL_LIMIT,
            role_framing: DEFAULT_ROLE_FRAMING.to_owned(),
        }
    }
}

/// Shell used when an advisor executable cannot be resolved directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shell program. Unset means `$SHELL`, else `/bin/sh`.
    pub program: Option<String>,
    /// Arguments placed before the command string.
    pub args: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: ["-l", "-i", "-c"].map(str::to_owned).to_vec(),
        }
    }
}

impl ShellConfig {
    /// Builds the login shell described by this section.
    #[must_use]
    pub fn login_shell(&self) -> LoginShell {
        let fallback = LoginShell::default();
        let program = self
            .program
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| fallback.program());
        LoginShell::new(program, self.args.clone())
    }
}

impl CouncilConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not valid configuration.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let read_error = |source| ConfigError::Read {
            path: path.to_string(),
            source,
        };
        let parent = match path.parent() {
            Some(dir) if !dir.as_str().is_empty() => dir,
            _ => Utf8Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            ))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let content = dir.read_to_string(file_name).map_err(read_error)?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        info!(%path, "configuration loaded");
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when the file is
    /// missing or malformed.
    #[must_use]
    pub fn load_or_default(path: &Utf8Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!(%path, "no configuration file; using defaults");
                Self::default()
            }
            Err(err) => {
                warn!(%path, error = %err, "failed to load configuration; using defaults");
                Self::default()
            }
        }
    }

    /// Returns the data root.
    #[must_use]
    pub fn data_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.data_dir)
    }

    /// Returns the history directory under the data root.
    #[must_use]
    pub fn history_dir(&self) -> Utf8PathBuf {
        self.data_dir().join(HISTORY_DIR_NAME)
    }

    /// Builds council settings from this configuration.
    #[must_use]
    pub fn council_settings(&self) -> CouncilSettings {
        let operator_name = match self.operator_name.trim() {
            "" => DEFAULT_OPERATOR_NAME.to_owned(),
            name => name.to_owned(),
        };
        CouncilSettings {
            operator_name,
            seed_advisor: self
                .seed_advisor
                .as_deref()
                .map(str::trim)
                .filter(|alias| !alias.is_empty())
                .map(str::to_owned),
            composer: PromptComposer::new(
                self.prompt.role_framing.as_str(),
                self.prompt.transcript_window,
                self.prompt.recall_limit,
            ),
        }
    }
}

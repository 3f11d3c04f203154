use std::{collections::BTreeMap, fs, io};
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROGRAM: &str = "git";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_schema_version")] pub schema_version: u32,
    /// Executable looked up on PATH (or an absolute path).
    #[serde(default = "default_program")] pub program: String,
    #[serde(default)] pub scope: ScopeMode,
    /// Extra environment for every launch. The defaults keep git from prompting.
    #[serde(default = "default_env")] pub env: BTreeMap<String, String>,
    #[serde(default)] pub logging: LoggingConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            program: default_program(),
            scope: ScopeMode::default(),
            env: default_env(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_schema_version() -> u32 { 1 }
fn default_program() -> String { DEFAULT_PROGRAM.to_string() }
// core.quotePath=false keeps ls-files from C-quoting non-ASCII names.
fn default_env() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("GIT_CONFIG_COUNT".to_string(), "1".to_string()),
        ("GIT_CONFIG_KEY_0".to_string(), "core.quotePath".to_string()),
        ("GIT_CONFIG_VALUE_0".to_string(), "false".to_string()),
        ("GIT_SSH_COMMAND".to_string(), "ssh -oBatchMode=yes".to_string()),
        ("GIT_TERMINAL_PROMPT".to_string(), "0".to_string()),
    ])
}

/// How a directory-scoped operation gets its working directory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeMode {
    /// Hand the directory to the child process; the caller's cwd is never touched.
    #[default]
    Explicit,
    /// chdir the whole process around the launch and restore it afterwards.
    ProcessCwd,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)] pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel { Trace, Debug, #[default] Info, Warn, Error }

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info  => log::LevelFilter::Info,
            LogLevel::Warn  => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl ToolConfig {
    /// ~/.config/gitshim/gitshim.toml (XDG/macOS/Windows aware)
    pub fn path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("dev", "gitshim", "gitshim") {
            pd.config_dir().join("gitshim.toml")
        } else {
            PathBuf::from("gitshim.toml")
        }
    }

    pub fn load_or_default() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load from `p`, falling back to defaults when missing or unparsable.
    pub fn load_from(p: &Path) -> Self {
        let mut cfg = match fs::read_to_string(p) {
            Ok(s) => toml::from_str::<ToolConfig>(&s).unwrap_or_else(|e| {
                log::warn!("gitshim-core: ignoring unparsable config {}: {e}", p.display());
                ToolConfig::default()
            }),
            Err(_) => ToolConfig::default(),
        };
        cfg.validate();
        cfg
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&Self::path())
    }

    /// Pretty TOML, written beside the target then renamed over it.
    pub fn save_to(&self, p: &Path) -> io::Result<()> {
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = p.with_extension("toml.tmp");
        fs::write(&tmp, data)?;
        fs::rename(tmp, p)
    }

    /// Normalize values so hand edits can't break launches.
    pub fn validate(&mut self) {
        if self.program.trim().is_empty() {
            self.program = default_program();
        }
    }
}

use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_RECENT_LIMIT: usize = 20;

#[derive(Debug, Clone)]
pub struct ForumConfig {
    pub paths: ForumPaths,
    /// Default number of threads shown by `threads` in the CLI.
    pub recent_limit: usize,
}

impl ForumConfig {
    pub fn from_env() -> Result<Self> {
        let paths = match env::var("FORUM_HOME") {
            Ok(raw) if !raw.trim().is_empty() => ForumPaths::from_base_dir(raw.trim())?,
            _ => ForumPaths::discover()?,
        };
        let recent_limit = env::var("FORUM_RECENT_LIMIT")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_RECENT_LIMIT);
        Ok(Self {
            paths,
            recent_limit,
        })
    }

    pub fn new(paths: ForumPaths) -> Self {
        Self {
            paths,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForumPaths {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl ForumPaths {
    pub fn discover() -> Result<Self> {
        let exe_path = std::env::current_exe()
            .map_err(|err| anyhow!("failed to resolve current executable: {err}"))?;
        let base = exe_path
            .parent()
            .ok_or_else(|| anyhow!("executable path missing parent"))?
            .to_path_buf();
        Self::from_base_dir(base)
    }

    pub fn from_base_dir<P: AsRef<Path>>(base: P) -> Result<Self> {
        let data_dir = base.as_ref().join("data");
        let db_path = data_dir.join("forum.db");

        Ok(Self { data_dir, db_path })
    }
}

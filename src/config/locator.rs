//! Configuration file discovery.
//!
//! Candidates are probed in strict priority order:
//! 1. explicit path from the startup options
//! 2. `KQUEUEY_CONFIG_PATH`
//! 3. the fixed fallback directories
//!
//! A directory candidate is searched for `kqueuey-config.yaml`, then
//! `kqueuey-config.yml`; a file candidate is used as-is. A missing path
//! ending in `.yaml` or `.yml` is taken to be a file and reported under its
//! own name. The locator never parses anything.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::loader::ConfigError;

/// Base name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "kqueuey-config";

/// Recognized extensions, in probe order.
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Environment variable naming a search directory (or file).
pub const CONFIG_PATH_ENV: &str = "KQUEUEY_CONFIG_PATH";

/// Well-known directories searched when nothing else matches.
pub const FALLBACK_DIRS: &[&str] = &[
    "/usr/local/etc/",
    "/config/",
    "/etc/config/",
    "/var/lib/config/",
    "/data/",
];

/// Resolves which configuration file to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocator {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    fallbacks: Vec<PathBuf>,
}

impl SourceLocator {
    pub fn new(explicit: Option<PathBuf>, env: Option<PathBuf>, fallbacks: Vec<PathBuf>) -> Self {
        Self {
            explicit: explicit.filter(|p| !p.as_os_str().is_empty()),
            env: env.filter(|p| !p.as_os_str().is_empty()),
            fallbacks,
        }
    }

    /// Locator reading `KQUEUEY_CONFIG_PATH` and using [`FALLBACK_DIRS`].
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        let env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::new(explicit, env, FALLBACK_DIRS.iter().map(PathBuf::from).collect())
    }

    /// Every candidate file, in probe order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        for root in self.explicit.iter().chain(self.env.iter()) {
            if root.is_file() || (!root.exists() && has_config_extension(root)) {
                candidates.push(root.clone());
            } else {
                candidates.extend(files_in(root));
            }
        }
        for dir in &self.fallbacks {
            candidates.extend(files_in(dir));
        }
        candidates
    }

    /// First readable candidate.
    pub fn locate(&self) -> Result<PathBuf, ConfigError> {
        let candidates = self.candidates();
        match candidates.iter().find(|path| is_readable(path)) {
            Some(found) => {
                tracing::debug!(path = %found.display(), "Configuration file located");
                Ok(found.clone())
            }
            None => Err(ConfigError::NotFound {
                searched: candidates,
            }),
        }
    }
}

fn files_in(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    CONFIG_EXTENSIONS
        .iter()
        .map(move |ext| dir.join(format!("{CONFIG_FILE_NAME}.{ext}")))
}

fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext))
}

fn is_readable(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

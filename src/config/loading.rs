use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

/// Config file names, in order of precedence within one directory.
pub const CONFIG_FILES: &[&str] = &[".lintbridge.toml", "lintbridge.toml", ".config/lintbridge.toml"];

/// Prevent runaway traversal on pathological filesystems.
const MAX_DEPTH: usize = 100;

impl Config {
    /// Parse and validate a TOML document. `path` only labels errors.
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Load an explicit config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            source: e,
            path: path_str.clone(),
        })?;
        let config = Self::from_toml_str(&content, &path_str)?;
        log::debug!("[lintbridge-config] Loaded config from {path_str}");
        Ok(config)
    }

    /// Load the nearest config file above `start_dir`, or defaults when there is none.
    pub fn discover(start_dir: &Path) -> Result<Self, ConfigError> {
        match find_config_file(start_dir) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("[lintbridge-config] No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Find the nearest config file by traversing up from `start_dir`.
///
/// The search stops after the directory containing `.git`.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = start_dir.to_path_buf();

    for _ in 0..MAX_DEPTH {
        log::debug!("[lintbridge-config] Searching for config in: {}", current_dir.display());

        for config_name in CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if config_path.is_file() {
                log::debug!("[lintbridge-config] Found config file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if current_dir.join(".git").exists() {
            log::debug!("[lintbridge-config] Stopping at .git directory");
            return None;
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_owned(),
            None => {
                log::debug!("[lintbridge-config] Reached filesystem root");
                return None;
            }
        }
    }

    log::debug!("[lintbridge-config] Maximum traversal depth reached");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_walks_upward() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".lintbridge.toml"), "[worker]\nqueue-capacity = 3\n").unwrap();
        let nested = root.join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config_file(&nested), Some(root.join(".lintbridge.toml")));
        let config = Config::discover(&nested).unwrap();
        assert_eq!(config.worker.queue_capacity, 3);
    }

    #[test]
    fn test_nearest_file_wins() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".lintbridge.toml"), "[worker]\nqueue-capacity = 3\n").unwrap();
        let sub = root.join("sub");
        fs::create_dir_all(sub.join(".config")).unwrap();
        fs::write(sub.join(".config/lintbridge.toml"), "[worker]\nqueue-capacity = 7\n").unwrap();

        let config = Config::discover(&sub).unwrap();
        assert_eq!(config.worker.queue_capacity, 7);
    }

    #[test]
    fn test_stops_at_git_root() {
        let temp = tempdir().unwrap();
        let outer = temp.path();
        fs::write(outer.join(".lintbridge.toml"), "[worker]\nqueue-capacity = 3\n").unwrap();
        let repo = outer.join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert_eq!(find_config_file(&repo), None);
        assert_eq!(Config::discover(&repo).unwrap(), Config::default());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp = tempdir().unwrap();
        let err = Config::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(".lintbridge.toml");
        fs::write(&path, "[worker\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        match err {
            ConfigError::ParseError { path: p, .. } => assert_eq!(p, path.display().to_string()),
            other => panic!("unexpected error: {other}"),
        }
    }
}

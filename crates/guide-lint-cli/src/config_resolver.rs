//! Locates the configuration file.
//!
//! The first match wins:
//!
//! 1. `--config <path>`, trusted as given
//! 2. `guide-lint.toml`, then `.guide-lint.toml`, in the working directory
//! 3. `config.toml` in `$GUIDE_LINT_CONFIG_DIR`, or `~/.guide-lint/` when unset
//! 4. built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: [&str; 2] = ["guide-lint.toml", ".guide-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Overrides the global config directory.
const CONFIG_DIR_ENV: &str = "GUIDE_LINT_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the documents being linted.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

/// Resolves the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    let source = resolve_inner(project_dir, explicit, global_config_dir());
    tracing::debug!("Configuration: {source}");
    source
}

/// Resolution with the global directory passed in, so tests need no env vars.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = first_existing(PROJECT_CONFIG_NAMES.iter().map(|n| project_dir.join(n))) {
        return ConfigSource::Project(found);
    }

    global_dir
        .and_then(|dir| first_existing([dir.join(GLOBAL_CONFIG_NAME)]))
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| p.is_file())
}

/// Returns the global config directory: `$GUIDE_LINT_CONFIG_DIR`, else
/// `~/.guide-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".guide-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "").expect("write config");
        path
    }

    fn tempdir() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn explicit_wins_over_project_and_global() {
        let project = tempdir();
        let global = tempdir();
        touch(project.path(), "guide-lint.toml");
        touch(global.path(), GLOBAL_CONFIG_NAME);
        let explicit = touch(project.path(), "ci.toml");

        let source = resolve_inner(
            project.path(),
            Some(&explicit),
            Some(global.path().to_path_buf()),
        );
        assert_eq!(source, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn explicit_path_is_not_checked_here() {
        let source = resolve_inner(Path::new("."), Some(Path::new("/missing/guide-lint.toml")), None);
        assert_eq!(
            source.path(),
            Some(Path::new("/missing/guide-lint.toml"))
        );
    }

    #[test]
    fn project_names_in_priority_order() {
        let project = tempdir();
        let dotted = touch(project.path(), ".guide-lint.toml");
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(dotted)
        );

        let plain = touch(project.path(), "guide-lint.toml");
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(plain)
        );
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let project = tempdir();
        fs::create_dir(project.path().join("guide-lint.toml")).expect("mkdir");
        assert_eq!(resolve_inner(project.path(), None, None), ConfigSource::Default);
    }

    #[test]
    fn global_is_the_fallback() {
        let project = tempdir();
        let global = tempdir();
        let config = touch(global.path(), GLOBAL_CONFIG_NAME);

        let source = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(source.is_global());
        assert_eq!(source, ConfigSource::Global(config));

        touch(project.path(), "guide-lint.toml");
        let source = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(source, ConfigSource::Project(_)));
    }

    #[test]
    fn defaults_when_nothing_exists() {
        let project = tempdir();
        let empty_global = tempdir();
        assert_eq!(
            resolve_inner(project.path(), None, Some(empty_global.path().to_path_buf())),
            ConfigSource::Default
        );
        assert_eq!(resolve_inner(project.path(), None, None), ConfigSource::Default);
        assert!(ConfigSource::Default.path().is_none());
    }

    #[test]
    fn display_names_the_origin() {
        let p = PathBuf::from("guide-lint.toml");
        assert_eq!(ConfigSource::Project(p.clone()).to_string(), "guide-lint.toml (project)");
        assert_eq!(ConfigSource::Explicit(p).to_string(), "guide-lint.toml (--config)");
        assert_eq!(ConfigSource::Default.to_string(), "built-in defaults");
    }
}

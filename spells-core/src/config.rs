//! Default source configuration
//!
//! Provides discovery and parsing of the `spells.cfg` file that names the
//! spell lists loaded at start-up. The format is line-based `key=value`:
//!
//! ```text
//! dir=/usr/share/spells/csv
//! list=bard.csv;cleric.csv;druid.csv
//! ```
//!
//! Each `list=` entry is joined onto the most recent `dir=` (the working
//! directory until one is given). Unknown lines are ignored.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "spells.cfg";

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "SPELLS_CONFIG";

/// Sources used when no configuration file is found
pub const BUILTIN_DEFAULTS: [&str; 8] = [
    "csv/bard.csv",
    "csv/cleric.csv",
    "csv/druid.csv",
    "csv/paladin.csv",
    "csv/ranger.csv",
    "csv/sorcerer.csv",
    "csv/warlock.csv",
    "csv/wizard.csv",
];

const DIR_KEY: &str = "dir=";
const LIST_KEY: &str = "list=";
const LIST_SEPARATOR: char = ';';

/// Default spell sources, in load order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceConfig {
    pub sources: Vec<PathBuf>,
}

impl SourceConfig {
    /// The built-in source list, relative to the working directory
    pub fn builtin() -> Self {
        Self {
            sources: BUILTIN_DEFAULTS.into_iter().map(PathBuf::from).collect(),
        }
    }

    /// Load a configuration file, resolving relative entries against the
    /// working directory
    pub fn load(path: &Path) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine working directory")?;
        Self::load_with_base(path, &cwd)
    }

    /// Load a configuration file with an explicit base directory
    pub fn load_with_base(path: &Path, base_dir: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::parse(&content, base_dir)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        info!(
            "Loaded {} default sources from {}",
            config.sources.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse configuration text
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self> {
        let mut dir = base_dir.to_path_buf();
        let mut sources = Vec::new();

        for line in content.lines() {
            if let Some(value) = line.strip_prefix(DIR_KEY) {
                dir = base_dir.join(value.trim());
                trace!("Source directory set to {:?}", dir);
            } else if let Some(value) = line.strip_prefix(LIST_KEY) {
                sources.extend(
                    value
                        .split(LIST_SEPARATOR)
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(|name| dir.join(name)),
                );
            }
        }

        if sources.is_empty() {
            bail!("No default sources listed (expected a '{LIST_KEY}' line)");
        }

        Ok(Self { sources })
    }

    /// Find the configuration file to use
    ///
    /// Resolution order:
    /// 1. Explicit path (CLI `--config`), which must exist
    /// 2. `SPELLS_CONFIG` environment variable, which must exist
    /// 3. `spells.cfg` in the working directory
    /// 4. `spells.cfg` in the platform config directory
    /// 5. None (graceful absence)
    pub fn discover(explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
        let from_env = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::discover_from(explicit, from_env, Self::platform_config_path())
    }

    fn discover_from(
        explicit: Option<PathBuf>,
        from_env: Option<PathBuf>,
        platform: Option<PathBuf>,
    ) -> Result<Option<PathBuf>> {
        trace!("Discovering spells configuration");

        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("Config file does not exist: {}", path.display());
            }
            debug!("Using --config override: {}", path.display());
            return Ok(Some(path));
        }

        if let Some(path) = from_env {
            if !path.is_file() {
                bail!(
                    "{CONFIG_ENV_VAR} points to a missing file: {}",
                    path.display()
                );
            }
            debug!("Using {} from environment: {}", CONFIG_ENV_VAR, path.display());
            return Ok(Some(path));
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            debug!("Using config from working directory");
            return Ok(Some(local));
        }

        if let Some(path) = platform.filter(|p| p.is_file()) {
            debug!("Using platform config at {}", path.display());
            return Ok(Some(path));
        }

        debug!("No spells configuration found");
        Ok(None)
    }

    /// `spells.cfg` inside the platform-specific config directory
    ///
    /// On Linux: ~/.config/spells/spells.cfg
    /// On macOS: ~/Library/Application Support/spells/spells.cfg
    pub fn platform_config_path() -> Option<PathBuf> {
        use directories::ProjectDirs;

        ProjectDirs::from("", "", "spells").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_dir_and_list() {
        let config =
            SourceConfig::parse("dir=csv\nlist=bard.csv;cleric.csv\n", Path::new("/srv")).unwrap();
        assert_eq!(
            config.sources,
            vec![
                PathBuf::from("/srv/csv/bard.csv"),
                PathBuf::from("/srv/csv/cleric.csv"),
            ]
        );
    }

    #[test]
    fn test_list_without_dir_uses_base() {
        let config = SourceConfig::parse("list=wizard.csv", Path::new("/home/me")).unwrap();
        assert_eq!(config.sources, vec![PathBuf::from("/home/me/wizard.csv")]);
    }

    #[test]
    fn test_absolute_dir_replaces_base() {
        let config = SourceConfig::parse("dir=/data\nlist=druid.csv", Path::new("/home/me")).unwrap();
        assert_eq!(config.sources, vec![PathBuf::from("/data/druid.csv")]);
    }

    #[test]
    fn test_each_list_uses_latest_dir() {
        let content = "dir=a\nlist=one.csv\ndir=b\nlist=two.csv; three.csv;\n";
        let config = SourceConfig::parse(content, Path::new("/x")).unwrap();
        assert_eq!(
            config.sources,
            vec![
                PathBuf::from("/x/a/one.csv"),
                PathBuf::from("/x/b/two.csv"),
                PathBuf::from("/x/b/three.csv"),
            ]
        );
    }

    #[test]
    fn test_unknown_lines_are_ignored() {
        let content = "# comment\ncolor=never\r\nlist=bard.csv\r\n";
        let config = SourceConfig::parse(content, Path::new("/x")).unwrap();
        assert_eq!(config.sources, vec![PathBuf::from("/x/bard.csv")]);
    }

    #[test]
    fn test_no_list_is_an_error() {
        let err = SourceConfig::parse("dir=csv\n", Path::new("/x")).unwrap_err();
        assert!(err.to_string().contains("No default sources"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = SourceConfig::load(Path::new("/no/such/spells.cfg")).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/spells.cfg"));
    }

    #[test]
    fn test_load_with_base() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "dir=lists\nlist=paladin.csv;ranger.csv\n").unwrap();

        let config = SourceConfig::load_with_base(&path, temp.path()).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0], temp.path().join("lists/paladin.csv"));
    }

    #[test]
    fn test_discover_prefers_explicit_path() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("explicit.cfg");
        let from_env = temp.path().join("env.cfg");
        fs::write(&explicit, "list=a.csv").unwrap();
        fs::write(&from_env, "list=b.csv").unwrap();

        let found =
            SourceConfig::discover_from(Some(explicit.clone()), Some(from_env), None).unwrap();
        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn test_discover_missing_explicit_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.cfg");
        assert!(SourceConfig::discover_from(Some(missing), None, None).is_err());
    }

    #[test]
    fn test_discover_prefers_environment_over_platform() {
        let temp = TempDir::new().unwrap();
        let from_env = temp.path().join("env.cfg");
        let platform = temp.path().join("platform.cfg");
        fs::write(&from_env, "list=b.csv").unwrap();
        fs::write(&platform, "list=c.csv").unwrap();

        let found =
            SourceConfig::discover_from(None, Some(from_env.clone()), Some(platform)).unwrap();
        assert_eq!(found, Some(from_env));
    }

    #[test]
    fn test_builtin_defaults() {
        let config = SourceConfig::builtin();
        assert_eq!(config.sources.len(), 8);
        assert_eq!(config.sources[0], PathBuf::from("csv/bard.csv"));
    }
}

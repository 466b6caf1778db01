//! Configuration file discovery, parsing and saving

use std::fs;
use std::path::{Path, PathBuf};

use super::{AppConfig, ConfigFormat};
use crate::error::{LaretError, Result};

/// Project-local candidates, in priority order
const LOCAL_CANDIDATES: &[&str] = &[".laret.yml", ".laret.yaml", ".laret.toml", ".laret.json"];

/// Home-directory candidates, in priority order
const HOME_CANDIDATES: &[&str] = &[".laret.yml", ".laret.toml", ".laret.json"];

pub struct ConfigLoader {
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl ConfigLoader {
    /// Search the current directory and the user's home directory
    pub fn new() -> Self {
        Self {
            cwd: PathBuf::from("."),
            home: directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
        }
    }

    /// Search explicit roots instead of the process environment
    pub fn with_roots(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
        }
    }

    /// Load the first existing candidate, or defaults when none exists
    ///
    /// `LARET_*` environment overrides are applied in both cases.
    pub fn load(&self, explicit: Option<&Path>) -> Result<AppConfig> {
        let config = match self.source(explicit) {
            Some(path) => self.read(&path)?,
            None => AppConfig::default(),
        };
        Ok(apply_environment_overrides(config, |key| {
            std::env::var(key).ok()
        }))
    }

    /// Load one file; missing files and unknown extensions are errors
    pub fn load_from_file(&self, path: &Path) -> Result<AppConfig> {
        let config = self.read(path)?;
        Ok(apply_environment_overrides(config, |key| {
            std::env::var(key).ok()
        }))
    }

    /// Candidate paths in priority order
    pub fn candidates(&self, explicit: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = explicit.map(Path::to_path_buf).into_iter().collect();
        candidates.extend(LOCAL_CANDIDATES.iter().map(|name| self.cwd.join(name)));
        if let Some(home) = &self.home {
            candidates.extend(HOME_CANDIDATES.iter().map(|name| home.join(name)));
        }
        candidates
    }

    /// The file `load` would read, if any
    pub fn source(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        self.candidates(explicit).into_iter().find(|path| path.is_file())
    }

    fn read(&self, path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Err(LaretError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            LaretError::UnsupportedConfigFormat {
                file: path.display().to_string(),
            }
        })?;

        let contents = fs::read_to_string(path)?;
        let parse_error = |message: String| LaretError::ConfigParse {
            path: path.to_path_buf(),
            message,
        };

        let config: AppConfig = match format {
            ConfigFormat::Yaml => {
                serde_yml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            ConfigFormat::Json => {
                serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
        };

        Ok(config)
    }

    /// Write `config` to `path`, creating parent directories
    pub fn save(&self, config: &AppConfig, path: &Path, format: ConfigFormat) -> Result<()> {
        let save_error = |message: String| LaretError::ConfigSave {
            path: path.to_path_buf(),
            message,
        };

        let contents = match format {
            ConfigFormat::Yaml => serde_yml::to_string(config).map_err(|e| save_error(e.to_string()))?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| save_error(e.to_string()))?
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(config).map_err(|e| save_error(e.to_string()))?
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)?;

        tracing::info!(path = %path.display(), format = %format, "saved config");
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `LARET_*` overrides using `lookup` to read variables
pub fn apply_environment_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("LARET_COLORIZED") {
        config.output.colorized = value.trim().eq_ignore_ascii_case("true");
    }
    if let Some(value) = lookup("LARET_VERBOSE") {
        config.output.verbose = value.trim().eq_ignore_ascii_case("true");
    }
    if let Some(value) = lookup("LARET_OUTPUT_FORMAT") {
        config.output.format = value;
    }
    if let Some(value) = lookup("LARET_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Some(value) = lookup("LARET_LOG_FILE") {
        config.logging.file = value;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn loader_in(cwd: &Path, home: &Path) -> ConfigLoader {
        ConfigLoader::with_roots(cwd, Some(home.to_path_buf()))
    }

    #[test]
    fn test_no_files_yields_defaults() {
        let cwd = tempdir().unwrap();
        let home = tempdir().unwrap();
        let loader = loader_in(cwd.path(), home.path());
        assert!(loader.source(None).is_none());
    }

    #[test]
    fn test_local_yaml_wins_over_home() {
        let cwd = tempdir().unwrap();
        let home = tempdir().unwrap();
        fs::write(cwd.path().join(".laret.yml"), "app:\n  name: local\n").unwrap();
        fs::write(home.path().join(".laret.yml"), "app:\n  name: home\n").unwrap();

        let loader = loader_in(cwd.path(), home.path());
        let path = loader.source(None).unwrap();
        assert_eq!(loader.read(&path).unwrap().app.name, "local");
    }

    #[test]
    fn test_explicit_path_first() {
        let cwd = tempdir().unwrap();
        let home = tempdir().unwrap();
        let explicit = cwd.path().join("custom.json");
        fs::write(&explicit, r#"{"output": {"format": "json"}}"#).unwrap();
        fs::write(cwd.path().join(".laret.yml"), "app:\n  name: local\n").unwrap();

        let loader = loader_in(cwd.path(), home.path());
        assert_eq!(loader.source(Some(&explicit)).unwrap(), explicit);
        let config = loader.read(&explicit).unwrap();
        assert_eq!(config.output.format, "json");
        assert_eq!(config.app.name, "Laret");
    }

    #[test]
    fn test_missing_explicit_falls_through() {
        let cwd = tempdir().unwrap();
        let home = tempdir().unwrap();
        fs::write(home.path().join(".laret.toml"), "[app]\nname = \"home\"\n").unwrap();

        let loader = loader_in(cwd.path(), home.path());
        let path = loader
            .source(Some(Path::new("/definitely/not/here.yml")))
            .unwrap();
        assert_eq!(loader.read(&path).unwrap().app.name, "home");
    }

    #[test]
    fn test_load_from_file_errors() {
        let dir = tempdir().unwrap();
        let loader = loader_in(dir.path(), dir.path());

        let missing = loader.load_from_file(&dir.path().join("nope.yml"));
        assert!(matches!(missing, Err(LaretError::ConfigNotFound { .. })));

        let ini = dir.path().join("config.ini");
        fs::write(&ini, "x=1").unwrap();
        let unsupported = loader.load_from_file(&ini);
        assert!(matches!(unsupported, Err(LaretError::UnsupportedConfigFormat { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        let parse = loader.load_from_file(&broken);
        assert!(matches!(parse, Err(LaretError::ConfigParse { .. })));
    }

    #[test]
    fn test_save_and_reload_each_format() {
        let dir = tempdir().unwrap();
        let loader = loader_in(dir.path(), dir.path());
        let mut config = AppConfig::default();
        config.app.name = "saved".to_string();
        config.plugins.enabled = vec!["LoggingPlugin".to_string()];

        for (file, format) in [
            ("nested/out.yml", ConfigFormat::Yaml),
            ("nested/out.toml", ConfigFormat::Toml),
            ("nested/out.json", ConfigFormat::Json),
        ] {
            let path = dir.path().join(file);
            loader.save(&config, &path, format).unwrap();
            assert_eq!(loader.read(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("LARET_COLORIZED", "FALSE"),
            ("LARET_VERBOSE", "True"),
            ("LARET_OUTPUT_FORMAT", "yaml"),
            ("LARET_LOG_LEVEL", "DEBUG"),
            ("LARET_LOG_FILE", "/tmp/laret.log"),
        ]
        .into_iter()
        .collect();

        let config = apply_environment_overrides(AppConfig::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert!(!config.output.colorized);
        assert!(config.output.verbose);
        assert_eq!(config.output.format, "yaml");
        assert_eq!(config.logging.level, "DEBUG");
        assert_eq!(config.logging.file, "/tmp/laret.log");
    }

    #[test]
    fn test_absent_variables_leave_config_alone() {
        let config = apply_environment_overrides(AppConfig::default(), |_| None);
        assert_eq!(config, AppConfig::default());
    }
}

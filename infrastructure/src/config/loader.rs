//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];
const ENV_PREFIX: &str = "COUNCIL_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `COUNCIL_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./council.toml` or `./.council.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/ai-council/config.toml`
    /// 5. Default values
    ///
    /// Tables merge key-wise across sources; arrays (`[[providers]]`,
    /// `[[council.agents]]`) are replaced by the highest source declaring them.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let project = Self::project_config_path();
        Self::figment(
            Self::global_config_path().as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/ai-council/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ai-council").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(explicit: Option<&PathBuf>) -> String {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] {}* variables", ENV_PREFIX));

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{:5}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./council.toml or ./.council.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.council.agents.len(), 3);
        assert_eq!(config.debate.max_revision_rounds, 2);
    }

    #[test]
    fn test_global_config_path_names_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("ai-council"));
        }
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_toml(
            &dir,
            "council.toml",
            "[debate]\nmax_revision_rounds = 5\ntimeout_seconds = 90\n",
        );
        let explicit = write_toml(&dir, "explicit.toml", "[debate]\nmax_revision_rounds = 1\n");

        let config: FileConfig = ConfigLoader::figment(None, Some(&project), Some(&explicit))
            .extract()
            .unwrap();

        assert_eq!(config.debate.max_revision_rounds, 1);
        // Keys the explicit file does not set survive from lower layers
        assert_eq!(config.debate.timeout_seconds, 90);
        assert_eq!(config.debate.max_tokens, 2048);
    }

    #[test]
    fn test_role_tables_merge_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(
            &dir,
            "council.toml",
            "[roles.economist]\nlabel = \"Economist\"\nsystem_prompt = \"Weigh costs.\"\n",
        );

        let config: FileConfig = ConfigLoader::figment(None, None, Some(&path))
            .extract()
            .unwrap();

        assert!(config.roles.contains_key("economist"));
        assert!(config.roles.contains_key("thinker"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let config: FileConfig = ConfigLoader::figment(Some(&missing), None, Some(&missing))
            .extract()
            .unwrap();
        assert_eq!(config.providers.len(), 5);
    }
}

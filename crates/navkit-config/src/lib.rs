//! Configuration management for navkit.
//!
//! Parses `navkit.toml` with serde, auto-discovers the file in parent
//! directories, and applies CLI overrides via [`CliSettings`] after loading.
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (required) and `${VAR:-default}`.
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.sidebars`
//! - `out.dir`
//! - `fragments[].artifact`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navkit.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional; only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the sidebar definition file.
    pub sidebars: Option<PathBuf>,
    /// Override the build output directory.
    pub out_dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., `docs.source_dir`).
        field: String,
        /// Error message (e.g., `${NAVKIT_DOCS} not set`).
        message: String,
    },
}

/// Where fragment nodes land relative to the insertion category's items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentPosition {
    /// After the existing items (the default).
    #[default]
    Append,
    /// Before the existing items.
    Prepend,
}

/// Raw docs section as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsRaw {
    source_dir: Option<String>,
    sidebars: Option<String>,
}

/// Raw output section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutRaw {
    dir: Option<String>,
}

/// One item in the renderer's top navigation bar.
///
/// Sidebar references are the links validation must protect: a navbar item
/// naming a sidebar key that does not exist is a build failure, not a
/// broken page.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct NavbarItem {
    /// Display label.
    pub label: String,
    /// Sidebar key this item opens.
    #[serde(default)]
    pub sidebar: Option<String>,
    /// External link target.
    #[serde(default)]
    pub href: Option<String>,
}

/// Raw fragment section as parsed from TOML.
#[derive(Debug, Deserialize)]
struct FragmentRaw {
    name: String,
    artifact: String,
    insert_at: String,
    #[serde(default)]
    position: FragmentPosition,
}

/// Resolved fragment configuration with an absolute artifact path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentConfig {
    /// Fragment source name.
    pub name: String,
    /// Path to the generator's JSON artifact.
    pub artifact: PathBuf,
    /// Landing document id of the insertion category.
    pub insert_at: String,
    /// Append or prepend relative to existing items.
    pub position: FragmentPosition,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DocsConfig {
    /// Source directory for content documents.
    pub source_dir: PathBuf,
    /// Sidebar definition file.
    pub sidebars_path: PathBuf,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsRaw,
    /// Output configuration.
    out: OutRaw,
    /// Top navigation bar items.
    pub navbar: Vec<NavbarItem>,
    /// Generated fragment sources.
    fragments: Vec<FragmentRaw>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved output directory (set after loading).
    #[serde(skip)]
    pub out_dir: PathBuf,
    /// Resolved fragment configurations (set after loading).
    #[serde(skip)]
    pub fragments_resolved: Vec<FragmentConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise
    /// searches for `navkit.toml` in the current directory and parents,
    /// falling back to defaults rooted at the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or if
    /// parsing, expansion, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Sidebar keys the navbar references, in declaration order.
    #[must_use]
    pub fn navbar_sidebar_refs(&self) -> Vec<String> {
        self.navbar
            .iter()
            .filter_map(|item| item.sidebar.clone())
            .collect()
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to the working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to a base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsRaw::default(),
            out: OutRaw::default(),
            navbar: Vec::new(),
            fragments: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                sidebars_path: base.join("sidebars.yaml"),
            },
            out_dir: base.join(".navkit"),
            fragments_resolved: Vec::new(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sidebars) = &settings.sidebars {
            self.docs_resolved.sidebars_path.clone_from(sidebars);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.out_dir.clone_from(out_dir);
        }
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref sidebars) = self.docs.sidebars {
            self.docs.sidebars = Some(expand::expand_env(sidebars, "docs.sidebars")?);
        }
        if let Some(ref dir) = self.out.dir {
            self.out.dir = Some(expand::expand_env(dir, "out.dir")?);
        }
        for (i, fragment) in self.fragments.iter_mut().enumerate() {
            fragment.artifact =
                expand::expand_env(&fragment.artifact, &format!("fragments[{i}].artifact"))?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on the config directory.
    ///
    /// A leading `~` expands to the user's home directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |raw: Option<&str>, default: &str| {
            let value = raw.unwrap_or(default);
            config_dir.join(shellexpand::tilde(value).as_ref())
        };

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            sidebars_path: resolve(self.docs.sidebars.as_deref(), "sidebars.yaml"),
        };
        self.out_dir = resolve(self.out.dir.as_deref(), ".navkit");
        self.fragments_resolved = self
            .fragments
            .iter()
            .map(|raw| FragmentConfig {
                name: raw.name.clone(),
                artifact: resolve(Some(&raw.artifact), ""),
                insert_at: raw.insert_at.clone(),
                position: raw.position,
            })
            .collect();
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_navbar()?;
        self.validate_fragments()?;
        Ok(())
    }

    /// Each navbar item is either a sidebar reference or an external link.
    fn validate_navbar(&self) -> Result<(), ConfigError> {
        for item in &self.navbar {
            if item.label.is_empty() {
                return Err(ConfigError::Validation(
                    "navbar item label cannot be empty".to_owned(),
                ));
            }
            match (&item.sidebar, &item.href) {
                (Some(_), Some(_)) => {
                    return Err(ConfigError::Validation(format!(
                        "navbar item {:?} sets both sidebar and href",
                        item.label
                    )));
                }
                (None, None) => {
                    return Err(ConfigError::Validation(format!(
                        "navbar item {:?} needs either sidebar or href",
                        item.label
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Fragment names must be unique, targets and artifact paths non-empty.
    fn validate_fragments(&self) -> Result<(), ConfigError> {
        for (i, fragment) in self.fragments_resolved.iter().enumerate() {
            if fragment.name.is_empty() {
                return Err(ConfigError::Validation(
                    "fragment name cannot be empty".to_owned(),
                ));
            }
            if fragment.insert_at.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "fragment {:?} requires insert_at",
                    fragment.name
                )));
            }
            // Checked on the raw value: an empty path would resolve to the
            // config directory and only fail later as an unreadable file.
            if self.fragments[i].artifact.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "fragment {:?} requires artifact",
                    fragment.name
                )));
            }
            if self.fragments_resolved[..i]
                .iter()
                .any(|seen| seen.name == fragment.name)
            {
                return Err(ConfigError::Validation(format!(
                    "duplicate fragment name {:?}",
                    fragment.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn load_toml(toml: &str, base: &Path) -> Result<Config, ConfigError> {
        let mut config: Config = toml::from_str(toml)?;
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/site/docs"));
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/site/sidebars.yaml")
        );
        assert_eq!(config.out_dir, PathBuf::from("/site/.navkit"));
        assert!(config.navbar.is_empty());
        assert!(config.fragments_resolved.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = load_toml("", Path::new("/site")).unwrap();
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/site/docs"));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "content"
sidebars = "nav/sidebars.yaml"

[out]
dir = "build/nav"
"#;
        let config = load_toml(toml, Path::new("/site")).unwrap();
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/site/content")
        );
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/site/nav/sidebars.yaml")
        );
        assert_eq!(config.out_dir, PathBuf::from("/site/build/nav"));
    }

    #[test]
    fn test_parse_fragments() {
        let toml = r#"
[[fragments]]
name = "api-reference"
artifact = "openapi/api-reference.nav.json"
insert_at = "api/index"

[[fragments]]
name = "admin-api"
artifact = "openapi/admin.nav.json"
insert_at = "admin/index"
position = "prepend"
"#;
        let config = load_toml(toml, Path::new("/site")).unwrap();
        assert_eq!(
            config.fragments_resolved,
            vec![
                FragmentConfig {
                    name: "api-reference".to_owned(),
                    artifact: PathBuf::from("/site/openapi/api-reference.nav.json"),
                    insert_at: "api/index".to_owned(),
                    position: FragmentPosition::Append,
                },
                FragmentConfig {
                    name: "admin-api".to_owned(),
                    artifact: PathBuf::from("/site/openapi/admin.nav.json"),
                    insert_at: "admin/index".to_owned(),
                    position: FragmentPosition::Prepend,
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_fragment_name_rejected() {
        let toml = r#"
[[fragments]]
name = "api-reference"
artifact = "a.json"
insert_at = "api/index"

[[fragments]]
name = "api-reference"
artifact = "b.json"
insert_at = "other/index"
"#;
        let err = load_toml(toml, Path::new("/site")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("api-reference"));
    }

    #[test]
    fn test_navbar_refs() {
        let toml = r#"
[[navbar]]
label = "Guides"
sidebar = "guideSidebar"

[[navbar]]
label = "API Reference"
sidebar = "apiSidebar"

[[navbar]]
label = "GitHub"
href = "https://github.com/example/api"
"#;
        let config = load_toml(toml, Path::new("/site")).unwrap();
        assert_eq!(
            config.navbar_sidebar_refs(),
            vec!["guideSidebar".to_owned(), "apiSidebar".to_owned()]
        );
    }

    #[test]
    fn test_navbar_item_needs_exactly_one_target() {
        let both = r#"
[[navbar]]
label = "Guides"
sidebar = "guideSidebar"
href = "https://example.com"
"#;
        let err = load_toml(both, Path::new("/site")).unwrap_err();
        assert!(err.to_string().contains("both"));

        let neither = r#"
[[navbar]]
label = "Guides"
"#;
        let err = load_toml(neither, Path::new("/site")).unwrap_err();
        assert!(err.to_string().contains("either"));
    }

    #[test]
    fn test_fragment_requires_insert_at() {
        let toml = r#"
[[fragments]]
name = "api-reference"
artifact = "a.json"
insert_at = ""
"#;
        let err = load_toml(toml, Path::new("/site")).unwrap_err();
        assert!(err.to_string().contains("insert_at"));
    }

    #[test]
    fn test_fragment_requires_artifact() {
        let toml = r#"
[[fragments]]
name = "api-reference"
artifact = ""
insert_at = "api/index"
"#;
        let err = load_toml(toml, Path::new("/site")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("artifact"));
    }

    #[test]
    fn test_expand_env_vars_source_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVKIT_TEST_SRC", "generated-docs");
        }

        let toml = r#"
[docs]
source_dir = "${NAVKIT_TEST_SRC}"
"#;
        let config = load_toml(toml, Path::new("/site")).unwrap();
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/site/generated-docs")
        );

        unsafe {
            std::env::remove_var("NAVKIT_TEST_SRC");
        }
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/docs")),
            sidebars: None,
            out_dir: Some(PathBuf::from("/tmp/nav-out")),
        };

        config.apply_cli_settings(&settings);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/elsewhere/docs")
        );
        // Unchanged
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/site/sidebars.yaml")
        );
        assert_eq!(config.out_dir, PathBuf::from("/tmp/nav-out"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/navkit.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navkit.toml");
        std::fs::write(
            &path,
            r#"
[docs]
source_dir = "content"

[[navbar]]
label = "Guides"
sidebar = "guideSidebar"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content"));
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.navbar.len(), 1);
    }
}

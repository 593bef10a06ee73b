//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config FILE`, else `$XDG_CONFIG_HOME/treesketch/treesketch.toml`
//! 3. Environment variables: `TREESKETCH_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{Label, StyleName};

/// Unified configuration for treesketch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Glyph style name (unknown names fall back to the default style)
    pub style: String,
    /// Label of the root node of a new tree
    pub root_label: String,
    /// Move the selection onto newly inserted nodes
    pub follow_insert: bool,
    /// Highlight the selected node in the interactive shell
    pub highlight_selection: bool,
    /// Show node ids next to labels in the interactive shell
    pub show_ids: bool,
    /// Label applied when a rename is empty; unset refuses empty renames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename_placeholder: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: StyleName::default().to_string(),
            root_label: "root".into(),
            follow_insert: false,
            highlight_selection: true,
            show_ids: true,
            rename_placeholder: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub style: Option<String>,
    pub root_label: Option<String>,
    pub follow_insert: Option<bool>,
    pub highlight_selection: Option<bool>,
    pub show_ids: Option<bool>,
    pub rename_placeholder: Option<String>,
}

/// Get the XDG config directory for treesketch.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treesketch").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treesketch.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            style: overlay.style.clone().unwrap_or_else(|| self.style.clone()),
            root_label: overlay
                .root_label
                .clone()
                .unwrap_or_else(|| self.root_label.clone()),
            follow_insert: overlay.follow_insert.unwrap_or(self.follow_insert),
            highlight_selection: overlay
                .highlight_selection
                .unwrap_or(self.highlight_selection),
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
            rename_placeholder: overlay
                .rename_placeholder
                .clone()
                .or_else(|| self.rename_placeholder.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_file` must exist; the global file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        let file = match config_file {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|p| p.exists()),
        };
        if let Some(path) = file {
            debug!("loading config from {}", path.display());
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        Ok(current)
    }

    /// Apply TREESKETCH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("TREESKETCH")
                .prefix_separator("_")
                .separator("__"),
        );
        let config = builder.build().map_err(config_err)?;

        if let Some(val) = env_value("style", config.get_string("style"))? {
            settings.style = val;
        }
        if let Some(val) = env_value("root_label", config.get_string("root_label"))? {
            settings.root_label = val;
        }
        if let Some(val) = env_value("follow_insert", config.get_bool("follow_insert"))? {
            settings.follow_insert = val;
        }
        if let Some(val) = env_value(
            "highlight_selection",
            config.get_bool("highlight_selection"),
        )? {
            settings.highlight_selection = val;
        }
        if let Some(val) = env_value("show_ids", config.get_bool("show_ids"))? {
            settings.show_ids = val;
        }
        if let Some(val) = env_value(
            "rename_placeholder",
            config.get_string("rename_placeholder"),
        )? {
            settings.rename_placeholder = Some(val);
        }

        Ok(settings)
    }

    /// Resolved glyph style.
    pub fn style_name(&self) -> StyleName {
        StyleName::lookup(&self.style)
    }

    /// Root label, refused as a config error when empty.
    pub fn root_label(&self) -> Result<Label, ApplicationError> {
        Label::new(&self.root_label).map_err(|e| ApplicationError::Config {
            message: format!("root_label: {e}"),
        })
    }

    /// Placeholder for empty renames; a blank value counts as unset.
    pub fn rename_placeholder(&self) -> Result<Option<Label>, ApplicationError> {
        match self.rename_placeholder.as_deref() {
            Some(text) if !text.trim().is_empty() => Label::new(text)
                .map(Some)
                .map_err(|e| ApplicationError::Config {
                    message: format!("rename_placeholder: {e}"),
                }),
            _ => Ok(None),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treesketch configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/treesketch/treesketch.toml (or --config FILE)
#   Env:  TREESKETCH_* environment variables, e.g. TREESKETCH_STYLE=double
#   CLI:  --style, --root

# Glyph style: thin, thick, double, ascii
# style = "thick"

# Label of the root node of a new tree
# root_label = "root"

# Move the selection onto newly inserted nodes
# follow_insert = false

# Highlight the selected node in the interactive shell
# highlight_selection = true

# Show node ids next to labels in the interactive shell
# show_ids = true

# Label to use when a rename is empty (unset: empty renames are refused)
# rename_placeholder = "unnamed node"
"#
        .to_string()
    }
}

/// An unset variable is `None`; a value of the wrong type is a config error.
fn env_value<T>(
    key: &str,
    value: Result<T, ConfigError>,
) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("TREESKETCH_{}: {}", key.to_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_resolving_then_thick_root_and_no_placeholder() {
        let settings = Settings::default();
        assert_eq!(settings.style_name(), StyleName::Thick);
        assert_eq!(settings.root_label().unwrap().as_str(), "root");
        assert_eq!(settings.rename_placeholder().unwrap(), None);
    }

    #[test]
    fn given_overlay_when_merging_then_specified_fields_win() {
        let base = Settings::default();
        let overlay = RawSettings {
            style: Some("double".into()),
            follow_insert: Some(true),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.style, "double");
        assert!(merged.follow_insert);
        assert_eq!(merged.root_label, "root");
        assert!(merged.show_ids);
    }

    #[test]
    fn given_blank_root_label_when_resolving_then_config_error() {
        let settings = Settings {
            root_label: "   ".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.root_label(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_blank_placeholder_when_resolving_then_unset() {
        let settings = Settings {
            rename_placeholder: Some("  ".into()),
            ..Settings::default()
        };
        assert_eq!(settings.rename_placeholder().unwrap(), None);
    }

    #[test]
    fn given_wrong_type_when_reading_env_value_then_config_error_names_variable() {
        let err = env_value::<bool>(
            "follow_insert",
            Err(ConfigError::Message("invalid type".into())),
        )
        .unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
        assert!(err.to_string().contains("TREESKETCH_FOLLOW_INSERT"));

        let unset = env_value::<bool>(
            "show_ids",
            Err(ConfigError::NotFound("show_ids".into())),
        );
        assert_eq!(unset.unwrap(), None);
    }

    #[test]
    fn given_template_when_parsing_then_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.style.is_none());
    }
}

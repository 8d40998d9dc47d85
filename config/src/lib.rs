//! Configuration for collapsible registries.
//!
//! ```toml
//! [scan]
//! container = ".form-block"
//! trigger = ".form-block-header"
//!
//! [behavior]
//! default_open = "bloco-institucional"
//! exclusive = false
//!
//! [scroll]
//! navigation_delay_ms = 100
//! trigger_delay_ms = 300
//! ```
//!
//! Every section is optional; anything omitted falls back to the defaults of
//! [`ScanRules`] and [`RegistryOptions`].

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use collapsible_markup::ScanRules;
use collapsible_types::{
    BlockId, ClassNames, DefaultOpen, RegistryOptions, ScrollBehavior, ScrollDelays,
};

/// Overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "COLLAPSIBLE_CONFIG";

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollapsibleConfig {
    pub scan: Option<ScanConfig>,
    pub behavior: Option<BehaviorConfig>,
    pub scroll: Option<ScrollConfig>,
    pub classes: Option<ClassesConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Where blocks and links live in the markup.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    pub scope: Option<String>,
    pub container: Option<String>,
    pub trigger: Option<String>,
    pub indicator_slot: Option<String>,
    pub navigation: Option<Vec<String>>,
    pub target_attr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Omit to start with every block closed.
    pub default_open: Option<BlockId>,
    /// Opening one block closes the others.
    #[serde(default)]
    pub exclusive: bool,
}

/// Scroll-into-view timing.
///
/// ```toml
/// [scroll]
/// navigation_delay_ms = 100
/// trigger_delay_ms = 300
/// smooth = true
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollConfig {
    pub navigation_delay_ms: Option<u64>,
    pub trigger_delay_ms: Option<u64>,
    #[serde(default = "default_true")]
    pub smooth: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navigation_delay_ms: None,
            trigger_delay_ms: None,
            smooth: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassesConfig {
    pub block: Option<String>,
    pub open: Option<String>,
    pub closed: Option<String>,
    pub indicator: Option<String>,
    pub open_glyph: Option<String>,
    pub closed_glyph: Option<String>,
}

impl CollapsibleConfig {
    /// Loads the file at [`config_path`]. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Config loaded");
                Ok(config)
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn scan_rules(&self) -> ScanRules {
        let mut rules = ScanRules::default();
        let Some(scan) = &self.scan else {
            return rules;
        };

        if let Some(scope) = &scan.scope {
            rules.scope = Some(scope.clone());
        }
        if let Some(container) = &scan.container {
            rules.container = container.clone();
        }
        if let Some(trigger) = &scan.trigger {
            rules.trigger = trigger.clone();
        }
        if let Some(slot) = &scan.indicator_slot {
            rules.indicator_slot = slot.clone();
        }
        if let Some(navigation) = &scan.navigation {
            rules.navigation = navigation.clone();
        }
        if let Some(attr) = &scan.target_attr {
            rules.target_attr = attr.clone();
        }
        rules
    }

    #[must_use]
    pub fn registry_options(&self) -> RegistryOptions {
        let behavior = self.behavior.as_ref();
        let scroll = self.scroll.as_ref();

        let default_open = behavior
            .and_then(|b| b.default_open.clone())
            .map_or(DefaultOpen::None, DefaultOpen::Block);

        let mut delays = ScrollDelays::default();
        if let Some(ms) = scroll.and_then(|s| s.navigation_delay_ms) {
            delays.navigation = Duration::from_millis(ms);
        }
        if let Some(ms) = scroll.and_then(|s| s.trigger_delay_ms) {
            delays.trigger = Duration::from_millis(ms);
        }

        let behavior_kind = if scroll.is_none_or(|s| s.smooth) {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };

        RegistryOptions {
            default_open,
            exclusive: behavior.is_some_and(|b| b.exclusive),
            delays,
            behavior: behavior_kind,
            classes: self.class_names(),
        }
    }

    fn class_names(&self) -> ClassNames {
        let mut names = ClassNames::default();
        let Some(classes) = &self.classes else {
            return names;
        };

        let overrides = [
            (&mut names.block, &classes.block),
            (&mut names.open, &classes.open),
            (&mut names.closed, &classes.closed),
            (&mut names.indicator, &classes.indicator),
            (&mut names.open_glyph, &classes.open_glyph),
            (&mut names.closed_glyph, &classes.closed_glyph),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
        names
    }
}

/// `$COLLAPSIBLE_CONFIG` if set, else `~/.collapsible/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(raw) = env::var(CONFIG_ENV_VAR)
        && !raw.trim().is_empty()
    {
        return Some(PathBuf::from(raw));
    }
    dirs::home_dir().map(|home| home.join(".collapsible").join("config.toml"))
}

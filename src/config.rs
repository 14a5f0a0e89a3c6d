//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! reproduce the reference behavior (500ms exit animation, 60 dust particles);
//! a user file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [transition]
//! exit_ms = 500             # Exit animation length before a sub-view swap
//!
//! [particles]
//! count = 60                # Dust particles on the home view
//! size_max = 1.5            # Radius drawn from [0, size_max)
//! speed_min = 0.05          # Upward drift per frame, lower bound
//! speed_max = 0.25          # Upward drift per frame, upper bound
//! opacity_min = 0.1
//! opacity_max = 0.6
//! # seed = 7                # Fixed RNG seed for reproducible runs
//!
//! [viewport]
//! width = 1280              # Initial host viewport
//! height = 800
//! frame_interval_ms = 16    # Frame boundary spacing of the simulated host
//!
//! [colors]
//! background = "#09090b"
//! text = "#e4e4e7"
//! text_muted = "#71717a"
//! accent = "#a855f7"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Sub-view transition timing.
    pub transition: TransitionConfig,
    /// Home view dust particles.
    pub particles: ParticleConfig,
    /// Simulated host viewport and frame pacing.
    pub viewport: ViewportConfig,
    /// Palette exported as CSS custom properties.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition.exit_ms == 0 {
            return Err(ConfigError::Validation(
                "transition.exit_ms must be greater than 0".into(),
            ));
        }
        let p = &self.particles;
        if p.count == 0 {
            return Err(ConfigError::Validation(
                "particles.count must be greater than 0".into(),
            ));
        }
        if !(p.size_max > 0.0) {
            return Err(ConfigError::Validation(
                "particles.size_max must be positive".into(),
            ));
        }
        if !(p.speed_min > 0.0 && p.speed_min < p.speed_max) {
            return Err(ConfigError::Validation(
                "particles.speed_min must be positive and below speed_max".into(),
            ));
        }
        if !(p.opacity_min >= 0.0 && p.opacity_min < p.opacity_max && p.opacity_max <= 1.0) {
            return Err(ConfigError::Validation(
                "particles opacity range must satisfy 0 <= opacity_min < opacity_max <= 1".into(),
            ));
        }
        let v = &self.viewport;
        if v.width == 0 || v.height == 0 {
            return Err(ConfigError::Validation(
                "viewport.width and viewport.height must be non-zero".into(),
            ));
        }
        if v.frame_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "viewport.frame_interval_ms must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Sub-view transition timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Exit animation duration in milliseconds. The pending update is applied
    /// when it elapses; the CSS exit animation uses the same value.
    pub exit_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self { exit_ms: 500 }
    }
}

/// Dust particle field settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    pub count: usize,
    pub size_max: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    /// Fixed RNG seed. When absent, the field is seeded from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 60,
            size_max: 1.5,
            speed_min: 0.05,
            speed_max: 0.25,
            opacity_min: 0.1,
            opacity_max: 0.6,
            seed: None,
        }
    }
}

/// Simulated host viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub frame_interval_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            frame_interval_ms: 16,
        }
    }
}

/// Site palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Secondary text: dates, read times, menu entries at rest.
    pub text_muted: String,
    /// Holographic accent used by hover glows.
    pub accent: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#09090b".to_string(),
            text: "#e4e4e7".to_string(),
            text_muted: "#71717a".to_string(),
            accent: "#a855f7".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file is not an error: the stock defaults are returned. A file
/// that exists but fails to parse or validate is.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(overlay))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Traveritas Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Sub-view transitions (journal category / post navigation)
# ---------------------------------------------------------------------------
[transition]
# Milliseconds the exit animation runs before the new sub-view is swapped in.
exit_ms = 500

# ---------------------------------------------------------------------------
# Cosmic dust on the home view
# ---------------------------------------------------------------------------
[particles]
count = 60
# Radius is drawn from [0, size_max).
size_max = 1.5
# Upward drift per frame is drawn from [speed_min, speed_max).
speed_min = 0.05
speed_max = 0.25
opacity_min = 0.1
opacity_max = 0.6
# Fix the RNG seed for reproducible sessions and snapshots.
# seed = 7

# ---------------------------------------------------------------------------
# Simulated host
# ---------------------------------------------------------------------------
[viewport]
width = 1280
height = 800
# Spacing of frame boundaries; frame callbacks run on these.
frame_interval_ms = 16

# ---------------------------------------------------------------------------
# Palette
# ---------------------------------------------------------------------------
[colors]
background = "#09090b"
text = "#e4e4e7"
text_muted = "#71717a"   # Dates, read times, idle menu entries
accent = "#a855f7"       # Hover glows
"##
}

/// Generate CSS custom properties from config.
///
/// `--transition-duration` keeps the CSS exit animation in step with the
/// controller's timer.
pub fn generate_theme_css(config: &SiteConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --transition-duration: {exit_ms}ms;
}}"#,
        background = config.colors.background,
        text = config.colors.text,
        text_muted = config.colors.text_muted,
        accent = config.colors.accent,
        exit_ms = config.transition.exit_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_reference_behavior() {
        let config = SiteConfig::default();
        assert_eq!(config.transition.exit_ms, 500);
        assert_eq!(config.particles.count, 60);
        assert_eq!(config.particles.size_max, 1.5);
        assert_eq!(config.particles.speed_min, 0.05);
        assert_eq!(config.particles.speed_max, 0.25);
        assert_eq!(config.particles.opacity_min, 0.1);
        assert_eq!(config.particles.opacity_max, 0.6);
        assert!(config.particles.seed.is_none());
        assert_eq!(config.viewport.frame_interval_ms, 16);
    }

    #[test]
    fn default_config_validates() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[particles]
count = 12
seed = 3
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.seed, Some(3));
        // Defaults preserved
        assert_eq!(config.particles.speed_max, 0.25);
        assert_eq!(config.transition.exit_ms, 500);
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r#"
[transition]
exit_millis = 300
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn merge_toml_overlays_nested_keys() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n[b]\nz = 4\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
        assert_eq!(merged["b"]["z"].as_integer(), Some(4));
    }

    #[test]
    fn validate_rejects_zero_exit_duration() {
        let mut config = SiteConfig::default();
        config.transition.exit_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_particles() {
        let mut config = SiteConfig::default();
        config.particles.count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_speed_range() {
        let mut config = SiteConfig::default();
        config.particles.speed_min = 0.3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_opacity_above_one() {
        let mut config = SiteConfig::default();
        config.particles.opacity_max = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_viewport() {
        let mut config = SiteConfig::default();
        config.viewport.height = 0;
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.transition.exit_ms, 500);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"
[transition]
exit_ms = 250

[colors]
accent = "#22d3ee"
"##,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.transition.exit_ms, 250);
        assert_eq!(config.colors.accent, "#22d3ee");
        assert_eq!(config.colors.background, "#09090b");
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[particles]\ncount = 0\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_rejects_malformed_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[transition\nexit_ms = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.transition.exit_ms, defaults.transition.exit_ms);
        assert_eq!(config.particles.count, defaults.particles.count);
        assert_eq!(config.viewport.width, defaults.viewport.width);
        assert_eq!(config.colors.accent, defaults.colors.accent);
    }

    #[test]
    fn theme_css_carries_transition_duration() {
        let mut config = SiteConfig::default();
        config.transition.exit_ms = 320;
        config.colors.background = "#000000".to_string();
        let css = generate_theme_css(&config);
        assert!(css.contains("--transition-duration: 320ms"));
        assert!(css.contains("--color-bg: #000000"));
    }
}

#![forbid(unsafe_code)]

//! Page configuration as data.
//!
//! Each page used to carry its own copy of the scroll wiring with slightly
//! different selectors and factor arrays. [`EngineConfig`] captures those
//! differences so one engine serves every page.
//!
//! # Loading
//!
//! ```toml
//! page = "about"
//! sticky_offset_px = 64.0
//!
//! [responsive]
//! min_width = 850.0
//! max_width = 1920.0
//!
//! [[drift]]
//! selector = ".s-a-a-1"
//! children = ".s-a-a-1-right, .s-a-a-1-left-wrapper"
//! factors = [0.15, 0.35]
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("scrollfx.toml")?;
//! let config = EngineConfig::from_json_str(json)?;
//! let config = EngineConfig::preset("home")?;
//! ```
//!
//! # Defaults
//!
//! `EngineConfig::default()` is the home page.

use std::path::Path;

use serde::{Deserialize, Serialize};

use scrollfx_core::chrome::{HOME_STICKY_OFFSET_PX, LEGAL_STICKY_OFFSET_PX};
use scrollfx_core::drift::{ABOUT_DRIFT_FACTORS, ANCHOR_DRIFT_FACTOR, HOME_DRIFT_FACTORS};
use scrollfx_core::grow::GrowConfig;
use scrollfx_core::parallax::DEFAULT_PARALLAX_SCALE;
use scrollfx_core::responsive::ResponsiveRange;
use scrollfx_core::reveal::{REVEAL_BOTTOM_MARGIN, REVEAL_THRESHOLD, STAGGER_STEP};
use scrollfx_core::units::lenient;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Top-level EngineConfig
// ---------------------------------------------------------------------------

/// Page-level configuration for a [`ScrollEngine`](crate::ScrollEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Page name, for logs.
    pub page: String,
    /// Width range for the responsive damping factor.
    pub responsive: ResponsiveRange,
    /// Selectors the host queries to find tracked elements.
    pub selectors: SelectorConfig,
    /// Parallax scale for elements without their own.
    pub default_parallax_scale: f64,
    /// Drift groups, in host measurement order.
    pub drift: Vec<DriftGroupConfig>,
    /// Reveal-on-scroll parameters.
    pub reveal: RevealConfig,
    /// Sticky header height subtracted from anchor scroll targets.
    pub sticky_offset_px: f64,
    /// Disable motion: transforms stay static and everything reveals at once.
    pub reduced_motion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::home()
    }
}

/// Selectors for each element family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub parallax: Vec<String>,
    pub grow: String,
    pub speed: String,
    pub reveal_text: String,
    pub reveal_image: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            parallax: vec![
                ".section-3-element-holder".into(),
                ".section-7-holder".into(),
                ".section-10-img-holder".into(),
                ".blog-element-holder".into(),
                ".section-argo-1-right-holder".into(),
                ".section-argo-2-img".into(),
            ],
            grow: ".grow-section".into(),
            speed: "[data-lenis-speed]".into(),
            reveal_text: ".reveal-text".into(),
            reveal_image: ".reveal-image".into(),
        }
    }
}

/// A group of children drifting with per-child factors.
///
/// The anchor is measured; the children are moved. A single drifting
/// element is its own anchor and its own only child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftGroupConfig {
    /// Selector of the anchor section.
    pub selector: String,
    /// Selector of the children that move, in factor order.
    pub children: String,
    /// One factor per child, in order.
    pub factors: Vec<f64>,
    /// Only update while the anchor is near the viewport.
    pub gated: bool,
}

impl Default for DriftGroupConfig {
    fn default() -> Self {
        Self {
            selector: String::new(),
            children: String::new(),
            factors: Vec::new(),
            gated: true,
        }
    }
}

/// Reveal-on-scroll parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction required to reveal.
    pub threshold: f64,
    /// Fraction of viewport height trimmed from the bottom of the root.
    pub bottom_margin: f64,
    /// Delay between consecutive text siblings.
    pub stagger_step_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            bottom_margin: REVEAL_BOTTOM_MARGIN,
            stagger_step_ms: STAGGER_STEP.as_millis() as u64,
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

impl EngineConfig {
    /// Home page: five-image pre-footer group plus a counter-drifting image.
    #[must_use]
    pub fn home() -> Self {
        Self {
            page: "home".into(),
            responsive: ResponsiveRange::default(),
            selectors: SelectorConfig::default(),
            default_parallax_scale: DEFAULT_PARALLAX_SCALE,
            drift: vec![
                DriftGroupConfig {
                    selector: ".section-argo-2-img".into(),
                    children: ".section-argo-2-img".into(),
                    factors: vec![ANCHOR_DRIFT_FACTOR],
                    gated: false,
                },
                DriftGroupConfig {
                    selector: ".pre-footer".into(),
                    children: ".image-group div".into(),
                    factors: HOME_DRIFT_FACTORS.to_vec(),
                    gated: true,
                },
            ],
            reveal: RevealConfig::default(),
            sticky_offset_px: HOME_STICKY_OFFSET_PX,
            reduced_motion: false,
        }
    }

    /// About page: two parallax families, no grow sections, and a
    /// two-column drift group in the first section.
    #[must_use]
    pub fn about() -> Self {
        Self {
            page: "about".into(),
            selectors: SelectorConfig {
                parallax: vec![".s-a-a-7-holder".into(), ".s-a-a-6-bottom-left".into()],
                grow: String::new(),
                ..SelectorConfig::default()
            },
            drift: vec![DriftGroupConfig {
                selector: ".s-a-a-1".into(),
                children: ".s-a-a-1-right, .s-a-a-1-left-wrapper".into(),
                factors: ABOUT_DRIFT_FACTORS.to_vec(),
                gated: true,
            }],
            ..Self::home()
        }
    }

    /// Legal pages: smooth anchors only, no scroll-coupled motion.
    #[must_use]
    pub fn legal() -> Self {
        Self {
            page: "legal".into(),
            selectors: SelectorConfig {
                parallax: Vec::new(),
                grow: String::new(),
                speed: String::new(),
                reveal_text: String::new(),
                reveal_image: String::new(),
            },
            drift: Vec::new(),
            sticky_offset_px: LEGAL_STICKY_OFFSET_PX,
            ..Self::home()
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "home" | "index" => Ok(Self::home()),
            "about" => Ok(Self::about()),
            "legal" | "privacy" => Ok(Self::legal()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl EngineConfig {
    /// Load and validate from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load and validate from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load and validate from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            tracing::info!(page = %self.page, drift_groups = self.drift.len(), "config loaded");
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Check every field and return one message per problem.
    ///
    /// An empty list means the configuration is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let r = &self.responsive;
        if !(r.min_width.is_finite() && r.max_width.is_finite()) {
            errors.push("responsive widths must be finite".into());
        } else if r.min_width >= r.max_width {
            errors.push(format!(
                "responsive.min_width ({}) must be < max_width ({})",
                r.min_width, r.max_width
            ));
        }

        if !(self.default_parallax_scale.is_finite() && self.default_parallax_scale > 0.0) {
            errors.push(format!(
                "default_parallax_scale must be > 0, got {}",
                self.default_parallax_scale
            ));
        }

        for (i, group) in self.drift.iter().enumerate() {
            if group.factors.iter().any(|f| !f.is_finite()) {
                errors.push(format!("drift[{i}].factors must be finite"));
            }
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            errors.push(format!(
                "reveal.threshold must be in [0, 1], got {}",
                self.reveal.threshold
            ));
        }
        if !(0.0..1.0).contains(&self.reveal.bottom_margin) {
            errors.push(format!(
                "reveal.bottom_margin must be in [0, 1), got {}",
                self.reveal.bottom_margin
            ));
        }

        if !(self.sticky_offset_px.is_finite() && self.sticky_offset_px >= 0.0) {
            errors.push(format!(
                "sticky_offset_px must be >= 0, got {}",
                self.sticky_offset_px
            ));
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// Per-element attributes
// ---------------------------------------------------------------------------

/// Declarative attributes the host read from each tracked element.
///
/// Element counts are fixed here; later measurements must match them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSet {
    /// One entry per parallax element.
    pub parallax: Vec<ParallaxAttrs>,
    /// One entry per grow section.
    pub grow: Vec<GrowConfig>,
    /// One entry per speed element.
    pub speed: Vec<SpeedAttrs>,
    /// Child count per drift group, in config order.
    pub drift_children: Vec<usize>,
    /// One entry per reveal target, text targets first in document order.
    pub reveal: Vec<RevealAttrs>,
}

/// Parallax element attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxAttrs {
    /// Image scale; falls back to the page default when missing or malformed.
    #[serde(deserialize_with = "lenient::number")]
    pub scale: Option<f64>,
}

/// Speed element attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedAttrs {
    /// Speed; `0` when missing or malformed.
    #[serde(deserialize_with = "lenient::number")]
    pub speed: Option<f64>,
}

/// Reveal target attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealAttrs {
    /// Host-assigned identifier of the parent element.
    pub parent: u32,
    /// Text targets stagger with their siblings; image targets do not.
    pub text: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_home_and_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.page, "home");
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        assert_eq!(config.drift.len(), 2);
        assert_eq!(config.drift[1].factors, vec![0.22, 0.15, 0.08, 0.15, 0.22]);
        assert!(!config.drift[0].gated);
    }

    #[test]
    fn presets_are_valid() {
        for name in ["home", "about", "legal", "index", "privacy"] {
            let config = EngineConfig::preset(name).unwrap();
            assert!(config.validate().is_empty(), "{name}");
        }
        assert_eq!(EngineConfig::about().drift[0].factors, vec![0.15, 0.35]);
        assert_eq!(EngineConfig::legal().sticky_offset_px, 56.0);

        for name in ["home", "about"] {
            for group in EngineConfig::preset(name).unwrap().drift {
                assert!(!group.selector.is_empty(), "{name}");
                assert!(!group.children.is_empty(), "{name}");
            }
        }
        let home = EngineConfig::home();
        assert_eq!(home.drift[0].children, home.drift[0].selector);
        assert_eq!(home.drift[1].selector, ".pre-footer");
        assert_eq!(home.drift[1].children, ".image-group div");
        assert!(matches!(
            EngineConfig::preset("landing"),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn about_preset_has_its_own_selectors() {
        let about = EngineConfig::about();
        assert_eq!(
            about.selectors.parallax,
            vec![".s-a-a-7-holder".to_string(), ".s-a-a-6-bottom-left".to_string()]
        );
        assert_eq!(about.selectors.grow, "");
        assert_eq!(about.selectors.speed, "[data-lenis-speed]");
        assert_eq!(about.selectors.reveal_text, ".reveal-text");
        assert_eq!(about.drift.len(), 1);
        assert_eq!(about.drift[0].selector, ".s-a-a-1");
        assert_eq!(about.drift[0].children, ".s-a-a-1-right, .s-a-a-1-left-wrapper");
        assert_ne!(about.selectors, EngineConfig::home().selectors);
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            page = "campaign"
            sticky_offset_px = 72.0

            [responsive]
            min_width = 600.0

            [[drift]]
            selector = ".strip"
            children = ".strip img"
            factors = [0.1, 0.2]
            "#,
        )
        .unwrap();
        assert_eq!(config.page, "campaign");
        assert_eq!(config.sticky_offset_px, 72.0);
        assert_eq!(config.responsive.min_width, 600.0);
        assert_eq!(config.responsive.max_width, 1920.0);
        assert_eq!(config.drift.len(), 1);
        assert_eq!(config.drift[0].children, ".strip img");
        assert!(config.drift[0].gated);
        assert_eq!(config.reveal, RevealConfig::default());
    }

    #[test]
    fn json_round_trip() {
        let config = EngineConfig::about();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn validation_collects_every_problem() {
        let config = EngineConfig {
            responsive: ResponsiveRange {
                min_width: 2000.0,
                max_width: 1000.0,
            },
            default_parallax_scale: 0.0,
            reveal: RevealConfig {
                threshold: 1.5,
                bottom_margin: 1.0,
                stagger_step_ms: 70,
            },
            sticky_offset_px: -1.0,
            ..EngineConfig::home()
        };
        assert_eq!(config.validate().len(), 5);

        let err = EngineConfig::from_json_str(r#"{"reveal": {"threshold": 2.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("page = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            EngineConfig::from_toml_file("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn element_attributes_are_lenient() {
        let set: ElementSet = serde_json::from_str(
            r#"{
                "parallax": [{"scale": "1.35"}, {"scale": "huge"}, {}],
                "speed": [{"speed": "2"}, {"speed": null}],
                "grow": [{"grow_distance": "100vh", "hold_distance": "bogus"}],
                "drift_children": [1, 5],
                "reveal": [{"parent": 1, "text": true}]
            }"#,
        )
        .unwrap();
        assert_eq!(set.parallax[0].scale, Some(1.35));
        assert_eq!(set.parallax[1].scale, None);
        assert_eq!(set.parallax[2].scale, None);
        assert_eq!(set.speed[0].speed, Some(2.0));
        assert_eq!(set.speed[1].speed, None);
        assert_eq!(set.grow[0].hold_distance, None);
        assert_eq!(set.drift_children, vec![1, 5]);
    }
}

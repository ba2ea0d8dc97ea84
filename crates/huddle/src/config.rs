//! Configuration types for room layouts.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! TOML. Every field has a default, so partial files are accepted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout, style and an optional preset.
//! - [`LayoutConfig`] - Tuning of the force simulation.
//! - [`ChromeInsets`] - Space reserved for fixed header and control-bar UI.
//! - [`Preset`] - Canned [`LayoutConfig`] bundles.
//! - [`StyleConfig`] - Colors used when rendering snapshots.
//!
//! # Example
//!
//! ```
//! # use huddle::config::{AppConfig, Preset};
//! let config: AppConfig = toml::from_str(r#"
//!     preset = "compact"
//!
//!     [style]
//!     background_color = "midnightblue"
//! "#).unwrap();
//!
//! assert_eq!(config.preset(), Some(Preset::Compact));
//! assert_eq!(config.effective_layout(), Preset::Compact.config());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use huddle_core::{color::Color, geometry::Insets};

use crate::HuddleError;

/// Hard limit on each velocity component, in pixels per tick.
pub const MAX_VELOCITY: f32 = 10.0;

/// Distance from every viewport edge that bodies are kept away from.
pub const BOUNDARY_MARGIN: f32 = 80.0;

/// Coefficient of the linear force pushing bodies back inside the bounds.
pub const BOUNDARY_STIFFNESS: f32 = 0.1;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout tuning section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Snapshot style section.
    #[serde(default)]
    style: StyleConfig,

    /// Optional preset overriding the layout section.
    #[serde(default)]
    preset: Option<Preset>,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given layout and style.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            style,
            preset: None,
        }
    }

    /// Returns the layout section as written.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the configured preset, if any.
    pub fn preset(&self) -> Option<Preset> {
        self.preset
    }

    /// Replaces the configured preset.
    pub fn with_preset(mut self, preset: Option<Preset>) -> Self {
        self.preset = preset;
        self
    }

    /// Returns the layout the engine should run with.
    ///
    /// A preset, when set, wins over the `[layout]` section.
    pub fn effective_layout(&self) -> LayoutConfig {
        self.preset
            .map(Preset::config)
            .unwrap_or(self.layout)
    }
}

/// Tuning of the force simulation.
///
/// The defaults reproduce the stock voice-room feel. Use [`Preset`] for
/// other canned settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fraction of the vector to the viewport center added to velocity each tick.
    center_gravity: f32,

    /// Numerator of the inverse-square repulsion between nearby participants.
    repulsion_strength: f32,

    /// Baseline separation target between participant centers, in pixels.
    min_distance: f32,

    /// Velocity multiplier applied every tick. Must be in `(0, 1)`.
    damping: f32,

    /// Extra separation when either participant of a pair is speaking.
    speaking_bonus: f32,

    /// Chrome reserved on top of [`BOUNDARY_MARGIN`].
    chrome: ChromeInsets,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_gravity: 0.02,
            repulsion_strength: 2000.0,
            min_distance: 120.0,
            damping: 0.85,
            speaking_bonus: 30.0,
            chrome: ChromeInsets::default(),
        }
    }
}

impl LayoutConfig {
    pub fn center_gravity(&self) -> f32 {
        self.center_gravity
    }

    pub fn repulsion_strength(&self) -> f32 {
        self.repulsion_strength
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn speaking_bonus(&self) -> f32 {
        self.speaking_bonus
    }

    pub fn chrome(&self) -> ChromeInsets {
        self.chrome
    }

    /// Set the center gravity coefficient
    pub fn with_center_gravity(mut self, center_gravity: f32) -> Self {
        self.center_gravity = center_gravity;
        self
    }

    /// Set the repulsion strength
    pub fn with_repulsion_strength(mut self, repulsion_strength: f32) -> Self {
        self.repulsion_strength = repulsion_strength;
        self
    }

    /// Set the baseline separation between participants
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Set the per-tick velocity damping
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the extra separation granted to speaking pairs
    pub fn with_speaking_bonus(mut self, speaking_bonus: f32) -> Self {
        self.speaking_bonus = speaking_bonus;
        self
    }

    /// Set the chrome insets
    pub fn with_chrome(mut self, chrome: ChromeInsets) -> Self {
        self.chrome = chrome;
        self
    }

    /// Separation target for a pair, depending on whether either is speaking.
    ///
    /// # Examples
    ///
    /// ```
    /// # use huddle::config::LayoutConfig;
    /// let config = LayoutConfig::default();
    /// assert_eq!(config.effective_min_distance(false), 120.0);
    /// assert_eq!(config.effective_min_distance(true), 150.0);
    /// ```
    pub fn effective_min_distance(&self, either_speaking: bool) -> f32 {
        if either_speaking {
            self.min_distance + self.speaking_bonus
        } else {
            self.min_distance
        }
    }

    /// Total space reserved on each side of the viewport: the fixed
    /// boundary margin plus chrome.
    pub fn boundary_insets(&self) -> Insets {
        Insets::uniform(BOUNDARY_MARGIN).add(self.chrome.into())
    }

    /// Checks that the configuration keeps the simulation stable.
    ///
    /// # Errors
    ///
    /// Returns [`HuddleError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), HuddleError> {
        let fields = [
            ("center_gravity", self.center_gravity),
            ("repulsion_strength", self.repulsion_strength),
            ("min_distance", self.min_distance),
            ("damping", self.damping),
            ("speaking_bonus", self.speaking_bonus),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(HuddleError::Config(format!(
                "`{name}` must be a finite number, got {value}"
            )));
        }

        if self.center_gravity < 0.0 {
            return Err(HuddleError::Config(
                "`center_gravity` must not be negative".to_string(),
            ));
        }
        if self.repulsion_strength < 0.0 {
            return Err(HuddleError::Config(
                "`repulsion_strength` must not be negative".to_string(),
            ));
        }
        if self.min_distance <= 0.0 {
            return Err(HuddleError::Config(
                "`min_distance` must be greater than zero".to_string(),
            ));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(HuddleError::Config(format!(
                "`damping` must be between 0 and 1 (exclusive), got {}",
                self.damping
            )));
        }
        if self.speaking_bonus < 0.0 {
            return Err(HuddleError::Config(
                "`speaking_bonus` must not be negative".to_string(),
            ));
        }

        self.chrome.validate()
    }
}

/// Space reserved for fixed UI chrome, in addition to [`BOUNDARY_MARGIN`].
///
/// The default reserves 60 px at the top for the room header.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChromeInsets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Default for ChromeInsets {
    fn default() -> Self {
        Self {
            top: 60.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }
}

impl ChromeInsets {
    /// Creates chrome insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Chrome that reserves nothing beyond the boundary margin
    pub fn none() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    fn validate(&self) -> Result<(), HuddleError> {
        let sides = [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ];
        match sides
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((side, value)) => Err(HuddleError::Config(format!(
                "chrome `{side}` inset must be a non-negative number, got {value}"
            ))),
            None => Ok(()),
        }
    }
}

impl From<ChromeInsets> for Insets {
    fn from(chrome: ChromeInsets) -> Self {
        Insets::new(chrome.top, chrome.right, chrome.bottom, chrome.left)
    }
}

/// Canned layout feels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Wide spacing and a slow settle, for a handful of participants.
    Cozy,
    /// Tight spacing and a fast settle, for crowded rooms.
    Compact,
    /// Energetic, continuous movement.
    Dynamic,
}

impl Preset {
    /// All presets, in declaration order.
    pub const ALL: [Preset; 3] = [Preset::Cozy, Preset::Compact, Preset::Dynamic];

    /// Returns the complete layout configuration of this preset.
    pub fn config(self) -> LayoutConfig {
        let base = LayoutConfig::default();
        match self {
            Preset::Cozy => base
                .with_center_gravity(0.015)
                .with_repulsion_strength(3000.0)
                .with_min_distance(150.0)
                .with_damping(0.9)
                .with_speaking_bonus(40.0),
            Preset::Compact => base
                .with_center_gravity(0.03)
                .with_repulsion_strength(1500.0)
                .with_min_distance(90.0)
                .with_damping(0.8)
                .with_speaking_bonus(20.0),
            Preset::Dynamic => base
                .with_center_gravity(0.025)
                .with_repulsion_strength(2500.0)
                .with_min_distance(110.0)
                .with_damping(0.95)
                .with_speaking_bonus(50.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Cozy => "cozy",
            Preset::Compact => "compact",
            Preset::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset `{s}` (expected cozy, compact or dynamic)"))
    }
}

/// Visual styling for rendered snapshots.
///
/// Colors are stored as CSS strings and parsed on access. Unset fields
/// fall back to the stock palette.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    avatar_color: Option<String>,

    #[serde(default)]
    speaking_color: Option<String>,

    #[serde(default)]
    label_color: Option<String>,
}

impl StyleConfig {
    /// Viewport background. Defaults to a deep indigo.
    ///
    /// # Errors
    ///
    /// Returns [`HuddleError::Config`] if the configured string is not a
    /// valid CSS color. The same holds for the other color accessors.
    pub fn background_color(&self) -> Result<Color, HuddleError> {
        parse_color("background_color", self.background_color.as_deref(), "#1e1b4b")
    }

    /// Avatar fill. Defaults to violet.
    pub fn avatar_color(&self) -> Result<Color, HuddleError> {
        parse_color("avatar_color", self.avatar_color.as_deref(), "#7c3aed")
    }

    /// Ring drawn around speaking avatars. Defaults to gold.
    pub fn speaking_color(&self) -> Result<Color, HuddleError> {
        parse_color("speaking_color", self.speaking_color.as_deref(), "gold")
    }

    /// Participant labels and the bounds outline. Defaults to white.
    pub fn label_color(&self) -> Result<Color, HuddleError> {
        parse_color("label_color", self.label_color.as_deref(), "white")
    }
}

fn parse_color(field: &str, value: Option<&str>, fallback: &str) -> Result<Color, HuddleError> {
    Color::new(value.unwrap_or(fallback))
        .map_err(|err| HuddleError::Config(format!("Invalid {field} in config: {err}")))
}

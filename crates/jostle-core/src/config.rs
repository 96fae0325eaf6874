#![forbid(unsafe_code)]

//! Effect configuration.
//!
//! Every tunable of the effect lives in [`ScatterConfig`]. Defaults reproduce
//! the stock look; a host may override any subset by passing a JSON object
//! (missing fields keep their defaults).
//!
//! ```ignore
//! let config = ScatterConfig::from_json(r#"{ "letter_size": 80, "seed": 7 }"#)?;
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::error::{JostleError, Result};
use crate::placement::OverflowPolicy;

/// Top-level configuration for one effect instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScatterConfig {
    /// Selector of the layout container the letters scatter inside.
    pub container_selector: String,
    /// Selector of the heading whose text is split.
    pub heading_selector: String,
    /// Selector of the enclosing section whose padding shrinks during the intro.
    pub section_selector: String,
    /// Inset from every container edge, in pixels.
    pub padding: f64,
    /// Assumed footprint of one rendered letter, in pixels.
    pub letter_size: f64,
    /// Minimum distance between letter origins, as a multiple of `letter_size`.
    pub spacing_factor: f64,
    /// Candidate draws per letter before the overflow policy applies.
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
    pub overflow: OverflowPolicy,
    /// Fixed RNG seed; the host picks one when absent.
    pub seed: Option<u64>,
    /// Max level for log output (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    pub intro: IntroConfig,
    pub shuffle: ShuffleConfig,
    pub shake: ShakeConfig,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            container_selector: ".layout".to_string(),
            heading_selector: ".heading-text".to_string(),
            section_selector: ".section".to_string(),
            padding: 32.0,
            letter_size: 100.0,
            spacing_factor: 1.5,
            max_attempts: Some(10_000),
            overflow: OverflowPolicy::BestCandidate,
            seed: None,
            log_level: "warn".to_string(),
            intro: IntroConfig::default(),
            shuffle: ShuffleConfig::default(),
            shake: ShakeConfig::default(),
        }
    }
}

/// Letter rise-in and container resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroConfig {
    pub rise_secs: f64,
    pub stagger_secs: f64,
    /// Overshoot of the `back.out` ease on the rise-in.
    pub back_overshoot: f64,
    pub section_padding: String,
    pub container_height: String,
    pub corner_radius: String,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            rise_secs: 0.4,
            stagger_secs: 0.05,
            back_overshoot: 1.7,
            section_padding: "1rem".to_string(),
            container_height: "60dvh".to_string(),
            corner_radius: "1rem".to_string(),
        }
    }
}

/// One scatter pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShuffleConfig {
    pub duration_secs: f64,
    pub scale: f64,
    /// Rotations are drawn from `[-max_rotation_deg, max_rotation_deg)`.
    pub max_rotation_deg: f64,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            duration_secs: 0.5,
            scale: 2.0,
            max_rotation_deg: 180.0,
        }
    }
}

/// The wobble on the clickable letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShakeConfig {
    pub step_deg: f64,
    pub duration_secs: f64,
    pub repeat_delay_secs: f64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            step_deg: 5.0,
            duration_secs: 0.05,
            repeat_delay_secs: 0.05,
        }
    }
}

impl ScatterConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Distance below which two letter origins count as overlapping.
    #[inline]
    #[must_use]
    pub fn min_distance(&self) -> f64 {
        self.letter_size * self.spacing_factor
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| JostleError::invalid(format!("unknown log level {:?}", self.log_level)))
    }

    /// Reject values the effect cannot play with.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("container_selector", &self.container_selector),
            ("heading_selector", &self.heading_selector),
            ("section_selector", &self.section_selector),
        ] {
            if value.trim().is_empty() {
                return Err(JostleError::invalid(format!("{name} must not be empty")));
            }
        }
        non_negative("padding", self.padding)?;
        non_negative("letter_size", self.letter_size)?;
        if !self.spacing_factor.is_finite() || self.spacing_factor <= 0.0 {
            return Err(JostleError::invalid("spacing_factor must be positive"));
        }
        if !self.min_distance().is_finite() {
            return Err(JostleError::invalid("letter_size * spacing_factor overflows"));
        }
        if self.max_attempts == Some(0) {
            return Err(JostleError::invalid("max_attempts must be at least 1"));
        }
        self.level_filter()?;

        seconds("intro.rise_secs", self.intro.rise_secs)?;
        seconds("intro.stagger_secs", self.intro.stagger_secs)?;
        non_negative("intro.back_overshoot", self.intro.back_overshoot)?;
        seconds("shuffle.duration_secs", self.shuffle.duration_secs)?;
        non_negative("shuffle.scale", self.shuffle.scale)?;
        non_negative("shuffle.max_rotation_deg", self.shuffle.max_rotation_deg)?;
        if !self.shake.step_deg.is_finite() {
            return Err(JostleError::invalid("shake.step_deg must be finite"));
        }
        seconds("shake.duration_secs", self.shake.duration_secs)?;
        seconds("shake.repeat_delay_secs", self.shake.repeat_delay_secs)?;
        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(JostleError::invalid(format!(
            "{name} must be a finite, non-negative number (got {value})"
        )))
    }
}

fn seconds(name: &str, value: f64) -> Result<Duration> {
    non_negative(name, value)?;
    Duration::try_from_secs_f64(value)
        .map_err(|_| JostleError::invalid(format!("{name} is out of range (got {value})")))
}

/// Convert seconds that already passed [`ScatterConfig::validate`].
///
/// Out-of-range input saturates instead of panicking.
#[must_use]
pub fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::MAX)
}

//! Viewer tuning parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use crate::consts::{
    BUTTON_ZOOM_STEP, FIT_PADDING, FOCUS_THRESHOLD_ZOOM, FOCUS_ZOOM, LABEL_MIN_ZOOM, MAX_DPR, MAX_ZOOM, MIN_ZOOM,
    WHEEL_ZOOM_STEP,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a number: {value}")]
    NotANumber { var: &'static str, value: String },
    #[error("zoom limits must satisfy 0 < min <= max, got min={min} max={max}")]
    ZoomRange { min: f64, max: f64 },
    #[error("{var} must be greater than 1, got {value}")]
    Step { var: &'static str, value: f64 },
    #[error("fit padding must be in [0, 0.5), got {0}")]
    Padding(f64),
}

/// Tunable limits and steps for one viewer instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplier per wheel tick; zoom-out uses the reciprocal.
    pub wheel_step: f64,
    /// Multiplier per zoom button press; zoom-out uses the reciprocal.
    pub button_step: f64,
    /// Padding added on each side by fit-to-bounds, as a fraction of content size.
    pub fit_padding: f64,
    pub label_min_zoom: f64,
    /// Jumping to a search match below this zoom raises the zoom to `focus_zoom`.
    pub focus_threshold_zoom: f64,
    pub focus_zoom: f64,
    pub max_dpr: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_step: WHEEL_ZOOM_STEP,
            button_step: BUTTON_ZOOM_STEP,
            fit_padding: FIT_PADDING,
            label_min_zoom: LABEL_MIN_ZOOM,
            focus_threshold_zoom: FOCUS_THRESHOLD_ZOOM,
            focus_zoom: FOCUS_ZOOM,
            max_dpr: MAX_DPR,
        }
    }
}

impl ViewerConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `FLOORVIEW_MIN_ZOOM`: default 0.2
    /// - `FLOORVIEW_MAX_ZOOM`: default 6
    /// - `FLOORVIEW_WHEEL_STEP`: default 1.1
    /// - `FLOORVIEW_BUTTON_STEP`: default 1.15
    /// - `FLOORVIEW_FIT_PADDING`: default 0.06
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is not a number or the result
    /// fails [`ViewerConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Build config from an arbitrary key lookup (used by `from_env` and tests).
    /// The lookup reports unset keys as [`VarError::NotPresent`].
    ///
    /// # Errors
    ///
    /// Same as [`ViewerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();
        let config = Self {
            min_zoom: parse_f64(&lookup, "FLOORVIEW_MIN_ZOOM", defaults.min_zoom)?,
            max_zoom: parse_f64(&lookup, "FLOORVIEW_MAX_ZOOM", defaults.max_zoom)?,
            wheel_step: parse_f64(&lookup, "FLOORVIEW_WHEEL_STEP", defaults.wheel_step)?,
            button_step: parse_f64(&lookup, "FLOORVIEW_BUTTON_STEP", defaults.button_step)?,
            fit_padding: parse_f64(&lookup, "FLOORVIEW_FIT_PADDING", defaults.fit_padding)?,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants every other module relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            return Err(ConfigError::ZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        for (var, value) in [("FLOORVIEW_WHEEL_STEP", self.wheel_step), ("FLOORVIEW_BUTTON_STEP", self.button_step)] {
            if !(value > 1.0 && value.is_finite()) {
                return Err(ConfigError::Step { var, value });
            }
        }
        if !(0.0..0.5).contains(&self.fit_padding) {
            return Err(ConfigError::Padding(self.fit_padding));
        }
        Ok(())
    }
}

fn parse_f64<F>(lookup: &F, var: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let raw = match lookup(var) {
        Ok(raw) => raw,
        Err(VarError::NotPresent) => return Ok(default),
        Err(VarError::NotUnicode(raw)) => {
            return Err(ConfigError::NotANumber { var, value: raw.to_string_lossy().into_owned() });
        }
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::NotANumber { var, value: raw }),
    }
}

fn env_var(key: &str) -> Result<String, VarError> {
    std::env::var(key)
}

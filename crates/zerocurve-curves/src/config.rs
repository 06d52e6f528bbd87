//! Curve build configuration.
//!
//! A single [`CurveBuildConfig`] captures every knob of a curve build and
//! round-trips through TOML:
//!
//! ```toml
//! [interpolation]
//! method = "smith-wilson"
//! ultimate_forward_rate = 0.042
//! lambda = 0.1
//!
//! [bootstrap]
//! rate_bracket = [-0.05, 0.20]
//! max_iterations = 100
//! ```
//!
//! Missing sections fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bootstrap::SequentialBootstrapConfig;
use crate::error::{CurveError, CurveResult};
use crate::interpolation::InterpolationMethod;

/// Settings for one curve build.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveBuildConfig {
    /// Interpolation method for the final curve.
    pub interpolation: InterpolationMethod,
    /// Sequential bootstrap settings.
    pub bootstrap: SequentialBootstrapConfig,
}

impl CurveBuildConfig {
    /// Sets the interpolation method.
    #[must_use]
    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or invalid values.
    pub fn from_toml_str(content: &str) -> CurveResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CurveError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> CurveResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CurveError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> CurveResult<String> {
        toml::to_string_pretty(self).map_err(|e| CurveError::invalid_config(e.to_string()))
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> CurveResult<()> {
        self.interpolation.validate()?;
        self.bootstrap.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = CurveBuildConfig::from_toml_str("").unwrap();
        assert_eq!(config, CurveBuildConfig::default());
        assert_eq!(config.interpolation, InterpolationMethod::HaganWest);
    }

    #[test]
    fn test_parse_smith_wilson() {
        let config = CurveBuildConfig::from_toml_str(
            r#"
            [interpolation]
            method = "smith-wilson"
            ultimate_forward_rate = 0.042
            lambda = 0.15

            [bootstrap]
            rate_bracket = [-0.10, 0.30]
            "#,
        )
        .unwrap();

        assert_eq!(config.interpolation, InterpolationMethod::smith_wilson(0.042, 0.15));
        assert_eq!(config.bootstrap.rate_bracket, (-0.10, 0.30));
        assert_eq!(config.bootstrap.max_iterations, 100);
    }

    #[test]
    fn test_invalid_lambda_rejected() {
        let result = CurveBuildConfig::from_toml_str(
            r#"
            [interpolation]
            method = "smith-wilson"
            ultimate_forward_rate = 0.042
            lambda = 0.0
            "#,
        );
        assert!(matches!(result, Err(CurveError::InvalidConfig { .. })));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let result = CurveBuildConfig::from_toml_str(
            r#"
            [interpolation]
            method = "nelson-siegel"
            "#,
        );
        assert!(matches!(result, Err(CurveError::InvalidConfig { .. })));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CurveBuildConfig::default()
            .with_interpolation(InterpolationMethod::smith_wilson(0.035, 0.2));
        let text = config.to_toml_string().unwrap();
        assert_eq!(CurveBuildConfig::from_toml_str(&text).unwrap(), config);
    }
}

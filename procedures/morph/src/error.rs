use thiserror::Error;

/// Invalid tree or dataset configuration.
///
/// These are programmer errors surfaced at build time, never during a frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	#[error("{name} must be a finite, non-negative value, got {value}")]
	InvalidDimension { name: &'static str, value: f32 },

	#[error("{name} must be a finite range with min <= max, got [{min}, {max}]")]
	InvalidRange { name: &'static str, min: f32, max: f32 },

	#[error("damping rate must be finite and positive, got {0}")]
	InvalidDampingRate(f32),

	#[error("reveal threshold must lie in [0, 1], got {0}")]
	InvalidThreshold(f32),

	#[error("height bias exponent must be finite and positive, got {0}")]
	InvalidHeightBias(f32),
}

impl ConfigError {
	/// Checks that a scalar is finite and non-negative.
	pub fn check_dimension(name: &'static str, value: f32) -> Result<(), Self> {
		if value.is_finite() && value >= 0.0 {
			Ok(())
		} else {
			Err(Self::InvalidDimension { name, value })
		}
	}

	/// Checks that a `(min, max)` band is finite and ordered.
	pub fn check_range(name: &'static str, (min, max): (f32, f32)) -> Result<(), Self> {
		if min.is_finite() && max.is_finite() && min <= max {
			Ok(())
		} else {
			Err(Self::InvalidRange { name, min, max })
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_check_dimension() {
		assert!(ConfigError::check_dimension("radius", 0.0).is_ok());
		assert!(ConfigError::check_dimension("radius", 4.0).is_ok());
		assert_eq!(
			ConfigError::check_dimension("radius", -1.0),
			Err(ConfigError::InvalidDimension { name: "radius", value: -1.0 })
		);
		assert!(ConfigError::check_dimension("radius", f32::NAN).is_err());
		assert!(ConfigError::check_dimension("radius", f32::INFINITY).is_err());
	}

	#[test]
	fn test_check_range() {
		assert!(ConfigError::check_range("scale", (0.5, 1.3)).is_ok());
		assert!(ConfigError::check_range("scale", (1.0, 1.0)).is_ok());
		assert!(ConfigError::check_range("scale", (1.3, 0.5)).is_err());
		assert!(ConfigError::check_range("scale", (f32::NAN, 0.5)).is_err());
	}

	#[test]
	fn test_error_names_field() {
		let err = ConfigError::InvalidRange { name: "speed", min: 2.0, max: 1.0 };
		assert!(err.to_string().contains("speed"));
	}
}

use crate::error::ConfigError;
use crate::progress::{smoothstep, Mode};
use serde::{Deserialize, Deserializer, Serialize};

/// How the assembled (tree) position of a particle is placed on the cone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConePlacement {
	/// On the cone shell at the sampled height, random azimuth.
	Shell,
	/// Inside the cone: the shell radius is scaled by a secondary random factor.
	Interior,
	/// On the shell, pushed outward and wound around the axis.
	Spiral {
		/// Radians of azimuth added per unit of height fraction.
		turns: f32,
		/// Extra radial distance so the particle sits proud of the shell.
		outward_offset: f32,
	},
}

/// How particles of a dataset are oriented each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationStyle {
	/// Tumbles from a random seed while scattered, faces outward once assembled.
	Needle,
	/// Spins slowly about the vertical axis, never tumbles.
	Ornament,
}

/// Easing curve applied to raw progress before spatial interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
	Linear,
	#[default]
	Smoothstep,
	Smootherstep,
}

impl Easing {
	pub fn apply(&self, t: f32) -> f32 {
		let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
		match self {
			Easing::Linear => t,
			Easing::Smoothstep => smoothstep(t),
			Easing::Smootherstep => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
		}
	}
}

/// Sampling strategy and animation-constant ranges for one dataset.
///
/// Inside a [`TreeConfig`] table, omitted keys fall back to that dataset's preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
	/// Number of particles; fixed for the session
	pub count: usize,
	/// Exponent applied to the uniform height fraction (< 1 skews toward the base)
	pub height_bias: f32,
	pub placement: ConePlacement,
	pub rotation: RotationStyle,
	/// Uniform scale band (min, max)
	pub scale: (f32, f32),
	/// Idle-motion frequency band (min, max)
	pub speed: (f32, f32),
	/// Idle-motion amplitude added while fully scattered
	pub max_float_amplitude: f32,
	/// Residual idle-motion amplitude while fully assembled
	pub min_float_amplitude: f32,
	/// Frequency of the vertical sinusoid relative to the horizontal one
	pub vertical_frequency_ratio: f32,
}

impl DatasetConfig {
	/// Dense emerald fill of the canopy.
	pub fn needles() -> Self {
		Self {
			count: 1800,
			height_bias: 0.8,
			placement: ConePlacement::Interior,
			rotation: RotationStyle::Needle,
			scale: (0.5, 1.3),
			speed: (0.2, 0.7),
			max_float_amplitude: 1.5,
			min_float_amplitude: 0.2,
			vertical_frequency_ratio: 0.8,
		}
	}

	/// Sparse gold baubles spiralling around the canopy surface.
	pub fn ornaments() -> Self {
		Self {
			count: 150,
			height_bias: 1.0,
			placement: ConePlacement::Spiral { turns: 10.0, outward_offset: 0.2 },
			rotation: RotationStyle::Ornament,
			scale: (1.0, 1.5),
			speed: (0.1, 0.4),
			max_float_amplitude: 2.0,
			min_float_amplitude: 0.1,
			vertical_frequency_ratio: 1.0,
		}
	}

	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	pub fn with_height_bias(mut self, height_bias: f32) -> Self {
		self.height_bias = height_bias;
		self
	}

	pub fn with_placement(mut self, placement: ConePlacement) -> Self {
		self.placement = placement;
		self
	}

	pub fn with_rotation(mut self, rotation: RotationStyle) -> Self {
		self.rotation = rotation;
		self
	}

	pub fn with_scale(mut self, min: f32, max: f32) -> Self {
		self.scale = (min, max);
		self
	}

	pub fn with_speed(mut self, min: f32, max: f32) -> Self {
		self.speed = (min, max);
		self
	}

	pub fn with_float_amplitude(mut self, max: f32, min: f32) -> Self {
		self.max_float_amplitude = max;
		self.min_float_amplitude = min;
		self
	}

	pub fn with_vertical_frequency_ratio(mut self, ratio: f32) -> Self {
		self.vertical_frequency_ratio = ratio;
		self
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.height_bias.is_finite() && self.height_bias > 0.0) {
			return Err(ConfigError::InvalidHeightBias(self.height_bias));
		}
		if let ConePlacement::Spiral { turns, outward_offset } = self.placement {
			if !turns.is_finite() {
				return Err(ConfigError::InvalidDimension { name: "spiral turns", value: turns });
			}
			ConfigError::check_dimension("outward offset", outward_offset)?;
		}
		ConfigError::check_range("scale", self.scale)?;
		ConfigError::check_dimension("minimum scale", self.scale.0)?;
		ConfigError::check_range("speed", self.speed)?;
		ConfigError::check_dimension("max float amplitude", self.max_float_amplitude)?;
		ConfigError::check_dimension("min float amplitude", self.min_float_amplitude)?;
		ConfigError::check_dimension("vertical frequency ratio", self.vertical_frequency_ratio)
	}
}

impl Default for DatasetConfig {
	fn default() -> Self {
		Self::needles()
	}
}

/// A dataset table with every key optional, laid over a preset.
#[derive(Debug, Default, Deserialize)]
struct DatasetOverrides {
	count: Option<usize>,
	height_bias: Option<f32>,
	placement: Option<ConePlacement>,
	rotation: Option<RotationStyle>,
	scale: Option<(f32, f32)>,
	speed: Option<(f32, f32)>,
	max_float_amplitude: Option<f32>,
	min_float_amplitude: Option<f32>,
	vertical_frequency_ratio: Option<f32>,
}

impl DatasetOverrides {
	fn apply(self, preset: DatasetConfig) -> DatasetConfig {
		DatasetConfig {
			count: self.count.unwrap_or(preset.count),
			height_bias: self.height_bias.unwrap_or(preset.height_bias),
			placement: self.placement.unwrap_or(preset.placement),
			rotation: self.rotation.unwrap_or(preset.rotation),
			scale: self.scale.unwrap_or(preset.scale),
			speed: self.speed.unwrap_or(preset.speed),
			max_float_amplitude: self.max_float_amplitude.unwrap_or(preset.max_float_amplitude),
			min_float_amplitude: self.min_float_amplitude.unwrap_or(preset.min_float_amplitude),
			vertical_frequency_ratio: self
				.vertical_frequency_ratio
				.unwrap_or(preset.vertical_frequency_ratio),
		}
	}
}

fn deserialize_needles<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> Result<DatasetConfig, D::Error> {
	DatasetOverrides::deserialize(deserializer)
		.map(|overrides| overrides.apply(DatasetConfig::needles()))
}

fn deserialize_ornaments<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> Result<DatasetConfig, D::Error> {
	DatasetOverrides::deserialize(deserializer)
		.map(|overrides| overrides.apply(DatasetConfig::ornaments()))
}

/// Static parameters of the morphing tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
	#[serde(deserialize_with = "deserialize_needles")]
	pub needles: DatasetConfig,
	#[serde(deserialize_with = "deserialize_ornaments")]
	pub ornaments: DatasetConfig,
	/// Height of the assembled cone, centered on the origin
	pub height: f32,
	/// Radius of the cone base
	pub radius: f32,
	/// Radius of the scatter sphere
	pub scatter_radius: f32,
	/// Rate at which progress is damped toward its target, per second
	pub damping_rate: f32,
	pub easing: Easing,
	/// Raw progress above which needles face outward instead of tumbling
	pub reveal_threshold: f32,
	/// Tumble spin, radians per second
	pub tumble_rate: f32,
	/// Ornament yaw spin, radians per second
	pub spin_rate: f32,
	/// Mode the tree starts in; progress is initialized to match
	pub initial_mode: Mode,
}

impl Default for TreeConfig {
	fn default() -> Self {
		Self {
			needles: DatasetConfig::needles(),
			ornaments: DatasetConfig::ornaments(),
			height: 12.0,
			radius: 4.0,
			scatter_radius: 15.0,
			damping_rate: 2.0,
			easing: Easing::Smoothstep,
			reveal_threshold: 0.8,
			tumble_rate: 0.1,
			spin_rate: 0.2,
			initial_mode: Mode::Assembled,
		}
	}
}

impl TreeConfig {
	pub fn with_needles(mut self, needles: DatasetConfig) -> Self {
		self.needles = needles;
		self
	}

	pub fn with_ornaments(mut self, ornaments: DatasetConfig) -> Self {
		self.ornaments = ornaments;
		self
	}

	pub fn with_height(mut self, height: f32) -> Self {
		self.height = height;
		self
	}

	pub fn with_radius(mut self, radius: f32) -> Self {
		self.radius = radius;
		self
	}

	pub fn with_scatter_radius(mut self, scatter_radius: f32) -> Self {
		self.scatter_radius = scatter_radius;
		self
	}

	pub fn with_damping_rate(mut self, damping_rate: f32) -> Self {
		self.damping_rate = damping_rate;
		self
	}

	pub fn with_easing(mut self, easing: Easing) -> Self {
		self.easing = easing;
		self
	}

	pub fn with_reveal_threshold(mut self, reveal_threshold: f32) -> Self {
		self.reveal_threshold = reveal_threshold;
		self
	}

	pub fn with_initial_mode(mut self, initial_mode: Mode) -> Self {
		self.initial_mode = initial_mode;
		self
	}

	/// Checks every dimension, band and rate. Called before any dataset is built.
	pub fn validate(&self) -> Result<(), ConfigError> {
		ConfigError::check_dimension("tree height", self.height)?;
		ConfigError::check_dimension("tree radius", self.radius)?;
		ConfigError::check_dimension("scatter radius", self.scatter_radius)?;
		if !(self.damping_rate.is_finite() && self.damping_rate > 0.0) {
			return Err(ConfigError::InvalidDampingRate(self.damping_rate));
		}
		if !(0.0..=1.0).contains(&self.reveal_threshold) {
			return Err(ConfigError::InvalidThreshold(self.reveal_threshold));
		}
		if !self.tumble_rate.is_finite() {
			return Err(ConfigError::InvalidDimension {
				name: "tumble rate",
				value: self.tumble_rate,
			});
		}
		if !self.spin_rate.is_finite() {
			return Err(ConfigError::InvalidDimension { name: "spin rate", value: self.spin_rate });
		}
		self.needles.validate()?;
		self.ornaments.validate()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config_is_valid() {
		assert!(TreeConfig::default().validate().is_ok());
	}

	#[test]
	fn test_easing_endpoints() {
		for easing in [Easing::Linear, Easing::Smoothstep, Easing::Smootherstep] {
			assert_eq!(easing.apply(0.0), 0.0);
			assert_eq!(easing.apply(1.0), 1.0);
			assert!((easing.apply(0.5) - 0.5).abs() < 1e-6);
			assert_eq!(easing.apply(-3.0), 0.0);
			assert_eq!(easing.apply(7.0), 1.0);
			assert_eq!(easing.apply(f32::NAN), 0.0);
		}
	}

	#[test]
	fn test_negative_radius_rejected() {
		let config = TreeConfig::default().with_radius(-1.0);
		assert_eq!(
			config.validate(),
			Err(ConfigError::InvalidDimension { name: "tree radius", value: -1.0 })
		);
	}

	#[test]
	fn test_inverted_scale_rejected() {
		let config =
			TreeConfig::default().with_ornaments(DatasetConfig::ornaments().with_scale(2.0, 1.0));
		assert!(matches!(config.validate(), Err(ConfigError::InvalidRange { name: "scale", .. })));
	}

	#[test]
	fn test_damping_and_threshold_rejected() {
		assert_eq!(
			TreeConfig::default().with_damping_rate(0.0).validate(),
			Err(ConfigError::InvalidDampingRate(0.0))
		);
		assert_eq!(
			TreeConfig::default().with_reveal_threshold(1.5).validate(),
			Err(ConfigError::InvalidThreshold(1.5))
		);
	}

	#[test]
	fn test_height_bias_rejected() {
		let config =
			TreeConfig::default().with_needles(DatasetConfig::needles().with_height_bias(0.0));
		assert_eq!(config.validate(), Err(ConfigError::InvalidHeightBias(0.0)));
	}
}

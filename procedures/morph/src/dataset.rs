use crate::config::{ConePlacement, DatasetConfig, RotationStyle, TreeConfig};
use crate::error::ConfigError;
use crate::sampler::{
	biased_height_fraction, cone_point, cone_radius, sample_cone, sample_in_range,
	sample_rotation_seed, sample_sphere,
};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Identifies one of the two particle collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetId {
	Needles,
	Ornaments,
}

impl DatasetId {
	pub const ALL: [DatasetId; 2] = [DatasetId::Needles, DatasetId::Ornaments];

	pub fn name(&self) -> &'static str {
		match self {
			DatasetId::Needles => "needles",
			DatasetId::Ornaments => "ornaments",
		}
	}
}

/// Both endpoint positions and the animation constants of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
	pub scatter_position: Vec3,
	pub assembled_position: Vec3,
	/// Base tumble orientation as XYZ Euler angles; zero for non-tumbling particles
	pub rotation_seed: Vec3,
	pub scale: f32,
	pub speed: f32,
	/// Oscillation phase in [0, 2π)
	pub phase: f32,
}

/// Fixed-length, read-only collection of particles sharing a sampling strategy.
///
/// Records are only reachable through shared slices, so nothing can alter them
/// after [`DatasetBuilder::build`] returns.
#[derive(Debug)]
pub struct Dataset {
	id: DatasetId,
	config: DatasetConfig,
	records: Vec<ParticleRecord>,
}

impl Dataset {
	pub fn id(&self) -> DatasetId {
		self.id
	}

	pub fn config(&self) -> &DatasetConfig {
		&self.config
	}

	pub fn records(&self) -> &[ParticleRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

/// Builds a [`Dataset`] in a single pass over the configured count.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
	pub id: DatasetId,
	pub config: DatasetConfig,
	pub height: f32,
	pub radius: f32,
	pub scatter_radius: f32,
}

impl DatasetBuilder {
	pub fn new(id: DatasetId, config: DatasetConfig) -> Self {
		let defaults = TreeConfig::default();
		Self {
			id,
			config,
			height: defaults.height,
			radius: defaults.radius,
			scatter_radius: defaults.scatter_radius,
		}
	}

	pub fn with_cone(mut self, height: f32, radius: f32) -> Self {
		self.height = height;
		self.radius = radius;
		self
	}

	pub fn with_scatter_radius(mut self, scatter_radius: f32) -> Self {
		self.scatter_radius = scatter_radius;
		self
	}

	fn validate(&self) -> Result<(), ConfigError> {
		ConfigError::check_dimension("tree height", self.height)?;
		ConfigError::check_dimension("tree radius", self.radius)?;
		ConfigError::check_dimension("scatter radius", self.scatter_radius)?;
		self.config.validate()
	}

	/// Assembled (tree) position for a particle at the given height fraction.
	fn assembled_position<R: Rng + ?Sized>(&self, rng: &mut R, y_norm: f32) -> Vec3 {
		match self.config.placement {
			ConePlacement::Shell => sample_cone(rng, self.height, self.radius, y_norm),
			ConePlacement::Interior => {
				let shell = sample_cone(rng, self.height, self.radius, y_norm);
				// sqrt keeps the fill uniform over each horizontal disc
				let fill = rng.gen::<f32>().sqrt();
				Vec3::new(shell.x * fill, shell.y, shell.z * fill)
			}
			ConePlacement::Spiral { turns, outward_offset } => {
				if self.height <= 0.0 {
					return Vec3::ZERO;
				}
				let radius = cone_radius(self.radius, y_norm) + outward_offset;
				let theta = rng.gen::<f32>() * TAU + y_norm * turns;
				cone_point(self.height, y_norm, radius, theta)
			}
		}
	}

	fn record<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleRecord {
		let y_norm = biased_height_fraction(rng, self.config.height_bias);
		let assembled_position = self.assembled_position(rng, y_norm);
		let scatter_position = sample_sphere(rng, self.scatter_radius);

		let rotation_seed = match self.config.rotation {
			RotationStyle::Needle => sample_rotation_seed(rng),
			RotationStyle::Ornament => Vec3::ZERO,
		};

		ParticleRecord {
			scatter_position,
			assembled_position,
			rotation_seed,
			scale: sample_in_range(rng, self.config.scale),
			speed: sample_in_range(rng, self.config.speed),
			phase: rng.gen::<f32>() * TAU,
		}
	}

	/// Validates the configuration, then draws every record.
	pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dataset, ConfigError> {
		self.validate()?;

		log::info!("Building {} dataset with {} particles", self.id.name(), self.config.count);

		let records = (0..self.config.count).map(|_| self.record(rng)).collect();

		Ok(Dataset { id: self.id, config: self.config.clone(), records })
	}
}

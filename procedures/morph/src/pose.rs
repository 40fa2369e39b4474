use crate::config::{DatasetConfig, Easing, RotationStyle, TreeConfig};
use crate::dataset::{Dataset, ParticleRecord};
use crate::progress::AnimationState;
use crate::sink::TransformSink;
use bevy::prelude::*;
use std::f32::consts::PI;

/// Orientation regime of a needle, keyed on raw progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
	/// Assembled-dominant: face away from the trunk axis.
	FacingOut,
	/// Tumble from the rotation seed with a slow spin.
	Tumbling,
}

impl Orientation {
	pub fn from_progress(progress: f32, reveal_threshold: f32) -> Self {
		if progress > reveal_threshold {
			Orientation::FacingOut
		} else {
			Orientation::Tumbling
		}
	}
}

/// The global signal every particle is evaluated against in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
	/// Raw damped progress, used for threshold decisions
	pub progress: f32,
	/// Eased progress, used for spatial blending
	pub eased: f32,
	pub elapsed: f32,
}

impl FrameSample {
	pub fn new(progress: f32, elapsed: f32, easing: Easing) -> Self {
		Self { progress, eased: easing.apply(progress), elapsed }
	}

	pub fn from_state(state: &AnimationState, easing: Easing) -> Self {
		Self::new(state.progress(), state.elapsed(), easing)
	}
}

/// Rotation that points the forward axis (-Z) horizontally away from the vertical axis.
///
/// Looks toward the axis point at the particle's height, then turns half a revolution.
/// A particle exactly on the axis has no outward direction and keeps the identity.
pub fn facing_out(position: Vec3) -> Quat {
	let outward = Vec3::new(position.x, 0.0, position.z);
	if outward.length_squared() < 1e-12 {
		return Quat::IDENTITY;
	}

	let toward_axis = Quat::from_rotation_y(outward.x.atan2(outward.z));
	toward_axis * Quat::from_rotation_y(PI)
}

/// Computes per-frame transforms from immutable records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseEvaluator {
	pub reveal_threshold: f32,
	pub tumble_rate: f32,
	pub spin_rate: f32,
}

impl Default for PoseEvaluator {
	fn default() -> Self {
		Self { reveal_threshold: 0.8, tumble_rate: 0.1, spin_rate: 0.2 }
	}
}

impl PoseEvaluator {
	pub fn from_config(config: &TreeConfig) -> Self {
		Self {
			reveal_threshold: config.reveal_threshold,
			tumble_rate: config.tumble_rate,
			spin_rate: config.spin_rate,
		}
	}

	/// Idle-motion amplitude: large while scattered, a residual jitter once assembled.
	pub fn float_amplitude(config: &DatasetConfig, eased: f32) -> f32 {
		(1.0 - eased) * config.max_float_amplitude + config.min_float_amplitude
	}

	/// Interpolated position plus horizontal-plane idle motion. Depth is left untouched.
	pub fn position(record: &ParticleRecord, config: &DatasetConfig, frame: &FrameSample) -> Vec3 {
		let base = record.scatter_position.lerp(record.assembled_position, frame.eased);
		let amplitude = Self::float_amplitude(config, frame.eased);

		let angle = frame.elapsed * record.speed;
		let offset_x = (angle + record.phase).sin() * amplitude;
		let offset_y = (angle * config.vertical_frequency_ratio + record.phase).cos() * amplitude;

		base + Vec3::new(offset_x, offset_y, 0.0)
	}

	pub fn orientation(&self, frame: &FrameSample) -> Orientation {
		Orientation::from_progress(frame.progress, self.reveal_threshold)
	}

	pub fn rotation(
		&self,
		record: &ParticleRecord,
		style: RotationStyle,
		frame: &FrameSample,
		position: Vec3,
	) -> Quat {
		match style {
			RotationStyle::Ornament => Quat::from_rotation_y(frame.elapsed * self.spin_rate),
			RotationStyle::Needle => match self.orientation(frame) {
				Orientation::FacingOut => facing_out(position),
				Orientation::Tumbling => {
					let spin = frame.elapsed * self.tumble_rate;
					let seed = record.rotation_seed;
					Quat::from_euler(EulerRot::XYZ, seed.x + spin, seed.y + spin, seed.z)
				}
			},
		}
	}

	pub fn pose(
		&self,
		record: &ParticleRecord,
		config: &DatasetConfig,
		frame: &FrameSample,
	) -> Transform {
		let translation = Self::position(record, config, frame);
		let rotation = self.rotation(record, config.rotation, frame, translation);

		Transform { translation, rotation, scale: Vec3::splat(record.scale) }
	}

	/// Submits one transform per record, in dataset order.
	pub fn evaluate_dataset<S: TransformSink + ?Sized>(
		&self,
		dataset: &Dataset,
		frame: &FrameSample,
		sink: &mut S,
	) {
		let config = dataset.config();
		for (index, record) in dataset.records().iter().enumerate() {
			sink.submit_transform(dataset.id(), index, self.pose(record, config, frame));
		}
	}
}

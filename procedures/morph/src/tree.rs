use crate::config::TreeConfig;
use crate::dataset::{Dataset, DatasetBuilder, DatasetId};
use crate::error::ConfigError;
use crate::pose::{FrameSample, PoseEvaluator};
use crate::progress::{AnimationState, Mode};
use crate::sink::TransformSink;
use bevy::prelude::*;
use rand::Rng;

/// The two datasets and the evaluator that poses them.
///
/// Datasets are drawn once in [`MorphingTree::build`]; every later method borrows
/// `self` immutably, so a frame can never regenerate them.
#[derive(Resource, Debug)]
pub struct MorphingTree {
	config: TreeConfig,
	evaluator: PoseEvaluator,
	needles: Dataset,
	ornaments: Dataset,
}

impl MorphingTree {
	pub fn build<R: Rng + ?Sized>(config: TreeConfig, rng: &mut R) -> Result<Self, ConfigError> {
		config.validate()?;

		let needles = DatasetBuilder::new(DatasetId::Needles, config.needles.clone())
			.with_cone(config.height, config.radius)
			.with_scatter_radius(config.scatter_radius)
			.build(rng)?;
		let ornaments = DatasetBuilder::new(DatasetId::Ornaments, config.ornaments.clone())
			.with_cone(config.height, config.radius)
			.with_scatter_radius(config.scatter_radius)
			.build(rng)?;

		Ok(Self { evaluator: PoseEvaluator::from_config(&config), config, needles, ornaments })
	}

	pub fn config(&self) -> &TreeConfig {
		&self.config
	}

	pub fn dataset(&self, id: DatasetId) -> &Dataset {
		match id {
			DatasetId::Needles => &self.needles,
			DatasetId::Ornaments => &self.ornaments,
		}
	}

	/// Fresh animation state settled on the configured initial mode.
	pub fn initial_state(&self) -> AnimationState {
		AnimationState::new(self.config.initial_mode)
	}

	/// Poses both datasets for the given state without advancing it.
	pub fn evaluate<S: TransformSink + ?Sized>(
		&self,
		state: &AnimationState,
		sink: &mut S,
	) -> FrameSample {
		let frame = FrameSample::from_state(state, self.config.easing);
		for id in DatasetId::ALL {
			self.evaluator.evaluate_dataset(self.dataset(id), &frame, sink);
		}
		frame
	}

	/// One full frame: damp progress toward `mode`, then pose every particle.
	pub fn frame<S: TransformSink + ?Sized>(
		&self,
		state: &mut AnimationState,
		mode: Mode,
		dt: f32,
		sink: &mut S,
	) -> FrameSample {
		state.update(mode, dt, self.config.damping_rate);
		self.evaluate(state, sink)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{DatasetConfig, Easing};
	use crate::pose::Orientation;
	use crate::sink::InstanceTransforms;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	const DT: f32 = 1.0 / 60.0;

	fn small_tree() -> MorphingTree {
		let config = TreeConfig::default()
			.with_needles(DatasetConfig::needles().with_count(64))
			.with_ornaments(DatasetConfig::ornaments().with_count(8));
		MorphingTree::build(config, &mut StdRng::seed_from_u64(99)).unwrap()
	}

	#[test]
	fn test_frame_fills_every_instance_in_order() {
		let tree = small_tree();
		let mut state = tree.initial_state();
		let mut buffer = InstanceTransforms::default();

		tree.frame(&mut state, Mode::Assembled, DT, &mut buffer);

		assert_eq!(buffer.get(DatasetId::Needles).len(), 64);
		assert_eq!(buffer.get(DatasetId::Ornaments).len(), 8);

		let mut order = Vec::new();
		tree.evaluate(&state, &mut |dataset: DatasetId, index: usize, _: Transform| {
			order.push((dataset, index));
		});
		let expected: Vec<_> = (0..64)
			.map(|i| (DatasetId::Needles, i))
			.chain((0..8).map(|i| (DatasetId::Ornaments, i)))
			.collect();
		assert_eq!(order, expected);
	}

	#[test]
	fn test_scatter_then_gather() {
		let tree = small_tree();
		let mut state = tree.initial_state();
		let mut buffer = InstanceTransforms::default();

		for _ in 0..600 {
			tree.frame(&mut state, Mode::Scattered, DT, &mut buffer);
		}
		assert!(state.progress() < 0.01);

		for _ in 0..300 {
			tree.frame(&mut state, Mode::Assembled, DT, &mut buffer);
		}
		assert!(state.progress() > 0.95);

		// assembled needles stay within the canopy plus the residual jitter
		let jitter = tree.config().needles.min_float_amplitude
			+ tree.config().needles.max_float_amplitude * 0.01;
		for transform in buffer.get(DatasetId::Needles) {
			assert!(transform.translation.y.abs() <= 6.0 + jitter);
		}
	}

	#[test]
	fn test_reveal_switches_needle_orientation() {
		let tree = small_tree();
		let state = tree.initial_state().with_progress(0.9);
		let frame = tree.evaluate(&state, &mut InstanceTransforms::default());
		assert_eq!(tree.evaluator.orientation(&frame), Orientation::FacingOut);

		let state = tree.initial_state().with_progress(0.5);
		let frame = tree.evaluate(&state, &mut InstanceTransforms::default());
		assert_eq!(tree.evaluator.orientation(&frame), Orientation::Tumbling);
	}

	#[test]
	fn test_frames_reuse_datasets() {
		let tree = small_tree();
		let before: Vec<_> = tree.dataset(DatasetId::Needles).records().to_vec();
		let mut state = tree.initial_state();

		for mode in [Mode::Scattered, Mode::Assembled, Mode::Scattered] {
			for _ in 0..30 {
				tree.frame(&mut state, mode, DT, &mut InstanceTransforms::default());
			}
		}

		assert_eq!(tree.dataset(DatasetId::Needles).records(), before.as_slice());
	}

	#[test]
	fn test_mid_transition_flip_is_continuous() {
		let tree = small_tree();
		let mut state = tree.initial_state();
		let mut previous = InstanceTransforms::default();
		let mut current = InstanceTransforms::default();

		for _ in 0..20 {
			tree.frame(&mut state, Mode::Scattered, DT, &mut previous);
		}
		tree.frame(&mut state, Mode::Assembled, DT, &mut current);

		for (a, b) in previous
			.get(DatasetId::Ornaments)
			.iter()
			.zip(current.get(DatasetId::Ornaments))
		{
			assert!(a.translation.distance(b.translation) < 1.0);
		}
	}

	#[test]
	fn test_linear_easing_blends_at_raw_progress() {
		let still = DatasetConfig::needles().with_count(16).with_float_amplitude(0.0, 0.0);
		let config = TreeConfig::default()
			.with_needles(still)
			.with_ornaments(DatasetConfig::ornaments().with_count(4))
			.with_easing(Easing::Linear);
		let tree = MorphingTree::build(config, &mut StdRng::seed_from_u64(3)).unwrap();
		let mut state = tree.initial_state().with_progress(0.25);
		let mut buffer = InstanceTransforms::default();

		let frame = tree.frame(&mut state, Mode::Assembled, 0.0, &mut buffer);
		assert_eq!(frame.eased, 0.25);

		let records = tree.dataset(DatasetId::Needles).records();
		for (record, transform) in records.iter().zip(buffer.get(DatasetId::Needles)) {
			let expected = record.scatter_position.lerp(record.assembled_position, 0.25);
			assert!(transform.translation.abs_diff_eq(expected, 1e-4));
		}
	}

	#[test]
	fn test_invalid_config_is_rejected() {
		let config = TreeConfig::default().with_height(-12.0);
		let result = MorphingTree::build(config, &mut StdRng::seed_from_u64(1));
		assert!(matches!(result, Err(ConfigError::InvalidDimension { name: "tree height", .. })));
	}
}

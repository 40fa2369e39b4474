use crate::dataset::DatasetId;
use bevy::prelude::*;

/// Receives the per-particle transforms produced each frame.
///
/// Index `i` of a dataset always refers to record `i`, so a renderer can map it
/// straight onto geometry instance `i`.
pub trait TransformSink {
	fn submit_transform(&mut self, dataset: DatasetId, index: usize, transform: Transform);
}

impl<F: FnMut(DatasetId, usize, Transform)> TransformSink for F {
	fn submit_transform(&mut self, dataset: DatasetId, index: usize, transform: Transform) {
		self(dataset, index, transform);
	}
}

/// Per-dataset transform buffers, overwritten in place every frame.
#[derive(Resource, Debug, Default, Clone)]
pub struct InstanceTransforms {
	needles: Vec<Transform>,
	ornaments: Vec<Transform>,
}

impl InstanceTransforms {
	pub fn with_capacity(needles: usize, ornaments: usize) -> Self {
		Self { needles: Vec::with_capacity(needles), ornaments: Vec::with_capacity(ornaments) }
	}

	pub fn get(&self, dataset: DatasetId) -> &[Transform] {
		match dataset {
			DatasetId::Needles => &self.needles,
			DatasetId::Ornaments => &self.ornaments,
		}
	}

	fn slot_mut(&mut self, dataset: DatasetId) -> &mut Vec<Transform> {
		match dataset {
			DatasetId::Needles => &mut self.needles,
			DatasetId::Ornaments => &mut self.ornaments,
		}
	}
}

impl TransformSink for InstanceTransforms {
	fn submit_transform(&mut self, dataset: DatasetId, index: usize, transform: Transform) {
		let slot = self.slot_mut(dataset);
		if index >= slot.len() {
			slot.resize(index + 1, Transform::IDENTITY);
		}
		slot[index] = transform;
	}
}

use crate::settings::TreeSettings;
use crate::ui::ModeController;
use bevy::prelude::*;
use morph_tree::{AnimationState, DatasetId, InstanceTransforms, MorphingTree};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Maps a spawned entity onto record `index` of a dataset.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleInstance {
	pub dataset: DatasetId,
	pub index: usize,
}

fn needle_material() -> StandardMaterial {
	StandardMaterial {
		base_color: Color::srgb(0.016, 0.24, 0.16),
		perceptual_roughness: 0.4,
		metallic: 0.6,
		emissive: LinearRgba::rgb(0.01, 0.08, 0.04),
		..default()
	}
}

fn ornament_material() -> StandardMaterial {
	StandardMaterial {
		base_color: Color::srgb(1.0, 0.78, 0.25),
		perceptual_roughness: 0.05,
		metallic: 1.0,
		..default()
	}
}

/// Builds both datasets once and spawns one entity per particle.
pub fn setup_particles(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	settings: Res<TreeSettings>,
) {
	let mut rng = match settings.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	};

	let tree = match MorphingTree::build(settings.config.clone(), &mut rng) {
		Ok(tree) => tree,
		Err(e) => {
			log::error!("Failed to build morphing tree: {}", e);
			return;
		}
	};

	let state = tree.initial_state();
	let mut transforms = InstanceTransforms::with_capacity(
		tree.dataset(DatasetId::Needles).len(),
		tree.dataset(DatasetId::Ornaments).len(),
	);
	tree.evaluate(&state, &mut transforms);

	let needle_mesh = meshes.add(Cone::new(0.1, 0.8).mesh().resolution(4));
	let ornament_mesh = meshes.add(Sphere::new(0.25).mesh().uv(32, 18));
	let needle_material = materials.add(needle_material());
	let ornament_material = materials.add(ornament_material());

	for dataset in DatasetId::ALL {
		let (mesh, material) = match dataset {
			DatasetId::Needles => (&needle_mesh, &needle_material),
			DatasetId::Ornaments => (&ornament_mesh, &ornament_material),
		};

		log::info!("Spawning {} {} instances", transforms.get(dataset).len(), dataset.name());

		for (index, transform) in transforms.get(dataset).iter().enumerate() {
			commands.spawn((
				Mesh3d(mesh.clone()),
				MeshMaterial3d(material.clone()),
				*transform,
				ParticleInstance { dataset, index },
			));
		}
	}

	commands.insert_resource(state);
	commands.insert_resource(transforms);
	commands.insert_resource(tree);
}

/// Integrates progress for the current mode and poses every particle into the buffer.
pub fn animate_tree(
	time: Res<Time>,
	mode: Res<ModeController>,
	tree: Res<MorphingTree>,
	mut state: ResMut<AnimationState>,
	mut transforms: ResMut<InstanceTransforms>,
) {
	tree.frame(&mut state, mode.mode, time.delta_secs(), &mut *transforms);
}

/// Copies the buffered transforms onto the instance entities.
pub fn sync_instances(
	transforms: Res<InstanceTransforms>,
	mut instances: Query<(&ParticleInstance, &mut Transform)>,
) {
	for (instance, mut transform) in &mut instances {
		if let Some(pose) = transforms.get(instance.dataset).get(instance.index) {
			*transform = *pose;
		}
	}
}

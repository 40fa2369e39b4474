use bevy::prelude::*;

mod camera;
pub mod particles;
pub mod settings;
pub mod ui;

use morph_tree::{MorphingTree, TreeConfig};
use settings::TreeSettings;
use ui::ModeController;

pub use camera::OrbitController;

pub use morph_tree;

pub struct MorphTreePlugin {
	pub config: TreeConfig,
	pub seed: Option<u64>,
}

impl Plugin for MorphTreePlugin {
	fn build(&self, app: &mut App) {
		app.insert_resource(ClearColor(Color::BLACK))
			.insert_resource(ModeController::new(self.config.initial_mode))
			.insert_resource(TreeSettings { config: self.config.clone(), seed: self.seed })
			.add_systems(
				Startup,
				(
					camera::setup_camera,
					setup_lighting,
					ui::setup_mode_buttons,
					particles::setup_particles,
				),
			)
			.add_systems(
				Update,
				(
					ui::handle_mode_buttons,
					ui::handle_mode_keys,
					ui::update_button_styles,
					camera::orbit_camera,
					(particles::animate_tree, particles::sync_instances)
						.chain()
						.run_if(resource_exists::<MorphingTree>),
				)
					.chain(),
			);
	}
}

fn setup_lighting(mut commands: Commands) {
	// Dim green ambient so the unlit sides of the canopy stay readable
	commands.insert_resource(AmbientLight {
		color: Color::srgb(0.0, 0.067, 0.0),
		brightness: 200.0,
		affects_lightmapped_meshes: true,
	});

	// Warm key light from above
	commands.spawn((
		SpotLight {
			color: Color::srgb(1.0, 0.94, 0.82),
			intensity: 4_000_000.0,
			range: 80.0,
			outer_angle: 0.3,
			inner_angle: 0.0,
			shadows_enabled: true,
			..default()
		},
		Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
	));

	// Emerald fill from behind
	commands.spawn((
		PointLight {
			color: Color::srgb(0.06, 0.36, 0.26),
			intensity: 800_000.0,
			range: 40.0,
			..default()
		},
		Transform::from_xyz(-10.0, 5.0, -10.0),
	));
}

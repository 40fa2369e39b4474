use crate::ui::ModeController;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use morph_tree::Mode;
use std::f32::consts::{PI, TAU};

/// Orbits the camera around the origin: drag to rotate, wheel to zoom, no panning.
#[derive(Component)]
pub struct OrbitController {
	pub radius: f32,
	pub yaw: f32,
	pub pitch: f32,
	pub min_distance: f32,
	pub max_distance: f32,
	pub sensitivity: f32,
	pub zoom_speed: f32,
	/// Radians per second while the tree is assembled
	pub auto_rotate_speed: f32,
}

impl OrbitController {
	/// Controller whose orbit passes through `position`.
	pub fn from_position(position: Vec3) -> Self {
		let radius = position.length();
		let pitch = (position.y / radius).asin();
		let yaw = position.x.atan2(position.z);

		Self {
			radius,
			yaw,
			pitch,
			min_distance: 8.0,
			max_distance: 30.0,
			sensitivity: 0.005,
			zoom_speed: 1.0,
			// one revolution every two minutes
			auto_rotate_speed: TAU / 120.0,
		}
	}

	pub fn position(&self) -> Vec3 {
		let horizontal = self.radius * self.pitch.cos();
		Vec3::new(
			horizontal * self.yaw.sin(),
			self.radius * self.pitch.sin(),
			horizontal * self.yaw.cos(),
		)
	}

	pub fn transform(&self) -> Transform {
		Transform::from_translation(self.position()).looking_at(Vec3::ZERO, Vec3::Y)
	}
}

pub fn setup_camera(mut commands: Commands) {
	let camera_pos = Vec3::new(0.0, 2.0, 20.0);
	let controller = OrbitController::from_position(camera_pos);

	log::info!("Setting up camera at position: {:?}, looking at the origin", camera_pos);

	commands.spawn((
		Camera3d::default(),
		controller.transform(),
		Projection::Perspective(PerspectiveProjection {
			fov: 45.0_f32.to_radians(),
			near: 0.1,
			far: 500.0,
			..default()
		}),
		controller,
	));
}

pub fn orbit_camera(
	mouse_buttons: Res<ButtonInput<MouseButton>>,
	mut mouse_motion: MessageReader<MouseMotion>,
	mut mouse_wheel: MessageReader<MouseWheel>,
	time: Res<Time>,
	mode: Res<ModeController>,
	mut query: Query<(&mut Transform, &mut OrbitController), With<Camera3d>>,
) {
	let Ok((mut transform, mut controller)) = query.single_mut() else {
		return;
	};

	// Drag to orbit
	let mut mouse_delta = Vec2::ZERO;
	for event in mouse_motion.read() {
		mouse_delta += event.delta;
	}
	if mouse_buttons.pressed(MouseButton::Left) {
		controller.yaw -= mouse_delta.x * controller.sensitivity;
		controller.pitch += mouse_delta.y * controller.sensitivity;
		controller.pitch = controller.pitch.clamp(-PI / 2.0 + 0.1, PI / 2.0 - 0.1);
	}

	// Wheel to zoom
	for event in mouse_wheel.read() {
		let lines = match event.unit {
			MouseScrollUnit::Line => event.y,
			MouseScrollUnit::Pixel => event.y / 100.0,
		};
		controller.radius -= lines * controller.zoom_speed;
	}
	controller.radius = controller.radius.clamp(controller.min_distance, controller.max_distance);

	if mode.mode == Mode::Assembled {
		controller.yaw += controller.auto_rotate_speed * time.delta_secs();
	}

	*transform = controller.transform();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_orbit_round_trips_start_position() {
		let start = Vec3::new(0.0, 2.0, 20.0);
		let controller = OrbitController::from_position(start);
		assert!(controller.position().abs_diff_eq(start, 1e-4));
	}

	#[test]
	fn test_camera_looks_at_origin() {
		let controller = OrbitController::from_position(Vec3::new(5.0, 3.0, -12.0));
		let transform = controller.transform();
		let forward = *transform.forward();
		let to_origin = (-transform.translation).normalize();
		assert!(forward.abs_diff_eq(to_origin, 1e-4));
	}
}

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Longest frame step fed to the damping formula, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Target shape selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
	Scattered,
	#[default]
	Assembled,
}

impl Mode {
	/// Progress value this mode drives toward.
	pub fn target(&self) -> f32 {
		match self {
			Mode::Scattered => 0.0,
			Mode::Assembled => 1.0,
		}
	}

	pub fn toggled(&self) -> Self {
		match self {
			Mode::Scattered => Mode::Assembled,
			Mode::Assembled => Mode::Scattered,
		}
	}
}

/// Classic smoothstep `3p² - 2p³` on the clamped input.
pub fn smoothstep(p: f32) -> f32 {
	let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
	p * p * (3.0 - 2.0 * p)
}

/// Maps a raw frame delta to a finite, non-negative value.
pub fn sanitize_delta(dt: f32) -> f32 {
	if dt.is_finite() && dt > 0.0 {
		dt
	} else {
		0.0
	}
}

/// Animation progress and clock shared by every dataset.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
	progress: f32,
	target: f32,
	elapsed: f32,
}

impl AnimationState {
	/// Starts settled on the given mode.
	pub fn new(initial_mode: Mode) -> Self {
		Self { progress: initial_mode.target(), target: initial_mode.target(), elapsed: 0.0 }
	}

	/// Overrides the starting progress, keeping the target.
	pub fn with_progress(mut self, progress: f32) -> Self {
		self.progress = if progress.is_nan() { self.target } else { progress.clamp(0.0, 1.0) };
		self
	}

	pub fn progress(&self) -> f32 {
		self.progress
	}

	pub fn target(&self) -> f32 {
		self.target
	}

	pub fn elapsed(&self) -> f32 {
		self.elapsed
	}

	/// Advances the clock and damps progress toward the mode's target.
	///
	/// Switching `mode` between calls redirects the target without resetting
	/// progress, so position stays continuous across a mid-transition flip.
	pub fn update(&mut self, mode: Mode, dt: f32, damping_rate: f32) {
		let sanitized = sanitize_delta(dt);
		if sanitized != dt {
			log::warn!("Ignoring invalid frame delta {}", dt);
		}

		self.target = mode.target();
		self.elapsed += sanitized;

		let step = sanitized.min(MAX_FRAME_DELTA);
		let blend = (step * damping_rate.max(0.0)).min(1.0);
		self.progress += (self.target - self.progress) * blend;

		if !self.progress.is_finite() {
			self.progress = self.target;
		}
		self.progress = self.progress.clamp(0.0, 1.0);
	}
}

impl Default for AnimationState {
	fn default() -> Self {
		Self::new(Mode::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DT: f32 = 1.0 / 60.0;

	#[test]
	fn test_smoothstep_properties() {
		assert_eq!(smoothstep(0.0), 0.0);
		assert_eq!(smoothstep(1.0), 1.0);
		assert_eq!(smoothstep(0.5), 0.5);

		let mut previous = smoothstep(0.0);
		for i in 1..=100 {
			let value = smoothstep(i as f32 / 100.0);
			assert!(value > previous);
			previous = value;
		}
	}

	#[test]
	fn test_initial_progress_matches_mode() {
		assert_eq!(AnimationState::new(Mode::Assembled).progress(), 1.0);
		assert_eq!(AnimationState::new(Mode::Scattered).progress(), 0.0);
	}

	#[test]
	fn test_progress_increases_monotonically_without_overshoot() {
		let mut state = AnimationState::new(Mode::Scattered);
		let mut previous = state.progress();

		for _ in 0..300 {
			state.update(Mode::Assembled, DT, 2.0);
			assert!(state.progress() > previous);
			assert!(state.progress() <= 1.0);
			previous = state.progress();
		}
	}

	#[test]
	fn test_reversal_is_continuous() {
		let mut state = AnimationState::new(Mode::Scattered);
		for _ in 0..40 {
			state.update(Mode::Assembled, DT, 2.0);
		}

		let before = state.progress();
		state.update(Mode::Scattered, DT, 2.0);
		let after = state.progress();

		assert!(after < before);
		// one step moves at most dt * rate of the remaining distance
		assert!(before - after <= before * DT * 2.0 + 1e-6);
	}

	#[test]
	fn test_scatter_then_assemble_scenario() {
		let mut state = AnimationState::new(Mode::Assembled);
		for _ in 0..600 {
			state.update(Mode::Scattered, DT, 2.0);
		}
		assert!(state.progress() < 0.01);

		for _ in 0..300 {
			state.update(Mode::Assembled, DT, 2.0);
		}
		assert!(state.progress() > 0.95);
	}

	#[test]
	fn test_invalid_deltas_are_sanitized() {
		let mut state = AnimationState::new(Mode::Scattered);
		state.update(Mode::Assembled, f32::NAN, 2.0);
		state.update(Mode::Assembled, -1.0, 2.0);
		state.update(Mode::Assembled, f32::INFINITY, 2.0);
		assert_eq!(state.progress(), 0.0);
		assert_eq!(state.elapsed(), 0.0);

		// a long stall is bounded before damping
		state.update(Mode::Assembled, 10.0, 2.0);
		assert!((state.progress() - MAX_FRAME_DELTA * 2.0).abs() < 1e-6);
		assert_eq!(state.elapsed(), 10.0);
	}

	#[test]
	fn test_elapsed_never_decreases() {
		let mut state = AnimationState::default();
		let mut previous = state.elapsed();
		for dt in [DT, 0.0, -0.5, DT, f32::NAN, 0.1] {
			state.update(Mode::Assembled, dt, 2.0);
			assert!(state.elapsed() >= previous);
			previous = state.elapsed();
		}
	}

	#[test]
	fn test_with_progress_clamps() {
		assert_eq!(AnimationState::new(Mode::Scattered).with_progress(1.7).progress(), 1.0);
		assert_eq!(AnimationState::new(Mode::Assembled).with_progress(f32::NAN).progress(), 1.0);
	}

	#[test]
	fn test_mode_toggle() {
		assert_eq!(Mode::Scattered.toggled(), Mode::Assembled);
		assert_eq!(Mode::Assembled.toggled(), Mode::Scattered);
	}
}

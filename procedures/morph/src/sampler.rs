//! Random point sampling for the two endpoint shapes.
//!
//! Every sampler takes the generator explicitly so callers decide between
//! ambient entropy and a seeded stream.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Uniform random value in `[min, max)`. A collapsed band returns `min`.
pub fn sample_in_range<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
	min + rng.gen::<f32>() * (max - min)
}

/// Random point inside a solid sphere centered at the origin.
///
/// Volumetrically uniform: the polar angle comes from the inverse cosine of a
/// uniform value on [-1, 1] and the distance from the cube root of a uniform value.
pub fn sample_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
	if !(radius.is_finite() && radius > 0.0) {
		return Vec3::ZERO;
	}

	let theta = TAU * rng.gen::<f32>();
	let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
	let r = radius * rng.gen::<f32>().cbrt();

	let sin_phi = phi.sin();
	Vec3::new(r * sin_phi * theta.cos(), r * sin_phi * theta.sin(), r * phi.cos())
}

/// Shell radius of the cone at a normalized height (0 = base, 1 = apex).
pub fn cone_radius(max_radius: f32, y_norm: f32) -> f32 {
	max_radius * (1.0 - y_norm.clamp(0.0, 1.0))
}

/// Point at distance `radius` from the vertical axis, at azimuth `theta`,
/// at the height that `y_norm` maps to on a cone of `height` centered vertically.
pub fn cone_point(height: f32, y_norm: f32, radius: f32, theta: f32) -> Vec3 {
	let y = (y_norm.clamp(0.0, 1.0) - 0.5) * height;
	Vec3::new(radius * theta.cos(), y, radius * theta.sin())
}

/// Random point on the cone shell at the given normalized height.
///
/// Scale the horizontal components by a secondary random factor for an interior fill.
pub fn sample_cone<R: Rng + ?Sized>(
	rng: &mut R,
	height: f32,
	max_radius: f32,
	y_norm: f32,
) -> Vec3 {
	if !(height.is_finite() && height > 0.0) || !(max_radius.is_finite() && max_radius >= 0.0) {
		return Vec3::ZERO;
	}

	let theta = rng.gen::<f32>() * TAU;
	cone_point(height, y_norm, cone_radius(max_radius, y_norm), theta)
}

/// Height fraction in [0, 1] drawn as `u^exponent`; exponents below one pull toward the base.
pub fn biased_height_fraction<R: Rng + ?Sized>(rng: &mut R, exponent: f32) -> f32 {
	rng.gen::<f32>().powf(exponent).clamp(0.0, 1.0)
}

/// Three independent tumble angles in [0, π].
pub fn sample_rotation_seed<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
	Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, rng.gen::<f32>() * PI)
}

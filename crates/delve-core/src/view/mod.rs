//! First-person view pipeline
//!
//! Turns a discrete player pose into a camera, and a camera plus level grid
//! into per-column raycast results. Everything here is pure and free of
//! randomness: re-rendering the same frame yields identical results.

mod camera;
mod raycast;

pub use camera::{Camera, DEFAULT_FACING_ANGLES, PlayerPose};
pub use raycast::{HitKind, RayHit, cast_ray, cast_ray_to};

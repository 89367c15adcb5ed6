//! First-person raycaster over flat line-segment geometry.
//!
//! Each screen column casts one ray from the viewer, takes the nearest wall hit
//! and shades a full-height line by distance.

pub mod camera;
pub mod caster;
pub mod config;
pub mod controller;
pub mod framebuffer;
pub mod geometry;
pub mod renderer;
pub mod vectors;
pub mod world;

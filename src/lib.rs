//! A first-person raycaster over a small tile grid.
//!
//! The library holds the simulation and the ray caster; windowing lives in the `gridcast` binary
//! behind the `sdl` feature.

pub mod game;
pub mod map;
pub mod player;
pub mod ray;
pub mod surface;

// dimensions of screen
pub const WIDTH: usize = 1024;
pub const HEIGHT: usize = 512;

//! This is a plugin for Bevy game engine to store levels as grids of typed
//! tiles and to path non-player characters across them with A*
//!

pub mod bundle;
pub mod pathfinding;
pub mod plugin;
pub mod tiles;

pub mod prelude;

//! Tiles are the building blocks of a level.
//!
//! The world is divided into a series of Subsections, each a fixed `WxH` grid
//! of typed Tiles indexed from the top-left corner of the subsection. Only the
//! type of a tile decides whether actors can walk across it, the rest of its
//! state is visual (variant) or gameplay bookkeeping (spawn points, pickups).
//!
//! Definitions:
//!
//! * Subsection - a `WxH` grid of tiles stored row-major, index `y * W + x`
//!
//! ```text
//!  ___________
//! |__|__|__|__|
//! |__|__|__|__|
//! |__|__|__|__|
//! ```
//!
//! * Tile - a single cell, built from the descriptor of its type whenever the
//! type of a slot changes
//! * Variant - which of the sprites of a type a tile shows, Fire tiles cycle
//! through theirs on a timer
//! * Spawn point - a tile where the hero (at most one per subsection) or an
//! enemy is placed when the level loads
//! * Packed format - the on-disk representation of a subsection, one `u16`
//! word per tile
//!

pub mod grid;
pub mod persistence;
pub mod subsection;
pub mod tile;
pub mod tile_type;
pub mod world;

//! `use bevy_subsection_tiles_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::tiles::{
	grid::*, persistence::*, subsection::*, tile::*, tile_type::*, world::*, *,
};

#[doc(hidden)]
pub use crate::pathfinding::{path_node::*, pathfinder::*, *};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{path_layer::*, tile_layer::*, *},
};

//! Spawning a subsection gives its entity the tiles and a pathfinder bound
//! to them
//!

use std::path::Path;

use crate::prelude::*;
use bevy::prelude::*;

/// Components of a navigable subsection
#[derive(Bundle)]
pub struct SubsectionBundle {
	/// Position of the subsection in the world
	subsection_id: SubsectionID,
	/// The tiles
	subsection: Subsection,
	/// Route calculator for the tiles
	pathfinder: Pathfinder,
}

impl SubsectionBundle {
	/// Create a new instance of [SubsectionBundle] holding an empty level
	pub fn new(subsection_id: SubsectionID, dimensions: GridDimensions) -> Self {
		SubsectionBundle::from_subsection(subsection_id, Subsection::new(dimensions))
	}
	/// Create a new instance of [SubsectionBundle] from a packed subsection
	/// file, if the file cannot be used an empty level is created instead
	pub fn new_from_disk<P: AsRef<Path>>(
		subsection_id: SubsectionID,
		dimensions: GridDimensions,
		path: P,
	) -> Self {
		let mut subsection = Subsection::new(dimensions);
		subsection.load(path);
		SubsectionBundle::from_subsection(subsection_id, subsection)
	}
	/// Create a new instance of [SubsectionBundle] around existing tiles
	pub fn from_subsection(subsection_id: SubsectionID, subsection: Subsection) -> Self {
		let pathfinder = Pathfinder::new(&subsection);
		SubsectionBundle {
			subsection_id,
			subsection,
			pathfinder,
		}
	}
	/// Get the tiles
	pub fn get_subsection(&self) -> &Subsection {
		&self.subsection
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn new_bundle() {
		let bundle = SubsectionBundle::new(SubsectionID::new(0, 0), GridDimensions::new(16, 4, 3));
		assert_eq!(12, bundle.get_subsection().get_tiles().len());
		assert_eq!(PathfinderState::Idle, bundle.pathfinder.get_state());
	}
	#[test]
	fn missing_file_is_empty_level() {
		let bundle = SubsectionBundle::new_from_disk(
			SubsectionID::new(0, 0),
			GridDimensions::new(16, 4, 3),
			"no/such/subsection.bin",
		);
		for tile in bundle.get_subsection().get_tiles() {
			assert_eq!(TileType::Ground, tile.get_tile_type());
		}
	}
}

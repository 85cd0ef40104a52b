//! The world is a `columns x rows` grid of equally sized subsections. Each
//! subsection is identified by its `(column, row)` [SubsectionID] and the
//! world has its origin in the top left corner of subsection `(0, 0)`, with
//! `y` growing downwards just like the tile grid inside a subsection:
//!
//! ```text
//!  (0,0)______________________________
//!      |          |          |          |
//!      |  (0, 0)  |  (1, 0)  |  (2, 0)  |
//!      |__________|__________|__________|
//!      |          |          |          |
//!      |  (0, 1)  |  (1, 1)  |  (2, 1)  |
//!      |__________|__________|__________|
//! ```
//!
//! Navigation never crosses a subsection boundary, the world only maps
//! positions to subsections and loads them from disk.

use std::collections::BTreeMap;
use std::path::Path;

use crate::prelude::*;
use bevy::prelude::*;

/// Unique ID of a subsection
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(
	Component, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect,
)]
pub struct SubsectionID((u32, u32));

impl SubsectionID {
	/// Create a new instance of [SubsectionID]
	pub fn new(column: u32, row: u32) -> Self {
		SubsectionID((column, row))
	}
	/// Get the subsection `(column, row)` tuple
	pub fn get(&self) -> (u32, u32) {
		self.0
	}
	/// Get the subsection column
	pub fn get_column(&self) -> u32 {
		self.0 .0
	}
	/// Get the subsection row
	pub fn get_row(&self) -> u32 {
		self.0 .1
	}
	/// Name of the packed file the subsection is stored in
	pub fn get_file_name(&self) -> String {
		format!("{}_{}.bin", self.get_column(), self.get_row())
	}
}

/// Direction of a neighbouring subsection
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub enum Ordinal {
	/// Row above
	North,
	/// Column to the right
	East,
	/// Row below
	South,
	/// Column to the left
	West,
}

/// The layout of subsections making up the world
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Resource, Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub struct WorldDimensions {
	/// Number of subsections along the `x` axis
	subsection_columns: u32,
	/// Number of subsections along the `y` axis
	subsection_rows: u32,
	/// Dimensions shared by every subsection
	grid: GridDimensions,
}

impl WorldDimensions {
	/// Create a new instance of [WorldDimensions]
	pub fn new(subsection_columns: u32, subsection_rows: u32, grid: GridDimensions) -> Self {
		if subsection_columns == 0 || subsection_rows == 0 {
			panic!(
				"World of `({}, {})` subsections cannot hold any tiles",
				subsection_columns, subsection_rows
			);
		}
		WorldDimensions {
			subsection_columns,
			subsection_rows,
			grid,
		}
	}
	/// Number of subsections in a row of the world
	pub fn get_subsection_columns(&self) -> u32 {
		self.subsection_columns
	}
	/// Number of subsections in a column of the world
	pub fn get_subsection_rows(&self) -> u32 {
		self.subsection_rows
	}
	/// Grid dimensions of each subsection
	pub fn get_grid_dimensions(&self) -> &GridDimensions {
		&self.grid
	}
	/// Pixel `(width, height)` of the whole world
	pub fn get_pixel_size(&self) -> Vec2 {
		self.grid.get_pixel_size()
			* Vec2::new(self.subsection_columns as f32, self.subsection_rows as f32)
	}
	/// Find the subsection containing a world position, [None] if the
	/// position is outside of the world
	pub fn get_subsection_id_from_xy(&self, position: Vec2) -> Option<SubsectionID> {
		let world = self.get_pixel_size();
		if position.x < 0.0 || position.y < 0.0 || position.x >= world.x || position.y >= world.y
		{
			error!(
				"Position is out of bounds of WorldDimensions, x {}, y {}, cannot calculate SubsectionID",
				position.x, position.y
			);
			return None;
		}
		let size = self.grid.get_pixel_size();
		let column = (position.x / size.x).floor() as u32;
		let row = (position.y / size.y).floor() as u32;
		Some(SubsectionID::new(
			column.min(self.subsection_columns - 1),
			row.min(self.subsection_rows - 1),
		))
	}
	/// World position of the top left corner of a subsection
	pub fn get_subsection_corner_xy(&self, subsection_id: SubsectionID) -> Vec2 {
		let size = self.grid.get_pixel_size();
		Vec2::new(
			subsection_id.get_column() as f32 * size.x,
			subsection_id.get_row() as f32 * size.y,
		)
	}
	/// From a world position find the subsection and the index of the tile
	/// within it
	pub fn get_subsection_and_tile_index_from_xy(
		&self,
		position: Vec2,
	) -> Option<(SubsectionID, usize)> {
		let subsection_id = self.get_subsection_id_from_xy(position)?;
		let local = position - self.get_subsection_corner_xy(subsection_id);
		let coordinates = self.grid.get_coordinates_for_position(local);
		// a position a hair under the far edge can floor onto the next tile
		let coordinates = TileCoordinates::new(
			coordinates
				.get_x()
				.min(self.grid.get_horizontal_tile_count() as i32 - 1),
			coordinates
				.get_y()
				.min(self.grid.get_vertical_tile_count() as i32 - 1),
		);
		Some((
			subsection_id,
			self.grid.get_index_for_coordinates(coordinates),
		))
	}
	/// World position of the centre of a tile, [None] if the subsection or
	/// tile lies outside of the world
	pub fn get_xy_from_subsection_tile(
		&self,
		subsection_id: SubsectionID,
		index: usize,
	) -> Option<Vec2> {
		if subsection_id.get_column() >= self.subsection_columns
			|| subsection_id.get_row() >= self.subsection_rows
			|| index >= self.grid.get_tile_count()
		{
			return None;
		}
		let local = self
			.grid
			.get_position_for_coordinates(self.grid.get_coordinates_for_index(index));
		Some(self.get_subsection_corner_xy(subsection_id) + local)
	}
	/// From an [Ordinal] get the ID of a neighbouring subsection, [None] if
	/// it would be outside of the world
	pub fn get_subsection_id_from_ordinal(
		&self,
		ordinal: Ordinal,
		subsection_id: &SubsectionID,
	) -> Option<SubsectionID> {
		let (column, row) = subsection_id.get();
		match ordinal {
			Ordinal::North => row.checked_sub(1).map(|row| SubsectionID::new(column, row)),
			Ordinal::East => {
				if column + 1 < self.subsection_columns {
					Some(SubsectionID::new(column + 1, row))
				} else {
					None
				}
			}
			Ordinal::South => {
				if row + 1 < self.subsection_rows {
					Some(SubsectionID::new(column, row + 1))
				} else {
					None
				}
			}
			Ordinal::West => column
				.checked_sub(1)
				.map(|column| SubsectionID::new(column, row)),
		}
	}
	/// A subsection has up to four neighbours, listed in the order north,
	/// east, south, west
	pub fn get_ids_of_neighbouring_subsections(
		&self,
		subsection_id: &SubsectionID,
	) -> Vec<SubsectionID> {
		[Ordinal::North, Ordinal::East, Ordinal::South, Ordinal::West]
			.iter()
			.filter_map(|ordinal| self.get_subsection_id_from_ordinal(*ordinal, subsection_id))
			.collect()
	}
	/// Load every subsection of the world from `{column}_{row}.bin` files
	/// within `directory`. A missing or broken file produces an empty level
	/// for that subsection
	pub fn load_subsections(&self, directory: &Path) -> BTreeMap<SubsectionID, Subsection> {
		let mut subsections = BTreeMap::new();
		for row in 0..self.subsection_rows {
			for column in 0..self.subsection_columns {
				let id = SubsectionID::new(column, row);
				let mut subsection = Subsection::new(self.grid);
				subsection.load(directory.join(id.get_file_name()));
				subsections.insert(id, subsection);
			}
		}
		subsections
	}
	/// Save subsections into `directory` as `{column}_{row}.bin` files.
	/// Returns `false` if any of them failed to save
	pub fn save_subsections(
		&self,
		directory: &Path,
		subsections: &BTreeMap<SubsectionID, Subsection>,
	) -> bool {
		let mut all_saved = true;
		for (id, subsection) in subsections.iter() {
			all_saved &= subsection.save(directory.join(id.get_file_name()));
		}
		all_saved
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn subsection_id_from_xy() {
		let world = WorldDimensions::new(3, 2, GridDimensions::new(16, 4, 3));
		// each subsection is 64x48 pixels
		let result = world.get_subsection_id_from_xy(Vec2::new(130.0, 50.0));
		let actual = Some(SubsectionID::new(2, 1));
		assert_eq!(actual, result);
	}
	#[test]
	fn subsection_id_from_xy_outside() {
		let world = WorldDimensions::new(3, 2, GridDimensions::new(16, 4, 3));
		assert!(world.get_subsection_id_from_xy(Vec2::new(-1.0, 0.0)).is_none());
		assert!(world.get_subsection_id_from_xy(Vec2::new(0.0, 96.0)).is_none());
	}
	#[test]
	fn subsection_corner() {
		let world = WorldDimensions::new(3, 2, GridDimensions::new(16, 4, 3));
		let result = world.get_subsection_corner_xy(SubsectionID::new(1, 1));
		let actual = Vec2::new(64.0, 48.0);
		assert_eq!(actual, result);
	}
	#[test]
	fn subsection_and_tile_from_xy() {
		let world = WorldDimensions::new(3, 2, GridDimensions::new(16, 4, 3));
		let result = world.get_subsection_and_tile_index_from_xy(Vec2::new(100.0, 70.0));
		// local position (36, 22) is tile (2, 1)
		let actual = Some((SubsectionID::new(1, 1), 6));
		assert_eq!(actual, result);
	}
	#[test]
	fn xy_from_subsection_tile() {
		let world = WorldDimensions::new(3, 2, GridDimensions::new(16, 4, 3));
		let result = world.get_xy_from_subsection_tile(SubsectionID::new(1, 0), 5);
		let actual = Some(Vec2::new(88.0, 24.0));
		assert_eq!(actual, result);
		assert!(world
			.get_xy_from_subsection_tile(SubsectionID::new(3, 0), 0)
			.is_none());
	}
	#[test]
	fn neighbours_of_corner() {
		let world = WorldDimensions::new(3, 2, GridDimensions::new(16, 4, 3));
		let result = world.get_ids_of_neighbouring_subsections(&SubsectionID::new(0, 0));
		let actual = vec![SubsectionID::new(1, 0), SubsectionID::new(0, 1)];
		assert_eq!(actual, result);
	}
	#[test]
	fn neighbours_of_middle() {
		let world = WorldDimensions::new(3, 3, GridDimensions::new(16, 4, 3));
		let result = world.get_ids_of_neighbouring_subsections(&SubsectionID::new(1, 1));
		let actual = vec![
			SubsectionID::new(1, 0),
			SubsectionID::new(2, 1),
			SubsectionID::new(1, 2),
			SubsectionID::new(0, 1),
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn neighbours_of_far_corner() {
		let world = WorldDimensions::new(3, 2, GridDimensions::new(16, 4, 3));
		let result = world.get_ids_of_neighbouring_subsections(&SubsectionID::new(2, 1));
		let actual = vec![SubsectionID::new(2, 0), SubsectionID::new(1, 1)];
		assert_eq!(actual, result);
	}
	#[test]
	fn file_name() {
		assert_eq!("4_7.bin", SubsectionID::new(4, 7).get_file_name());
	}
	#[test]
	#[should_panic]
	fn empty_world() {
		WorldDimensions::new(0, 2, GridDimensions::new(16, 4, 3));
	}
}

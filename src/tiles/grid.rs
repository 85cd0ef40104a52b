//! Addressing of the tiles within a [crate::prelude::Subsection].
//!
//! A subsection is a `WxH` grid of tiles stored row-major, so a tile can be
//! referred to by its linear index, by its `(x, y)` coordinates or by a pixel
//! position relative to the top-left corner of the subsection:
//!
//! ```text
//!   x→  0    1    2    3
//! y  ___________________
//! ↓ |  0 |  1 |  2 |  3 |
//! 0 |____|____|____|____|
//!   |  4 |  5 |  6 |  7 |
//! 1 |____|____|____|____|
//!   |  8 |  9 | 10 | 11 |
//! 2 |____|____|____|____|
//! ```
//!
//! All conversions are pure and only depend on the [GridDimensions].

use bevy::prelude::*;

/// The `(x, y)` coordinates of a tile within a subsection grid. The values are
/// signed so that a position to the left of or above the grid produces
/// coordinates that fail [GridDimensions::validate_coordinates] rather than
/// wrapping around
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct TileCoordinates((i32, i32));

impl TileCoordinates {
	/// Create a new instance of [TileCoordinates]
	pub fn new(x: i32, y: i32) -> Self {
		TileCoordinates((x, y))
	}
	/// Get the `(x, y)` tuple
	pub fn get(&self) -> (i32, i32) {
		self.0
	}
	/// Get the column
	pub fn get_x(&self) -> i32 {
		self.0 .0
	}
	/// Get the row
	pub fn get_y(&self) -> i32 {
		self.0 .1
	}
	/// Number of orthogonal steps between two coordinates, `|Δx| + |Δy|`
	pub fn manhattan_distance(&self, other: &TileCoordinates) -> u32 {
		self.get_x().abs_diff(other.get_x()) + self.get_y().abs_diff(other.get_y())
	}
	/// The four orthogonal neighbours in the order up, down, left, right.
	///
	/// Neighbours are not validated against any grid so callers should
	/// filter them with [GridDimensions::validate_coordinates]
	pub fn get_orthogonal_neighbours(&self) -> [TileCoordinates; 4] {
		let (x, y) = self.get();
		[
			TileCoordinates::new(x, y - 1), // up
			TileCoordinates::new(x, y + 1), // down
			TileCoordinates::new(x - 1, y), // left
			TileCoordinates::new(x + 1, y), // right
		]
	}
}

/// Size of a subsection grid and the pixel size of each tile
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub struct GridDimensions {
	/// Length in pixels of the side of a square tile
	tile_size: u32,
	/// Number of tiles along the `x` axis (`W`)
	horizontal_tile_count: u32,
	/// Number of tiles along the `y` axis (`H`)
	vertical_tile_count: u32,
}

impl GridDimensions {
	/// Create a new instance of [GridDimensions]. A zero sized grid or tile
	/// cannot hold any tiles and panics
	pub fn new(tile_size: u32, horizontal_tile_count: u32, vertical_tile_count: u32) -> Self {
		if tile_size == 0 {
			panic!("Tile size must be greater than zero");
		}
		if horizontal_tile_count == 0 || vertical_tile_count == 0 {
			panic!(
				"Grid dimensions `({}, {})` cannot hold any tiles",
				horizontal_tile_count, vertical_tile_count
			);
		}
		GridDimensions {
			tile_size,
			horizontal_tile_count,
			vertical_tile_count,
		}
	}
	/// Pixel length of a tile side
	pub fn get_tile_size(&self) -> u32 {
		self.tile_size
	}
	/// Number of tiles in a row
	pub fn get_horizontal_tile_count(&self) -> u32 {
		self.horizontal_tile_count
	}
	/// Number of tiles in a column
	pub fn get_vertical_tile_count(&self) -> u32 {
		self.vertical_tile_count
	}
	/// Total number of tiles in the grid
	pub fn get_tile_count(&self) -> usize {
		(self.horizontal_tile_count * self.vertical_tile_count) as usize
	}
	/// The `(width, height)` of the grid in pixels
	pub fn get_pixel_size(&self) -> Vec2 {
		Vec2::new(
			(self.horizontal_tile_count * self.tile_size) as f32,
			(self.vertical_tile_count * self.tile_size) as f32,
		)
	}
	/// Convert a linear index into grid coordinates.
	///
	/// The index must lie within the grid, an index beyond the final tile is
	/// a programming error
	pub fn get_coordinates_for_index(&self, index: usize) -> TileCoordinates {
		debug_assert!(
			index < self.get_tile_count(),
			"Index {} is out of bounds of a grid with {} tiles",
			index,
			self.get_tile_count()
		);
		let width = self.horizontal_tile_count as usize;
		let x = index % width;
		let y = (index - x) / width;
		TileCoordinates::new(x as i32, y as i32)
	}
	/// Convert grid coordinates into a linear index. The coordinates are not
	/// validated, use [GridDimensions::validate_coordinates] first
	pub fn get_index_for_coordinates(&self, coordinates: TileCoordinates) -> usize {
		(coordinates.get_x() + coordinates.get_y() * self.horizontal_tile_count as i32) as usize
	}
	/// Find the coordinates of the tile containing a pixel position. Each
	/// axis is floored so a position on a tile boundary belongs to the tile
	/// to its right/below
	pub fn get_coordinates_for_position(&self, position: Vec2) -> TileCoordinates {
		let size = self.tile_size as f32;
		TileCoordinates::new(
			(position.x / size).floor() as i32,
			(position.y / size).floor() as i32,
		)
	}
	/// Find the linear index of the tile containing a pixel position
	pub fn get_index_for_position(&self, position: Vec2) -> usize {
		self.get_index_for_coordinates(self.get_coordinates_for_position(position))
	}
	/// Pixel position of the centre of a tile
	pub fn get_position_for_coordinates(&self, coordinates: TileCoordinates) -> Vec2 {
		let size = self.tile_size as f32;
		Vec2::new(
			coordinates.get_x() as f32 * size + size / 2.0,
			coordinates.get_y() as f32 * size + size / 2.0,
		)
	}
	/// Whether the coordinates lie within the grid
	pub fn validate_coordinates(&self, coordinates: TileCoordinates) -> bool {
		coordinates.get_x() >= 0
			&& coordinates.get_x() < self.horizontal_tile_count as i32
			&& coordinates.get_y() >= 0
			&& coordinates.get_y() < self.vertical_tile_count as i32
	}
	/// From a `ron` file generate the [GridDimensions]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: String) -> Self {
		let file = std::fs::File::open(path).expect("Failed opening GridDimensions file");
		let dimensions: GridDimensions = match ron::de::from_reader(file) {
			Ok(dimensions) => dimensions,
			Err(e) => panic!("Failed deserializing GridDimensions: {}", e),
		};
		GridDimensions::new(
			dimensions.tile_size,
			dimensions.horizontal_tile_count,
			dimensions.vertical_tile_count,
		)
	}
}

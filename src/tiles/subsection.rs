//! A [Subsection] is a fixed size rectangular region of the world made up of
//! a dense row-major grid of [Tile]s. Every slot holds a tile at all times,
//! editing a slot either tweaks the tile in place or replaces it with a
//! freshly built one.
//!
//! The subsection is also the keeper of the spawn point invariants:
//!
//! * at most one tile is the hero spawn point
//! * a tile is never both a hero and an enemy spawn point
//!

use std::path::Path;
use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// A grid of tiles
#[derive(Component, Clone, Debug, Reflect)]
pub struct Subsection {
	/// Size of the grid
	dimensions: GridDimensions,
	/// Row-major tiles, `y * width + x`
	tiles: Vec<Tile>,
	/// Identity handed to the next tile built
	next_tile_id: u64,
}

impl Subsection {
	/// Create a new instance of [Subsection] filled with [TileType::Ground]
	pub fn new(dimensions: GridDimensions) -> Self {
		let mut subsection = Subsection {
			dimensions,
			tiles: Vec::with_capacity(dimensions.get_tile_count()),
			next_tile_id: 0,
		};
		for index in 0..dimensions.get_tile_count() {
			let tile = subsection.build_tile(index, TileType::Ground, 0);
			subsection.tiles.push(tile);
		}
		subsection
	}
	/// Create a new instance of [Subsection] from a list of decoded tiles.
	/// The list must describe every slot of the grid
	pub fn from_records(dimensions: GridDimensions, records: &[TileRecord]) -> Self {
		let mut subsection = Subsection::new(dimensions);
		subsection.apply_records(records);
		subsection
	}
	/// Get the size of the grid
	pub fn get_dimensions(&self) -> &GridDimensions {
		&self.dimensions
	}
	/// Get all tiles in row-major order
	pub fn get_tiles(&self) -> &[Tile] {
		&self.tiles
	}
	/// Decoded description of every tile in row-major order
	pub fn to_records(&self) -> Vec<TileRecord> {
		self.tiles.iter().map(|t| t.to_record()).collect()
	}
	/// The type factory, builds a tile with a fresh identity
	fn build_tile(&mut self, index: usize, tile_type: TileType, variant: u8) -> Tile {
		let id = TileId::new(self.next_tile_id);
		self.next_tile_id += 1;
		Tile::new(id, index, tile_type, variant)
	}
	/// Panics when `index` lies outside of the grid
	fn check_index(&self, index: usize) {
		if index >= self.tiles.len() {
			panic!(
				"Cannot access tile, index out of bounds. Asked for index {}, subsection holds {} tiles",
				index,
				self.tiles.len()
			);
		}
	}
	/// Get a tile by its slot index, panics if the index is outside of the grid
	pub fn get_tile_for_index(&self, index: usize) -> &Tile {
		self.check_index(index);
		&self.tiles[index]
	}
	/// Get the tile at grid coordinates, panics if the coordinates are outside
	/// of the grid
	pub fn get_tile_for_coordinates(&self, coordinates: TileCoordinates) -> &Tile {
		if !self.dimensions.validate_coordinates(coordinates) {
			panic!(
				"Cannot access tile, coordinates {:?} are out of bounds of a {}x{} subsection",
				coordinates.get(),
				self.dimensions.get_horizontal_tile_count(),
				self.dimensions.get_vertical_tile_count()
			);
		}
		&self.tiles[self.dimensions.get_index_for_coordinates(coordinates)]
	}
	/// Get the tile containing a pixel position relative to the top-left
	/// corner of the subsection, panics if the position is outside of the grid
	pub fn get_tile_for_position(&self, position: Vec2) -> &Tile {
		self.get_tile_for_coordinates(self.dimensions.get_coordinates_for_position(position))
	}
	/// Slot index of the tile containing a pixel position. The position is
	/// not validated
	pub fn get_tile_index_for_position(&self, position: Vec2) -> usize {
		self.dimensions.get_index_for_position(position)
	}
	/// Whether the coordinates lie within the subsection
	pub fn validate_coordinates(&self, coordinates: TileCoordinates) -> bool {
		self.dimensions.validate_coordinates(coordinates)
	}
	/// Grid coordinates of a tile
	pub fn get_coordinates_for_tile(&self, tile: &Tile) -> TileCoordinates {
		self.dimensions.get_coordinates_for_index(tile.get_index())
	}
	/// Change the type of a slot.
	///
	/// If the slot already holds a tile of `tile_type` only its variant is
	/// updated and the tile keeps its identity, otherwise the old tile is
	/// dropped and a new one is built in its place
	pub fn set_tile_type_at_index(
		&mut self,
		index: usize,
		tile_type: TileType,
		variant: u8,
	) -> &Tile {
		self.check_index(index);
		if self.tiles[index].get_tile_type() == tile_type {
			self.tiles[index].set_variant(variant);
		} else {
			let tile = self.build_tile(index, tile_type, variant);
			self.tiles[index] = tile;
		}
		&self.tiles[index]
	}
	/// Toggle the hero spawn point on a tile.
	///
	/// When the tile is not already the hero spawn point every other tile has
	/// its hero spawn flag cleared and this tile stops being an enemy spawn
	/// point
	pub fn set_hero_spawn_point_for_tile(&mut self, index: usize) {
		self.check_index(index);
		if self.tiles[index].is_hero_spawn_point() {
			self.tiles[index].set_hero_spawn_point(false);
		} else {
			self.place_hero_spawn_point(index);
		}
	}
	/// Make a tile the one and only hero spawn point
	fn place_hero_spawn_point(&mut self, index: usize) {
		for tile in self.tiles.iter_mut() {
			tile.set_hero_spawn_point(false);
		}
		let tile = &mut self.tiles[index];
		tile.set_hero_spawn_point(true);
		tile.set_enemy_spawn_point(false);
	}
	/// Toggle an enemy spawn point on a tile, a tile becoming an enemy spawn
	/// point stops being the hero spawn point
	pub fn set_enemy_spawn_point(&mut self, index: usize) {
		self.check_index(index);
		let tile = &mut self.tiles[index];
		if tile.is_enemy_spawn_point() {
			tile.set_enemy_spawn_point(false);
		} else {
			tile.set_enemy_spawn_point(true);
			tile.set_hero_spawn_point(false);
		}
	}
	/// Clear both spawn point flags of a tile
	pub fn deactivate_spawn_points_at_index(&mut self, index: usize) {
		self.check_index(index);
		let tile = &mut self.tiles[index];
		tile.set_hero_spawn_point(false);
		tile.set_enemy_spawn_point(false);
	}
	/// Slot index of the hero spawn point if one has been placed
	pub fn get_hero_spawn_point(&self) -> Option<usize> {
		self.tiles
			.iter()
			.position(|t| t.is_hero_spawn_point())
	}
	/// Slot indices of every enemy spawn point
	pub fn get_enemy_spawn_points(&self) -> Vec<usize> {
		self.tiles
			.iter()
			.filter(|t| t.is_enemy_spawn_point())
			.map(|t| t.get_index())
			.collect()
	}
	/// Place an item on a tile, returning any item it replaced
	pub fn set_pickup_at_index(&mut self, index: usize, pickup: Pickup) -> Option<Pickup> {
		self.check_index(index);
		self.tiles[index].set_pickup(Some(pickup))
	}
	/// Remove the item from a tile
	pub fn take_pickup_at_index(&mut self, index: usize) -> Option<Pickup> {
		self.check_index(index);
		self.tiles[index].set_pickup(None)
	}
	/// Reset to an empty level, every tile becomes variant `0` of
	/// [TileType::Ground] without any spawn point or pickup
	pub fn clear(&mut self) {
		for index in 0..self.tiles.len() {
			self.deactivate_spawn_points_at_index(index);
			self.take_pickup_at_index(index);
			self.set_tile_type_at_index(index, TileType::Ground, 0);
		}
	}
	/// Rebuild every tile from a list of decoded tiles.
	///
	/// Spawn points are replayed in row-major order so a list breaking the
	/// spawn invariants is repaired, the last hero spawn point wins and an
	/// enemy spawn flag wins over a hero spawn flag on the same tile
	pub fn apply_records(&mut self, records: &[TileRecord]) {
		if records.len() != self.tiles.len() {
			panic!(
				"Cannot apply {} tile records to a subsection holding {} tiles",
				records.len(),
				self.tiles.len()
			);
		}
		let mut hero_count = 0;
		for (index, record) in records.iter().enumerate() {
			let tile = self.build_tile(index, record.tile_type, record.variant);
			self.tiles[index] = tile;
			if record.is_enemy_spawn_point {
				if record.is_hero_spawn_point {
					warn!(
						"Tile {} is flagged as both a hero and an enemy spawn point, keeping the enemy spawn point",
						index
					);
				}
				self.tiles[index].set_enemy_spawn_point(true);
			} else if record.is_hero_spawn_point {
				hero_count += 1;
				self.place_hero_spawn_point(index);
			}
		}
		if hero_count > 1 {
			warn!(
				"Found {} hero spawn points, only the last one has been kept",
				hero_count
			);
		}
	}
	/// Advance the animation of self animating tiles, returns whether any
	/// variant changed
	pub fn tick_animations(&mut self, delta: Duration) -> bool {
		let mut changed = false;
		for tile in self.tiles.iter_mut().filter(|t| t.is_animated()) {
			changed |= tile.tick(delta);
		}
		changed
	}
	/// Write the subsection to disk in the packed binary format. A failed
	/// write is logged and `false` returned, nothing is retried
	pub fn save<P: AsRef<Path>>(&self, path: P) -> bool {
		let path = path.as_ref();
		match write_subsection_file(path, &self.to_records()) {
			Ok(()) => {
				debug!("Saved subsection to {:?}", path);
				true
			}
			Err(e) => {
				error!("Failed saving subsection to {:?}: {}", path, e);
				false
			}
		}
	}
	/// Replace every tile with those read from a packed binary file.
	///
	/// If the file cannot be used the subsection is reset to an empty level
	/// (see [Subsection::clear]) and `false` is returned
	pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
		let path = path.as_ref();
		match read_subsection_file(path, &self.dimensions) {
			Ok(records) => {
				self.apply_records(&records);
				debug!("Loaded subsection from {:?}", path);
				true
			}
			Err(e) => {
				warn!(
					"Unable to load subsection from {:?}, generating an empty level: {}",
					path, e
				);
				self.clear();
				false
			}
		}
	}
}

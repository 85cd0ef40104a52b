//! Conversions between tile indices, coordinates and pixel positions
//!

use bevy::prelude::*;
use bevy_subsection_tiles_plugin::prelude::*;

#[test]
fn index_round_trips_through_coordinates() {
	for (w, h) in [(1, 1), (4, 3), (16, 9), (7, 13)] {
		let dimensions = GridDimensions::new(32, w, h);
		for i in 0..dimensions.get_tile_count() {
			let coordinates = dimensions.get_coordinates_for_index(i);
			assert!(dimensions.validate_coordinates(coordinates));
			assert_eq!(i, dimensions.get_index_for_coordinates(coordinates));
		}
	}
}

#[test]
fn centre_of_tile_maps_back_to_tile() {
	let dimensions = GridDimensions::new(24, 6, 4);
	for i in 0..dimensions.get_tile_count() {
		let centre = dimensions.get_position_for_coordinates(dimensions.get_coordinates_for_index(i));
		assert_eq!(i, dimensions.get_index_for_position(centre));
	}
}

#[test]
fn subsection_lookups_by_position() {
	let mut subsection = Subsection::new(GridDimensions::new(16, 4, 3));
	subsection.set_tile_type_at_index(9, TileType::Bridge, 1);
	let index = subsection.get_tile_index_for_position(Vec2::new(17.0, 47.9));
	assert_eq!(9, index);
	let tile = subsection.get_tile_for_position(Vec2::new(17.0, 47.9));
	assert_eq!(TileType::Bridge, tile.get_tile_type());
	assert!(!subsection.validate_coordinates(TileCoordinates::new(1, 3)));
}

#[test]
fn world_position_to_subsection_tile() {
	let world = WorldDimensions::new(2, 2, GridDimensions::new(16, 4, 3));
	let (id, index) = world
		.get_subsection_and_tile_index_from_xy(Vec2::new(70.0, 60.0))
		.unwrap();
	assert_eq!(SubsectionID::new(1, 1), id);
	// local position (6, 12) is tile (0, 0)
	assert_eq!(0, index);
	let centre = world.get_xy_from_subsection_tile(id, index).unwrap();
	assert_eq!(Vec2::new(72.0, 56.0), centre);
}

//! Defines the Bevy [Plugin] for SubsectionTiles
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod path_layer;
pub mod tile_layer;

/// Tiles are edited before any route is calculated within a frame so a
/// search never sees a half applied edit
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Loading, saving and editing of tiles
	Edit,
	/// Route calculation
	Navigate,
}

/// Registers the events and systems for editing subsections and pathing
/// actors through them
pub struct SubsectionTilesPlugin;

impl Plugin for SubsectionTilesPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<SubsectionID>()
			.register_type::<WorldDimensions>()
			.register_type::<GridDimensions>()
			.register_type::<TileCoordinates>()
			.register_type::<TileType>()
			.register_type::<Subsection>()
			.register_type::<Pathfinder>()
			.register_type::<PathfinderState>()
			.register_type::<TileRoute>()
			.add_event::<tile_layer::EventSetTileType>()
			.add_event::<tile_layer::EventToggleHeroSpawn>()
			.add_event::<tile_layer::EventToggleEnemySpawn>()
			.add_event::<tile_layer::EventClearSubsection>()
			.add_event::<tile_layer::EventSaveSubsection>()
			.add_event::<tile_layer::EventLoadSubsection>()
			.add_event::<tile_layer::EventHeroSpawn>()
			.add_event::<tile_layer::EventEnemySpawn>()
			.add_event::<path_layer::EventPathRequest>()
			.configure_sets(Update, (OrderingSet::Edit, OrderingSet::Navigate).chain())
			.add_systems(
				Update,
				(
					(
						tile_layer::announce_new_subsections,
						tile_layer::process_subsection_loads,
						tile_layer::process_subsection_clears,
						tile_layer::process_tile_type_updates,
						tile_layer::process_spawn_toggles,
						tile_layer::process_subsection_saves,
						tile_layer::animate_tiles,
					)
						.chain()
						.in_set(OrderingSet::Edit),
					(
						path_layer::cleanup_finished_routes,
						path_layer::process_path_requests,
					)
						.chain()
						.in_set(OrderingSet::Navigate),
				),
			);
	}
}

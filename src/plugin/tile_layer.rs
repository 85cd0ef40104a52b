//! Logic for editing the tiles of a [Subsection] and moving subsections to
//! and from disk. When a subsection is spawned or loaded its spawn points
//! are announced so the game can position the hero and spawn enemies
//!

use std::path::{Path, PathBuf};

use crate::prelude::*;
use bevy::prelude::*;

/// Change the type and variant of a tile
#[derive(Event)]
pub struct EventSetTileType {
	/// Subsection the tile resides in
	subsection: SubsectionID,
	/// Slot of the tile
	index: usize,
	/// New type of the tile
	tile_type: TileType,
	/// New variant of the tile
	variant: u8,
}

impl EventSetTileType {
	/// Create a new instance of [EventSetTileType]
	#[cfg(not(tarpaulin_include))]
	pub fn new(subsection: SubsectionID, index: usize, tile_type: TileType, variant: u8) -> Self {
		EventSetTileType {
			subsection,
			index,
			tile_type,
			variant,
		}
	}
	/// Get the subsection
	#[cfg(not(tarpaulin_include))]
	pub fn get_subsection(&self) -> SubsectionID {
		self.subsection
	}
	/// Get the tile index
	#[cfg(not(tarpaulin_include))]
	pub fn get_index(&self) -> usize {
		self.index
	}
	/// Get the requested type
	#[cfg(not(tarpaulin_include))]
	pub fn get_tile_type(&self) -> TileType {
		self.tile_type
	}
	/// Get the requested variant
	#[cfg(not(tarpaulin_include))]
	pub fn get_variant(&self) -> u8 {
		self.variant
	}
}

/// Toggle the hero spawn point on a tile
#[derive(Event)]
pub struct EventToggleHeroSpawn {
	/// Subsection the tile resides in
	pub subsection: SubsectionID,
	/// Slot of the tile
	pub index: usize,
}

/// Toggle an enemy spawn point on a tile
#[derive(Event)]
pub struct EventToggleEnemySpawn {
	/// Subsection the tile resides in
	pub subsection: SubsectionID,
	/// Slot of the tile
	pub index: usize,
}

/// Reset a subsection to an empty level
#[derive(Event)]
pub struct EventClearSubsection {
	/// Subsection to clear
	pub subsection: SubsectionID,
}

/// Write a subsection to disk in the packed format
#[derive(Event)]
pub struct EventSaveSubsection {
	/// Subsection to save
	pub subsection: SubsectionID,
	/// File to write
	pub path: PathBuf,
}

/// Replace the tiles of a subsection with those of a packed file
#[derive(Event)]
pub struct EventLoadSubsection {
	/// Subsection to load into
	pub subsection: SubsectionID,
	/// File to read
	pub path: PathBuf,
}

/// Sent when a subsection with a hero spawn point is spawned or loaded
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EventHeroSpawn {
	/// Subsection the spawn point resides in
	pub subsection: SubsectionID,
	/// Slot of the spawn tile
	pub index: usize,
	/// Centre of the spawn tile relative to the top left of the subsection
	pub position: Vec2,
}

/// Sent for every enemy spawn point of a subsection spawned or loaded
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EventEnemySpawn {
	/// Subsection the spawn point resides in
	pub subsection: SubsectionID,
	/// Slot of the spawn tile
	pub index: usize,
	/// Centre of the spawn tile relative to the top left of the subsection
	pub position: Vec2,
}

/// Whether an event addressing `index` can be applied to the subsection
fn is_index_valid(subsection: &Subsection, id: SubsectionID, index: usize) -> bool {
	if index >= subsection.get_tiles().len() {
		warn!(
			"Ignoring tile event for index {} of subsection {:?}, it holds {} tiles",
			index,
			id.get(),
			subsection.get_tiles().len()
		);
		return false;
	}
	true
}

/// Centre of a tile relative to the top left of its subsection
fn tile_centre(subsection: &Subsection, index: usize) -> Vec2 {
	let dimensions = subsection.get_dimensions();
	dimensions.get_position_for_coordinates(dimensions.get_coordinates_for_index(index))
}

/// Read [EventLoadSubsection], replace the tiles of the subsection and
/// announce its spawn points
#[cfg(not(tarpaulin_include))]
pub fn process_subsection_loads(
	mut events: EventReader<EventLoadSubsection>,
	mut query: Query<(&SubsectionID, &mut Subsection, &mut Pathfinder)>,
	mut event_hero: EventWriter<EventHeroSpawn>,
	mut event_enemy: EventWriter<EventEnemySpawn>,
) {
	for event in events.read() {
		for (id, mut subsection, mut pathfinder) in query.iter_mut() {
			if *id != event.subsection {
				continue;
			}
			load_and_announce(
				*id,
				&mut subsection,
				&event.path,
				&mut event_hero,
				&mut event_enemy,
			);
			pathfinder.reset();
		}
	}
}

/// Announce the spawn points of subsections spawned this frame, such as
/// those created with [SubsectionBundle::new_from_disk]
#[cfg(not(tarpaulin_include))]
pub fn announce_new_subsections(
	query: Query<(&SubsectionID, &Subsection), Added<Subsection>>,
	mut event_hero: EventWriter<EventHeroSpawn>,
	mut event_enemy: EventWriter<EventEnemySpawn>,
) {
	for (id, subsection) in query.iter() {
		announce_spawn_points(*id, subsection, &mut event_hero, &mut event_enemy);
	}
}

/// Load a subsection and send spawn events for whatever level ended up in it
#[cfg(not(tarpaulin_include))]
fn load_and_announce(
	id: SubsectionID,
	subsection: &mut Subsection,
	path: &Path,
	event_hero: &mut EventWriter<EventHeroSpawn>,
	event_enemy: &mut EventWriter<EventEnemySpawn>,
) {
	if !subsection.load(path) {
		debug!("Subsection {:?} is an empty level", id.get());
	}
	announce_spawn_points(id, subsection, event_hero, event_enemy);
}

/// Send [EventHeroSpawn] and [EventEnemySpawn] for the spawn points of a
/// subsection
#[cfg(not(tarpaulin_include))]
fn announce_spawn_points(
	id: SubsectionID,
	subsection: &Subsection,
	event_hero: &mut EventWriter<EventHeroSpawn>,
	event_enemy: &mut EventWriter<EventEnemySpawn>,
) {
	if let Some(index) = subsection.get_hero_spawn_point() {
		event_hero.write(EventHeroSpawn {
			subsection: id,
			index,
			position: tile_centre(subsection, index),
		});
	}
	for index in subsection.get_enemy_spawn_points() {
		event_enemy.write(EventEnemySpawn {
			subsection: id,
			index,
			position: tile_centre(subsection, index),
		});
	}
}

/// Read [EventClearSubsection] and reset the subsection to an empty level
#[cfg(not(tarpaulin_include))]
pub fn process_subsection_clears(
	mut events: EventReader<EventClearSubsection>,
	mut query: Query<(&SubsectionID, &mut Subsection, &mut Pathfinder)>,
) {
	for event in events.read() {
		for (id, mut subsection, mut pathfinder) in query.iter_mut() {
			if *id == event.subsection {
				debug!("Clearing subsection {:?}", id.get());
				subsection.clear();
				pathfinder.reset();
			}
		}
	}
}

/// Read [EventSetTileType] and update the tiles, reserved types are ignored
#[cfg(not(tarpaulin_include))]
pub fn process_tile_type_updates(
	mut events: EventReader<EventSetTileType>,
	mut query: Query<(&SubsectionID, &mut Subsection)>,
) {
	for event in events.read() {
		if event.get_tile_type().is_reserved() {
			warn!(
				"Ignoring edit of tile {} to reserved type {:?}",
				event.get_index(),
				event.get_tile_type()
			);
			continue;
		}
		for (id, mut subsection) in query.iter_mut() {
			if *id != event.get_subsection()
				|| !is_index_valid(&subsection, *id, event.get_index())
			{
				continue;
			}
			subsection.set_tile_type_at_index(
				event.get_index(),
				event.get_tile_type(),
				event.get_variant(),
			);
		}
	}
}

/// Read the spawn toggle events and update the spawn points
#[cfg(not(tarpaulin_include))]
pub fn process_spawn_toggles(
	mut hero_events: EventReader<EventToggleHeroSpawn>,
	mut enemy_events: EventReader<EventToggleEnemySpawn>,
	mut query: Query<(&SubsectionID, &mut Subsection)>,
) {
	for event in hero_events.read() {
		for (id, mut subsection) in query.iter_mut() {
			if *id == event.subsection && is_index_valid(&subsection, *id, event.index) {
				subsection.set_hero_spawn_point_for_tile(event.index);
			}
		}
	}
	for event in enemy_events.read() {
		for (id, mut subsection) in query.iter_mut() {
			if *id == event.subsection && is_index_valid(&subsection, *id, event.index) {
				subsection.set_enemy_spawn_point(event.index);
			}
		}
	}
}

/// Read [EventSaveSubsection] and write the subsection to disk
#[cfg(not(tarpaulin_include))]
pub fn process_subsection_saves(
	mut events: EventReader<EventSaveSubsection>,
	query: Query<(&SubsectionID, &Subsection)>,
) {
	for event in events.read() {
		for (id, subsection) in query.iter() {
			if *id == event.subsection && !subsection.save(&event.path) {
				error!("Subsection {:?} has not been saved", id.get());
			}
		}
	}
}

/// Step the animation of Fire tiles
#[cfg(not(tarpaulin_include))]
pub fn animate_tiles(time: Res<Time>, mut query: Query<&mut Subsection>) {
	for mut subsection in query.iter_mut() {
		// only flag a change when a variant moved
		if subsection.bypass_change_detection().tick_animations(time.delta()) {
			subsection.set_changed();
		}
	}
}

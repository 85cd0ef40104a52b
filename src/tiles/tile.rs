//! A [Tile] is a single cell of a [crate::prelude::Subsection] grid.
//!
//! Tiles are only ever built by the owning subsection, which hands out a
//! unique [TileId] for each one so that callers can tell whether a slot still
//! holds the same tile after an edit. The spawn point flags are likewise
//! only mutated through the subsection as it enforces the invariants that
//! span multiple tiles.

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Identity of a tile, unique within the subsection that built it
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct TileId(u64);

impl TileId {
	/// Create a new instance of [TileId]
	pub fn new(id: u64) -> Self {
		TileId(id)
	}
	/// Get the raw id
	pub fn get(&self) -> u64 {
		self.0
	}
}

/// An item resting on a tile, identified by the game's item table
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Reflect)]
pub struct Pickup(u16);

impl Pickup {
	/// Create a new instance of [Pickup]
	pub fn new(item: u16) -> Self {
		Pickup(item)
	}
	/// Get the item id
	pub fn get_item(&self) -> u16 {
		self.0
	}
}

/// The decoded, persistable description of a tile. Every save format reads
/// and writes lists of these
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub struct TileRecord {
	/// Type of the tile
	pub tile_type: TileType,
	/// Visual variant
	pub variant: u8,
	/// Hero starts the level here
	pub is_hero_spawn_point: bool,
	/// An enemy is spawned here when the level loads
	pub is_enemy_spawn_point: bool,
}

impl TileRecord {
	/// Create a new instance of [TileRecord] without any spawn point
	pub fn new(tile_type: TileType, variant: u8) -> Self {
		TileRecord {
			tile_type,
			variant,
			is_hero_spawn_point: false,
			is_enemy_spawn_point: false,
		}
	}
}

/// A single cell of a subsection grid
#[derive(Clone, Debug, Reflect)]
pub struct Tile {
	/// Unique identity issued by the owning subsection
	id: TileId,
	/// Slot of the tile in the row-major grid
	index: usize,
	/// Terrain type
	tile_type: TileType,
	/// Visual variant, always below the variant count of the type
	variant: u8,
	/// Fixed by the type when the tile is built
	walkable: bool,
	/// Hero starts the level here
	is_hero_spawn_point: bool,
	/// An enemy is spawned here when the level loads
	is_enemy_spawn_point: bool,
	/// Item resting on the tile
	pickup: Option<Pickup>,
	/// Frame timer of self animating types
	#[reflect(ignore)]
	animation: Option<Timer>,
}

impl Tile {
	/// Build a tile from the constant data of `tile_type`
	pub(crate) fn new(id: TileId, index: usize, tile_type: TileType, variant: u8) -> Self {
		let descriptor = tile_type.get_descriptor();
		let animation = descriptor
			.get_frame_seconds()
			.map(|secs| Timer::from_seconds(secs, TimerMode::Repeating));
		Tile {
			id,
			index,
			tile_type,
			variant: clamp_variant(tile_type, variant),
			walkable: descriptor.is_walkable(),
			is_hero_spawn_point: false,
			is_enemy_spawn_point: false,
			pickup: None,
			animation,
		}
	}
	/// Get the identity of the tile
	pub fn get_id(&self) -> TileId {
		self.id
	}
	/// Get the slot index of the tile within its subsection
	pub fn get_index(&self) -> usize {
		self.index
	}
	/// Get the terrain type
	pub fn get_tile_type(&self) -> TileType {
		self.tile_type
	}
	/// Get the visual variant
	pub fn get_variant(&self) -> u8 {
		self.variant
	}
	/// Sprite atlas key of the current variant
	pub fn get_sprite_key(&self) -> &'static str {
		self.tile_type.get_sprite_key(self.variant)
	}
	/// Whether actors can path across the tile
	pub fn is_walkable(&self) -> bool {
		self.walkable
	}
	/// Whether the hero starts the level on this tile
	pub fn is_hero_spawn_point(&self) -> bool {
		self.is_hero_spawn_point
	}
	/// Whether an enemy spawns on this tile
	pub fn is_enemy_spawn_point(&self) -> bool {
		self.is_enemy_spawn_point
	}
	/// Get the item resting on the tile
	pub fn get_pickup(&self) -> Option<Pickup> {
		self.pickup
	}
	/// Whether the tile cycles through its variants by itself
	pub fn is_animated(&self) -> bool {
		self.animation.is_some()
	}
	/// The persistable description of the tile
	pub fn to_record(&self) -> TileRecord {
		TileRecord {
			tile_type: self.tile_type,
			variant: self.variant,
			is_hero_spawn_point: self.is_hero_spawn_point,
			is_enemy_spawn_point: self.is_enemy_spawn_point,
		}
	}
	/// Change the variant without rebuilding the tile
	pub(crate) fn set_variant(&mut self, variant: u8) {
		self.variant = clamp_variant(self.tile_type, variant);
	}
	/// Set or clear the hero spawn flag
	pub(crate) fn set_hero_spawn_point(&mut self, value: bool) {
		self.is_hero_spawn_point = value;
	}
	/// Set or clear the enemy spawn flag
	pub(crate) fn set_enemy_spawn_point(&mut self, value: bool) {
		self.is_enemy_spawn_point = value;
	}
	/// Place an item on the tile, returning whatever was there before
	pub(crate) fn set_pickup(&mut self, pickup: Option<Pickup>) -> Option<Pickup> {
		std::mem::replace(&mut self.pickup, pickup)
	}
	/// Advance the animation timer, stepping the variant once for every
	/// elapsed frame. Returns whether the variant changed
	pub(crate) fn tick(&mut self, delta: Duration) -> bool {
		let Some(timer) = self.animation.as_mut() else {
			return false;
		};
		timer.tick(delta);
		let frames = timer.times_finished_this_tick();
		if frames == 0 {
			return false;
		}
		let count = self.tile_type.get_variant_count() as u32;
		self.variant = ((self.variant as u32 + frames) % count) as u8;
		true
	}
}

/// Bound a variant by the variant count of a type, out of range variants are
/// logged and replaced by the last valid variant
fn clamp_variant(tile_type: TileType, variant: u8) -> u8 {
	let count = tile_type.get_variant_count();
	if variant >= count {
		warn!(
			"Variant {} is out of range for {:?} which has {} variants, using {}",
			variant,
			tile_type,
			count,
			count - 1
		);
		count - 1
	} else {
		variant
	}
}

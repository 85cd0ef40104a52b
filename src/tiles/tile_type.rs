//! Every [crate::prelude::Tile] is built from the constant data of its
//! [TileType]. Types only differ by whether actors can walk across them, how
//! many visual variants they have and which sprite each variant uses.
//!
//! ```text
//!  ________________________________________
//! | type    | walkable | variants | bit    |
//! |_________|__________|__________|________|
//! | Ground  |   yes    |    4     | 0x0010 |
//! | Water   |   no     |    4     | 0x0020 |
//! | Rock    |   no     |    3     | 0x0040 |
//! | Tree    |   no     |    2     | 0x0080 |
//! | Boulder |   no     |    1     | 0x0100 |
//! | Sand    |   yes    |    3     | 0x0200 |
//! | Bridge  |   yes    |    2     | 0x0400 |
//! | Door    |   yes    |    1     | 0x0800 |
//! | Stairs  |   yes    |    1     | 0x1000 |
//! | Fire    |   no     |    4     | 0x2000 |
//! |_________|__________|__________|________|
//! ```
//!
//! `Door` and `Stairs` are reserved, the level editor never places them but
//! the save format keeps a bit for each.

use bevy::prelude::*;

/// How long each frame of an animated tile is shown before advancing to the
/// next variant
pub const FIRE_FRAME_SECONDS: f32 = 0.15;

/// The kinds of terrain a tile can be
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub enum TileType {
	/// Plain walkable terrain, the type of every tile in an empty level
	#[default]
	Ground,
	/// Impassable open water
	Water,
	/// Impassable rock face
	Rock,
	/// Impassable tree
	Tree,
	/// Impassable boulder
	Boulder,
	/// Walkable sand
	Sand,
	/// Walkable crossing over water
	Bridge,
	/// Reserved
	Door,
	/// Reserved
	Stairs,
	/// Animated hazard which cycles through its variants
	Fire,
}

/// Constant data describing a [TileType]
#[derive(Debug)]
pub struct TileDescriptor {
	/// Whether actors can path across the tile
	walkable: bool,
	/// Sprite atlas key of each variant, the length is the number of variants
	sprite_keys: &'static [&'static str],
	/// Bit flag identifying the type in the packed save format
	type_bit: u16,
	/// Seconds between variant changes for self animating types
	frame_seconds: Option<f32>,
}

impl TileDescriptor {
	/// Whether actors can path across tiles of this type
	pub fn is_walkable(&self) -> bool {
		self.walkable
	}
	/// Number of visual variants
	pub fn get_variant_count(&self) -> u8 {
		self.sprite_keys.len() as u8
	}
	/// Sprite keys of every variant
	pub fn get_sprite_keys(&self) -> &'static [&'static str] {
		self.sprite_keys
	}
	/// The one-hot bit of the type in the packed save format
	pub fn get_type_bit(&self) -> u16 {
		self.type_bit
	}
	/// Seconds each variant is shown for when the type animates itself
	pub fn get_frame_seconds(&self) -> Option<f32> {
		self.frame_seconds
	}
}

/// Descriptors indexed in the declaration order of [TileType]
static TILE_DESCRIPTORS: [TileDescriptor; 10] = [
	TileDescriptor {
		walkable: true,
		sprite_keys: &["ground_0", "ground_1", "ground_2", "ground_3"],
		type_bit: 0x0010,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: false,
		sprite_keys: &["water_0", "water_1", "water_2", "water_3"],
		type_bit: 0x0020,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: false,
		sprite_keys: &["rock_0", "rock_1", "rock_2"],
		type_bit: 0x0040,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: false,
		sprite_keys: &["tree_0", "tree_1"],
		type_bit: 0x0080,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: false,
		sprite_keys: &["boulder_0"],
		type_bit: 0x0100,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: true,
		sprite_keys: &["sand_0", "sand_1", "sand_2"],
		type_bit: 0x0200,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: true,
		sprite_keys: &["bridge_0", "bridge_1"],
		type_bit: 0x0400,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: true,
		sprite_keys: &["door_0"],
		type_bit: 0x0800,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: true,
		sprite_keys: &["stairs_0"],
		type_bit: 0x1000,
		frame_seconds: None,
	},
	TileDescriptor {
		walkable: false,
		sprite_keys: &["fire_0", "fire_1", "fire_2", "fire_3"],
		type_bit: 0x2000,
		frame_seconds: Some(FIRE_FRAME_SECONDS),
	},
];

impl TileType {
	/// Every type in declaration order, this is also the order the save
	/// format decoder scans the type bits in
	pub const ALL: [TileType; 10] = [
		TileType::Ground,
		TileType::Water,
		TileType::Rock,
		TileType::Tree,
		TileType::Boulder,
		TileType::Sand,
		TileType::Bridge,
		TileType::Door,
		TileType::Stairs,
		TileType::Fire,
	];
	/// Get the constant data of the type
	pub fn get_descriptor(&self) -> &'static TileDescriptor {
		&TILE_DESCRIPTORS[*self as usize]
	}
	/// Whether actors can path across the type
	pub fn is_walkable(&self) -> bool {
		self.get_descriptor().is_walkable()
	}
	/// Number of visual variants of the type
	pub fn get_variant_count(&self) -> u8 {
		self.get_descriptor().get_variant_count()
	}
	/// Whether the type is reserved and never placed by the level editor
	pub fn is_reserved(&self) -> bool {
		matches!(self, TileType::Door | TileType::Stairs)
	}
	/// Find the type whose bit is set within a packed save word. Types are
	/// scanned in declaration order and the first match wins
	pub fn from_type_bits(word: u16) -> Option<TileType> {
		TileType::ALL
			.iter()
			.find(|t| word & t.get_descriptor().get_type_bit() != 0)
			.copied()
	}
	/// Sprite key of a variant, variants beyond the last one use the final
	/// sprite
	pub fn get_sprite_key(&self, variant: u8) -> &'static str {
		let keys = self.get_descriptor().get_sprite_keys();
		keys[(variant as usize).min(keys.len() - 1)]
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn descriptor_order_matches_types() {
		// type bits are one-hot and ascend with declaration order
		for (i, tile_type) in TileType::ALL.iter().enumerate() {
			let actual = 0x0010 << i;
			let result = tile_type.get_descriptor().get_type_bit();
			assert_eq!(actual, result);
		}
	}
	#[test]
	fn walkability() {
		assert!(TileType::Ground.is_walkable());
		assert!(TileType::Sand.is_walkable());
		assert!(TileType::Bridge.is_walkable());
		assert!(!TileType::Water.is_walkable());
		assert!(!TileType::Rock.is_walkable());
		assert!(!TileType::Tree.is_walkable());
		assert!(!TileType::Boulder.is_walkable());
		assert!(!TileType::Fire.is_walkable());
	}
	#[test]
	fn variant_counts_fit_in_four_bits() {
		for tile_type in TileType::ALL.iter() {
			let count = tile_type.get_variant_count();
			assert!(count >= 1 && count <= 16, "{:?} has {} variants", tile_type, count);
		}
	}
	#[test]
	fn type_from_bits() {
		let result = TileType::from_type_bits(0x4000 | 0x0200 | 0x2);
		let actual = Some(TileType::Sand);
		assert_eq!(actual, result);
	}
	#[test]
	fn type_from_no_bits() {
		let result = TileType::from_type_bits(0xC00F);
		assert!(result.is_none());
	}
	#[test]
	fn only_fire_animates() {
		for tile_type in TileType::ALL.iter() {
			let animates = tile_type.get_descriptor().get_frame_seconds().is_some();
			assert_eq!(*tile_type == TileType::Fire, animates);
		}
	}
	#[test]
	fn sprite_key_clamps() {
		assert_eq!("rock_2", TileType::Rock.get_sprite_key(2));
		assert_eq!("rock_2", TileType::Rock.get_sprite_key(9));
	}
}

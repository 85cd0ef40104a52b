//! Subsections are stored on disk as a flat list of little-endian `u16`
//! words, one per tile in row-major order with no header. Each word packs
//! the whole description of a tile:
//!
//! ```text
//!  15   14   13                            4  3       0
//!  ____ ____ _________________________________ _________
//! |enmy|hero|  one-hot type bit (10 types)    | variant |
//! |____|____|_________________________________|_________|
//! ```
//!
//! A word without any type bit set is invalid and rejects the whole file.
//! Alongside the packed format a subsection can be described by hand in a
//! `ron` file (feature `ron`) or as a `csv` grid of decimal words (feature
//! `csv`).

use std::path::Path;

use crate::prelude::*;
use bevy::prelude::*;

/// Bits holding the variant of a tile
pub const TILE_WORD_VARIANT_MASK: u16 = 0x000F;
/// Bits holding the one-hot type of a tile
pub const TILE_WORD_TYPE_MASK: u16 = 0x3FF0;
/// Bit set when the tile is the hero spawn point
pub const TILE_WORD_HERO_SPAWN: u16 = 0x4000;
/// Bit set when the tile is an enemy spawn point
pub const TILE_WORD_ENEMY_SPAWN: u16 = 0x8000;

/// Reasons a subsection file could not be read or written
#[derive(Debug, thiserror::Error)]
pub enum SubsectionFileError {
	/// No path was supplied
	#[error("no file path was given")]
	EmptyPath,
	/// The file could not be opened, read or written
	#[error("file access failed: {0}")]
	Io(#[from] std::io::Error),
	/// The file does not hold exactly one word per tile
	#[error("expected {expected} bytes for the subsection grid, found {found}")]
	Length {
		/// Bytes required by the grid dimensions
		expected: usize,
		/// Bytes present in the file
		found: usize,
	},
	/// A word has no type bit set
	#[error("word {word:#06x} of tile {index} does not name a tile type")]
	MissingType {
		/// Slot of the offending word
		index: usize,
		/// The raw word
		word: u16,
	},
}

/// Pack a tile into its on-disk word
pub fn encode_tile_word(record: &TileRecord) -> u16 {
	let mut word = record.tile_type.get_descriptor().get_type_bit();
	word |= record.variant as u16 & TILE_WORD_VARIANT_MASK;
	if record.is_hero_spawn_point {
		word |= TILE_WORD_HERO_SPAWN;
	}
	if record.is_enemy_spawn_point {
		word |= TILE_WORD_ENEMY_SPAWN;
	}
	word
}

/// Unpack an on-disk word, `None` when no type bit is set
pub fn decode_tile_word(word: u16) -> Option<TileRecord> {
	let is_hero_spawn_point = word & TILE_WORD_HERO_SPAWN != 0;
	let is_enemy_spawn_point = word & TILE_WORD_ENEMY_SPAWN != 0;
	let tile_type = TileType::from_type_bits(word & TILE_WORD_TYPE_MASK)?;
	Some(TileRecord {
		tile_type,
		variant: (word & TILE_WORD_VARIANT_MASK) as u8,
		is_hero_spawn_point,
		is_enemy_spawn_point,
	})
}

/// Serialise tiles into the packed byte layout
pub fn encode_subsection(records: &[TileRecord]) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(records.len() * 2);
	for record in records.iter() {
		bytes.extend_from_slice(&encode_tile_word(record).to_le_bytes());
	}
	bytes
}

/// Deserialise the packed byte layout of a grid of `dimensions`
pub fn decode_subsection(
	bytes: &[u8],
	dimensions: &GridDimensions,
) -> Result<Vec<TileRecord>, SubsectionFileError> {
	let expected = dimensions.get_tile_count() * 2;
	if bytes.len() != expected {
		return Err(SubsectionFileError::Length {
			expected,
			found: bytes.len(),
		});
	}
	bytes
		.chunks_exact(2)
		.enumerate()
		.map(|(index, pair)| {
			let word = u16::from_le_bytes([pair[0], pair[1]]);
			decode_tile_word(word).ok_or(SubsectionFileError::MissingType { index, word })
		})
		.collect()
}

/// Write tiles to `path` in the packed format, replacing any existing file
pub fn write_subsection_file(
	path: &Path,
	records: &[TileRecord],
) -> Result<(), SubsectionFileError> {
	if path.as_os_str().is_empty() {
		return Err(SubsectionFileError::EmptyPath);
	}
	std::fs::write(path, encode_subsection(records))?;
	Ok(())
}

/// Read the packed tiles of a grid of `dimensions` from `path`
pub fn read_subsection_file(
	path: &Path,
	dimensions: &GridDimensions,
) -> Result<Vec<TileRecord>, SubsectionFileError> {
	if path.as_os_str().is_empty() {
		return Err(SubsectionFileError::EmptyPath);
	}
	let bytes = std::fs::read(path)?;
	decode_subsection(&bytes, dimensions)
}

/// Hand editable description of a subsection
#[cfg(feature = "serde")]
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct SubsectionRecord {
	/// Size of the grid
	pub dimensions: GridDimensions,
	/// Row-major tiles
	pub tiles: Vec<TileRecord>,
}

#[cfg(feature = "ron")]
impl Subsection {
	/// From a `ron` file describing a [SubsectionRecord] create a
	/// [Subsection]
	pub fn from_ron(path: String) -> Self {
		let file = std::fs::File::open(path).expect("Failed opening Subsection file");
		let record: SubsectionRecord = match ron::de::from_reader(file) {
			Ok(record) => record,
			Err(e) => panic!("Failed deserializing Subsection: {}", e),
		};
		if record.tiles.len() != record.dimensions.get_tile_count() {
			panic!(
				"Subsection file lists {} tiles, dimensions require {}",
				record.tiles.len(),
				record.dimensions.get_tile_count()
			);
		}
		Subsection::from_records(record.dimensions, &record.tiles)
	}
	/// Describe the subsection as a pretty printed `ron` [SubsectionRecord]
	pub fn to_ron_string(&self) -> Result<String, ron::Error> {
		let record = SubsectionRecord {
			dimensions: *self.get_dimensions(),
			tiles: self.to_records(),
		};
		ron::ser::to_string_pretty(&record, ron::ser::PrettyConfig::default())
	}
}

#[cfg(feature = "csv")]
impl Subsection {
	/// From a `csv` file where each row is a row of the grid and each value
	/// the decimal form of a packed tile word create a [Subsection]
	pub fn from_csv(path: String, dimensions: GridDimensions) -> Self {
		let data = std::fs::File::open(path).expect("Failed opening csv");
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.from_reader(data);
		let mut records = Vec::with_capacity(dimensions.get_tile_count());
		for (row, line) in rdr.records().enumerate() {
			let line = line.expect("Failed reading csv row");
			if line.len() != dimensions.get_horizontal_tile_count() as usize {
				panic!(
					"CSV row {} has {} values, expected {}",
					row,
					line.len(),
					dimensions.get_horizontal_tile_count()
				);
			}
			for value in line.iter() {
				let word: u16 = value.trim().parse().expect("CSV expects u16 values");
				match decode_tile_word(word) {
					Some(record) => records.push(record),
					None => panic!("CSV value {} in row {} has no tile type bit", word, row),
				}
			}
		}
		if records.len() != dimensions.get_tile_count() {
			panic!(
				"CSV describes {} tiles, expected {}",
				records.len(),
				dimensions.get_tile_count()
			);
		}
		Subsection::from_records(dimensions, &records)
	}
}

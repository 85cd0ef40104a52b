//! A* search over the walkable tiles of a single [Subsection].
//!
//! Movement is orthogonal only and every step costs `1`, so the Manhattan
//! distance is an admissible heuristic and any route found is a shortest one.
//! Neighbours are always explored in the order up, down, left, right which,
//! together with the stable ordering of the open list, makes the route chosen
//! between equally short alternatives deterministic.
//!
//! ```text
//!  ________________
//! |__|__|~~|__|    S start, D destination, ~~ water
//! |__|__|~~|__|
//! |S_|__|__|D_|
//! ```
//!
//! A search runs to completion within a single call to
//! [Pathfinder::find_path], there is no partial or incremental search.

use crate::prelude::*;
use bevy::prelude::*;

/// Why a search ended without a route
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect, thiserror::Error)]
pub enum PathError {
	/// The start and destination are the same tile
	#[error("start and destination are the same tile")]
	TrivialRequest,
	/// Every reachable tile was expanded without meeting the destination
	#[error("no walkable route to the destination exists")]
	PathNotFound,
}

/// Lifecycle of a [Pathfinder]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub enum PathfinderState {
	/// No search has run since construction or the last reset
	#[default]
	Idle,
	/// A search is in progress
	Searching,
	/// The last search produced a route
	FoundPath,
	/// The last search failed
	Error(PathError),
}

/// A* pathfinder bound to the grid of one [Subsection]
#[derive(Component, Clone, Debug, Reflect)]
pub struct Pathfinder {
	/// Dimensions of the subsection the pathfinder searches
	dimensions: GridDimensions,
	/// Outcome of the last search
	state: PathfinderState,
	/// Node arena with the open and closed lists
	lists: NodeLists,
	/// Tile indices of the last route, excluding the start and including the
	/// destination
	path: Vec<usize>,
}

impl Pathfinder {
	/// Create a new instance of [Pathfinder] for searching `subsection`
	pub fn new(subsection: &Subsection) -> Self {
		let dimensions = *subsection.get_dimensions();
		Pathfinder {
			dimensions,
			state: PathfinderState::Idle,
			lists: NodeLists::new(dimensions.get_tile_count()),
			path: Vec::new(),
		}
	}
	/// Get the outcome of the last search
	pub fn get_state(&self) -> PathfinderState {
		self.state
	}
	/// Get the dimensions of the grid being searched
	pub fn get_dimensions(&self) -> &GridDimensions {
		&self.dimensions
	}
	/// Get the node arena and lists of the last search
	pub fn get_node_lists(&self) -> &NodeLists {
		&self.lists
	}
	/// Drop all search state and return to [PathfinderState::Idle]
	pub fn reset(&mut self) {
		self.lists.clear();
		self.path.clear();
		self.state = PathfinderState::Idle;
	}
	/// Number of steps in the last route
	pub fn get_path_size(&self) -> usize {
		self.path.len()
	}
	/// Tile index of step `i` of the last route, panics if `i` is beyond the
	/// end of the route
	pub fn get_path_node_at_index(&self, i: usize) -> usize {
		if i >= self.path.len() {
			panic!(
				"Cannot access path step {}, route has {} steps",
				i,
				self.path.len()
			);
		}
		self.path[i]
	}
	/// Tile indices of the last route in walking order
	pub fn get_path(&self) -> &[usize] {
		&self.path
	}
	/// Search for the shortest walkable route from `start_index` to
	/// `dest_index`. Any previous route is discarded.
	///
	/// Returns `true` when a route was found, on failure the reason is held
	/// in [PathfinderState::Error]
	pub fn find_path(
		&mut self,
		subsection: &Subsection,
		start_index: usize,
		dest_index: usize,
	) -> bool {
		if *subsection.get_dimensions() != self.dimensions {
			panic!(
				"Pathfinder built for {:?} cannot search a subsection of {:?}",
				self.dimensions,
				subsection.get_dimensions()
			);
		}
		let tile_count = self.dimensions.get_tile_count();
		if start_index >= tile_count || dest_index >= tile_count {
			panic!(
				"Path request from {} to {} is out of bounds of a subsection with {} tiles",
				start_index, dest_index, tile_count
			);
		}
		self.reset();
		self.state = PathfinderState::Searching;
		if start_index == dest_index {
			return self.fail(PathError::TrivialRequest, start_index, dest_index);
		}
		let destination = self.dimensions.get_coordinates_for_index(dest_index);
		let start = PathNode::new(
			start_index,
			self.dimensions.get_coordinates_for_index(start_index),
			None,
			1,
			&destination,
		);
		self.lists.insert_open(start);

		while let Some(current) = self.lists.pop_lowest() {
			let node = *self.lists.get_node(current);
			if node.get_tile_index() == dest_index {
				self.build_path(current);
				self.state = PathfinderState::FoundPath;
				debug!(
					"Found route from {} to {} of {} steps",
					start_index,
					dest_index,
					self.path.len()
				);
				return true;
			}
			let g = node.get_g() + 1;
			for neighbour in node.get_coordinates().get_orthogonal_neighbours() {
				if !self.dimensions.validate_coordinates(neighbour) {
					continue;
				}
				let index = self.dimensions.get_index_for_coordinates(neighbour);
				if !subsection.get_tile_for_index(index).is_walkable() || self.lists.is_closed(index)
				{
					continue;
				}
				match self.lists.get_open_handle(index) {
					Some(handle) => {
						if g < self.lists.get_node(handle).get_g() {
							self.lists.reparent(handle, current, g);
						}
					}
					None => {
						let child = PathNode::new(index, neighbour, Some(current), g, &destination);
						self.lists.insert_open(child);
					}
				}
			}
		}
		self.fail(PathError::PathNotFound, start_index, dest_index)
	}
	/// Record a failed search
	fn fail(&mut self, error: PathError, start_index: usize, dest_index: usize) -> bool {
		warn!(
			"No route from {} to {}: {}",
			start_index, dest_index, error
		);
		self.state = PathfinderState::Error(error);
		false
	}
	/// Walk parents back from the destination node, every node but the start
	/// becomes a step of the route
	fn build_path(&mut self, goal: NodeHandle) {
		let mut steps = Vec::new();
		let mut handle = goal;
		while let Some(parent) = self.lists.get_node(handle).get_parent() {
			steps.push(self.lists.get_node(handle).get_tile_index());
			handle = parent;
		}
		steps.reverse();
		self.path = steps;
	}
}

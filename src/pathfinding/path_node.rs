//! Search state of the [crate::prelude::Pathfinder].
//!
//! Every candidate step is a [PathNode] stored in an arena and referred to by
//! a [NodeHandle]. A node points back at the node it was reached from so the
//! final route can be rebuilt by walking parents from the destination.
//!
//! The open list holds handles sorted ascending by `F = G + H`. It is
//! re-sorted with a stable sort after every insertion or reparenting, so nodes
//! with equal `F` stay in the order they were discovered and the front of the
//! list is always the next node to expand.

use crate::prelude::*;
use bevy::prelude::*;

/// Handle of a [PathNode] within a [NodeLists] arena
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Reflect)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
	/// Position of the node in the arena
	pub fn get(&self) -> usize {
		self.0
	}
}

/// A candidate step of a route
#[derive(Clone, Copy, Debug, Reflect)]
pub struct PathNode {
	/// Tile the node stands on
	tile_index: usize,
	/// Coordinates of the tile
	coordinates: TileCoordinates,
	/// Node this one was reached from, [None] for the start of the search
	parent: Option<NodeHandle>,
	/// Number of tiles walked to get here, the start counts as `1`
	g: u32,
	/// Manhattan distance to the destination
	h: u32,
}

impl PathNode {
	/// Create a new instance of [PathNode]. The start node has no parent and
	/// a `g` of `1`, every other node sits one step further than its parent
	pub fn new(
		tile_index: usize,
		coordinates: TileCoordinates,
		parent: Option<NodeHandle>,
		g: u32,
		destination: &TileCoordinates,
	) -> Self {
		PathNode {
			tile_index,
			coordinates,
			parent,
			g,
			h: coordinates.manhattan_distance(destination),
		}
	}
	/// Get the tile index
	pub fn get_tile_index(&self) -> usize {
		self.tile_index
	}
	/// Get the tile coordinates
	pub fn get_coordinates(&self) -> TileCoordinates {
		self.coordinates
	}
	/// Get the parent handle
	pub fn get_parent(&self) -> Option<NodeHandle> {
		self.parent
	}
	/// Steps taken from the start
	pub fn get_g(&self) -> u32 {
		self.g
	}
	/// Estimated steps remaining
	pub fn get_h(&self) -> u32 {
		self.h
	}
	/// Estimated length of the whole route through this node
	pub fn get_f(&self) -> u32 {
		self.g + self.h
	}
}

/// Which list, if any, a tile's node is in
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
enum Membership {
	/// No node has been created for the tile
	#[default]
	Unvisited,
	/// Waiting to be expanded
	Open(NodeHandle),
	/// Already expanded
	Closed,
}

/// Node arena with the open and closed lists of a search
#[derive(Clone, Debug, Default, Reflect)]
pub struct NodeLists {
	/// Every node created during the search
	nodes: Vec<PathNode>,
	/// Nodes awaiting expansion, ascending by `F`
	open: Vec<NodeHandle>,
	/// Nodes which have been expanded
	closed: Vec<NodeHandle>,
	/// List membership of each tile of the grid
	membership: Vec<Membership>,
}

impl NodeLists {
	/// Create a new instance of [NodeLists] for a grid of `tile_count` tiles
	pub fn new(tile_count: usize) -> Self {
		NodeLists {
			nodes: Vec::new(),
			open: Vec::new(),
			closed: Vec::new(),
			membership: vec![Membership::Unvisited; tile_count],
		}
	}
	/// Drop every node
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.open.clear();
		self.closed.clear();
		self.membership.fill(Membership::Unvisited);
	}
	/// Get a node from the arena
	pub fn get_node(&self, handle: NodeHandle) -> &PathNode {
		&self.nodes[handle.0]
	}
	/// Handles awaiting expansion, lowest `F` first
	pub fn get_open(&self) -> &[NodeHandle] {
		&self.open
	}
	/// Handles which have been expanded
	pub fn get_closed(&self) -> &[NodeHandle] {
		&self.closed
	}
	/// Number of nodes created
	pub fn get_node_count(&self) -> usize {
		self.nodes.len()
	}
	/// Handle of the open node standing on a tile
	pub fn get_open_handle(&self, tile_index: usize) -> Option<NodeHandle> {
		match self.membership[tile_index] {
			Membership::Open(handle) => Some(handle),
			_ => None,
		}
	}
	/// Whether the node of a tile has already been expanded
	pub fn is_closed(&self, tile_index: usize) -> bool {
		self.membership[tile_index] == Membership::Closed
	}
	/// Add a node to the open list
	pub fn insert_open(&mut self, node: PathNode) -> NodeHandle {
		let handle = NodeHandle(self.nodes.len());
		self.membership[node.get_tile_index()] = Membership::Open(handle);
		self.nodes.push(node);
		self.open.push(handle);
		self.sort_open();
		handle
	}
	/// Take the node with the lowest `F` off the open list and close it
	pub fn pop_lowest(&mut self) -> Option<NodeHandle> {
		if self.open.is_empty() {
			return None;
		}
		let handle = self.open.remove(0);
		self.membership[self.nodes[handle.0].get_tile_index()] = Membership::Closed;
		self.closed.push(handle);
		Some(handle)
	}
	/// Point an open node at a better parent
	pub fn reparent(&mut self, handle: NodeHandle, parent: NodeHandle, g: u32) {
		let node = &mut self.nodes[handle.0];
		node.parent = Some(parent);
		node.g = g;
		self.sort_open();
	}
	/// Stable sort of the open list by `F`
	fn sort_open(&mut self) {
		let nodes = &self.nodes;
		self.open.sort_by_key(|h| nodes[h.0].get_f());
	}
}

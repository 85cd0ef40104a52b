//! Logic relating to [TileRoute] generation
//!

use std::collections::VecDeque;

use crate::prelude::*;
use bevy::prelude::*;

/// A request for the route of an actor between two tiles of a subsection
#[derive(Event)]
pub struct EventPathRequest {
	/// Entity which will be given the route
	requester: Entity,
	/// Subsection to path within
	subsection: SubsectionID,
	/// Tile index the actor is standing on
	source: usize,
	/// Tile index the actor wants to reach
	target: usize,
}

impl EventPathRequest {
	/// Create a new instance of [EventPathRequest]
	pub fn new(requester: Entity, subsection: SubsectionID, source: usize, target: usize) -> Self {
		EventPathRequest {
			requester,
			subsection,
			source,
			target,
		}
	}
	/// Get the entity which requested the route
	pub fn get_requester(&self) -> Entity {
		self.requester
	}
	/// Get the subsection
	pub fn get_subsection(&self) -> SubsectionID {
		self.subsection
	}
	/// Get the starting tile index
	pub fn get_source(&self) -> usize {
		self.source
	}
	/// Get the target tile index
	pub fn get_target(&self) -> usize {
		self.target
	}
}

/// The remaining tiles an actor has to walk through to reach its target
#[derive(Component, Clone, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct TileRoute {
	/// Subsection the route lies in
	subsection: SubsectionID,
	/// Tile indices still to be visited, the next hop first
	steps: VecDeque<usize>,
}

impl TileRoute {
	/// Create a new instance of [TileRoute]
	pub fn new(subsection: SubsectionID, steps: &[usize]) -> Self {
		TileRoute {
			subsection,
			steps: steps.iter().copied().collect(),
		}
	}
	/// Get the subsection the route lies in
	pub fn get_subsection(&self) -> SubsectionID {
		self.subsection
	}
	/// Tile indices left to visit
	pub fn get_steps(&self) -> &VecDeque<usize> {
		&self.steps
	}
	/// Tile the actor should move to next without consuming it
	pub fn peek_next_hop(&self) -> Option<usize> {
		self.steps.front().copied()
	}
	/// Consume the next tile of the route
	pub fn next_hop(&mut self) -> Option<usize> {
		self.steps.pop_front()
	}
	/// Whether every tile of the route has been consumed
	pub fn is_finished(&self) -> bool {
		self.steps.is_empty()
	}
}

/// Remove routes whose every hop has been consumed
#[cfg(not(tarpaulin_include))]
pub fn cleanup_finished_routes(mut commands: Commands, query: Query<(Entity, &TileRoute)>) {
	for (entity, route) in query.iter() {
		if route.is_finished() {
			commands.entity(entity).remove::<TileRoute>();
		}
	}
}

/// Process [EventPathRequest], run the [Pathfinder] of the subsection and
/// give the requester a [TileRoute] when one exists
#[cfg(not(tarpaulin_include))]
pub fn process_path_requests(
	mut commands: Commands,
	mut events: EventReader<EventPathRequest>,
	mut query: Query<(&SubsectionID, &Subsection, &mut Pathfinder)>,
) {
	for event in events.read() {
		let Some((_, subsection, mut pathfinder)) = query
			.iter_mut()
			.find(|(id, _, _)| **id == event.get_subsection())
		else {
			warn!(
				"Path request for unknown subsection {:?}",
				event.get_subsection().get()
			);
			continue;
		};
		let tile_count = subsection.get_tiles().len();
		let found = if event.get_source() >= tile_count || event.get_target() >= tile_count {
			warn!(
				"Path request from {} to {} is outside of subsection {:?}",
				event.get_source(),
				event.get_target(),
				event.get_subsection().get()
			);
			false
		} else {
			pathfinder.find_path(subsection, event.get_source(), event.get_target())
		};
		let Ok(mut entity_commands) = commands.get_entity(event.get_requester()) else {
			debug!("Requester of path no longer exists");
			continue;
		};
		if found {
			entity_commands.insert(TileRoute::new(
				event.get_subsection(),
				pathfinder.get_path(),
			));
		} else {
			entity_commands.remove::<TileRoute>();
		}
	}
}

//! Driving subsections through the events of the plugin
//!

use bevy::prelude::*;
use bevy_subsection_tiles_plugin::prelude::*;

/// An app with the plugin and a single empty `4x3` subsection
fn app_with_subsection() -> (App, Entity) {
	let mut app = App::new();
	app.add_plugins((MinimalPlugins, SubsectionTilesPlugin));
	let entity = app
		.world_mut()
		.spawn(SubsectionBundle::new(
			SubsectionID::new(0, 0),
			GridDimensions::new(16, 4, 3),
		))
		.id();
	(app, entity)
}

/// Collect every event of type `E` which is currently buffered
fn read_events<E: Event + Clone>(app: &App) -> Vec<E> {
	let events = app.world().resource::<Events<E>>();
	let mut cursor = events.get_cursor();
	cursor.read(events).cloned().collect()
}

#[test]
fn set_tile_type_event() {
	let (mut app, entity) = app_with_subsection();
	app.world_mut().send_event(EventSetTileType::new(
		SubsectionID::new(0, 0),
		6,
		TileType::Sand,
		2,
	));
	app.update();
	let subsection = app.world().get::<Subsection>(entity).unwrap();
	let tile = subsection.get_tile_for_index(6);
	assert_eq!(TileType::Sand, tile.get_tile_type());
	assert_eq!(2, tile.get_variant());
}

#[test]
fn events_for_other_subsections_are_ignored() {
	let (mut app, entity) = app_with_subsection();
	app.world_mut().send_event(EventSetTileType::new(
		SubsectionID::new(1, 0),
		6,
		TileType::Water,
		0,
	));
	app.world_mut().send_event(EventSetTileType::new(
		SubsectionID::new(0, 0),
		99,
		TileType::Water,
		0,
	));
	app.update();
	let subsection = app.world().get::<Subsection>(entity).unwrap();
	assert!(subsection
		.get_tiles()
		.iter()
		.all(|t| t.get_tile_type() == TileType::Ground));
}

#[test]
fn spawn_toggle_events() {
	let (mut app, entity) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	app.world_mut()
		.send_event(EventToggleHeroSpawn { subsection: id, index: 2 });
	app.world_mut()
		.send_event(EventToggleEnemySpawn { subsection: id, index: 5 });
	app.update();
	app.world_mut()
		.send_event(EventToggleHeroSpawn { subsection: id, index: 4 });
	app.update();
	let subsection = app.world().get::<Subsection>(entity).unwrap();
	assert_eq!(Some(4), subsection.get_hero_spawn_point());
	assert_eq!(vec![5], subsection.get_enemy_spawn_points());
}

#[test]
fn reserved_tile_types_are_ignored() {
	let (mut app, entity) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	app.world_mut()
		.send_event(EventSetTileType::new(id, 4, TileType::Door, 0));
	app.world_mut()
		.send_event(EventSetTileType::new(id, 5, TileType::Stairs, 0));
	app.update();
	let subsection = app.world().get::<Subsection>(entity).unwrap();
	assert_eq!(TileType::Ground, subsection.get_tile_for_index(4).get_tile_type());
	assert_eq!(TileType::Ground, subsection.get_tile_for_index(5).get_tile_type());
}

#[test]
fn clear_event() {
	let (mut app, entity) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	app.world_mut()
		.send_event(EventSetTileType::new(id, 0, TileType::Tree, 1));
	app.world_mut()
		.send_event(EventToggleEnemySpawn { subsection: id, index: 3 });
	app.update();
	app.world_mut()
		.send_event(EventClearSubsection { subsection: id });
	app.update();
	let subsection = app.world().get::<Subsection>(entity).unwrap();
	assert_eq!(TileType::Ground, subsection.get_tile_for_index(0).get_tile_type());
	assert!(subsection.get_enemy_spawn_points().is_empty());
}

#[test]
fn clear_event_resets_pathfinder() {
	let (mut app, entity) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	let actor = app.world_mut().spawn_empty().id();
	app.world_mut()
		.send_event(EventPathRequest::new(actor, id, 0, 11));
	app.update();
	let pathfinder = app.world().get::<Pathfinder>(entity).unwrap();
	assert_eq!(PathfinderState::FoundPath, pathfinder.get_state());
	app.world_mut()
		.send_event(EventClearSubsection { subsection: id });
	app.update();
	let pathfinder = app.world().get::<Pathfinder>(entity).unwrap();
	assert_eq!(PathfinderState::Idle, pathfinder.get_state());
	assert_eq!(0, pathfinder.get_path_size());
}

#[test]
fn save_then_load_announces_spawns() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("0_0.bin");
	let (mut app, entity) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	app.world_mut()
		.send_event(EventToggleHeroSpawn { subsection: id, index: 5 });
	app.world_mut()
		.send_event(EventToggleEnemySpawn { subsection: id, index: 11 });
	app.world_mut().send_event(EventSaveSubsection {
		subsection: id,
		path: path.clone(),
	});
	app.update();
	assert!(path.exists());
	app.world_mut()
		.send_event(EventClearSubsection { subsection: id });
	app.update();
	app.world_mut()
		.send_event(EventLoadSubsection { subsection: id, path });
	app.update();
	let heroes: Vec<EventHeroSpawn> = read_events(&app);
	let actual = vec![EventHeroSpawn {
		subsection: id,
		index: 5,
		position: Vec2::new(24.0, 24.0),
	}];
	assert_eq!(actual, heroes);
	let enemies: Vec<EventEnemySpawn> = read_events(&app);
	let actual = vec![EventEnemySpawn {
		subsection: id,
		index: 11,
		position: Vec2::new(56.0, 40.0),
	}];
	assert_eq!(actual, enemies);
	let subsection = app.world().get::<Subsection>(entity).unwrap();
	assert_eq!(Some(5), subsection.get_hero_spawn_point());
}

#[test]
fn bundle_from_disk_announces_spawns() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("0_0.bin");
	let dimensions = GridDimensions::new(16, 4, 3);
	let mut subsection = Subsection::new(dimensions);
	subsection.set_hero_spawn_point_for_tile(5);
	subsection.set_enemy_spawn_point(11);
	assert!(subsection.save(&path));
	let mut app = App::new();
	app.add_plugins((MinimalPlugins, SubsectionTilesPlugin));
	let id = SubsectionID::new(0, 0);
	app.world_mut()
		.spawn(SubsectionBundle::new_from_disk(id, dimensions, &path));
	app.update();
	let heroes: Vec<EventHeroSpawn> = read_events(&app);
	let actual = vec![EventHeroSpawn {
		subsection: id,
		index: 5,
		position: Vec2::new(24.0, 24.0),
	}];
	assert_eq!(actual, heroes);
	let enemies: Vec<EventEnemySpawn> = read_events(&app);
	let actual = vec![EventEnemySpawn {
		subsection: id,
		index: 11,
		position: Vec2::new(56.0, 40.0),
	}];
	assert_eq!(actual, enemies);
	// only announced once
	app.update();
	app.update();
	assert!(read_events::<EventHeroSpawn>(&app).is_empty());
}

#[test]
fn load_of_missing_file_is_empty_level() {
	let dir = tempfile::tempdir().unwrap();
	let (mut app, entity) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	app.world_mut()
		.send_event(EventSetTileType::new(id, 1, TileType::Rock, 0));
	app.update();
	app.world_mut().send_event(EventLoadSubsection {
		subsection: id,
		path: dir.path().join("missing.bin"),
	});
	app.update();
	let subsection = app.world().get::<Subsection>(entity).unwrap();
	assert_eq!(TileType::Ground, subsection.get_tile_for_index(1).get_tile_type());
	assert!(read_events::<EventHeroSpawn>(&app).is_empty());
}

#[test]
fn path_request_inserts_route() {
	let (mut app, _) = app_with_subsection();
	let actor = app.world_mut().spawn_empty().id();
	app.world_mut().send_event(EventPathRequest::new(
		actor,
		SubsectionID::new(0, 0),
		0,
		11,
	));
	app.update();
	let route = app.world().get::<TileRoute>(actor).unwrap();
	assert_eq!(5, route.get_steps().len());
	assert_eq!(Some(11), route.get_steps().back().copied());
}

#[test]
fn edits_apply_before_routing() {
	let (mut app, _) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	let actor = app.world_mut().spawn_empty().id();
	// wall off the right hand column within the same frame as the request
	for index in [2, 6, 10] {
		app.world_mut()
			.send_event(EventSetTileType::new(id, index, TileType::Water, 0));
	}
	app.world_mut()
		.send_event(EventPathRequest::new(actor, id, 0, 3));
	app.update();
	assert!(app.world().get::<TileRoute>(actor).is_none());
}

#[test]
fn failed_request_removes_stale_route() {
	let (mut app, _) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	let actor = app.world_mut().spawn_empty().id();
	app.world_mut()
		.send_event(EventPathRequest::new(actor, id, 0, 11));
	app.update();
	assert!(app.world().get::<TileRoute>(actor).is_some());
	app.world_mut()
		.send_event(EventPathRequest::new(actor, id, 11, 11));
	app.update();
	assert!(app.world().get::<TileRoute>(actor).is_none());
}

#[test]
fn finished_route_is_removed() {
	let (mut app, _) = app_with_subsection();
	let id = SubsectionID::new(0, 0);
	let actor = app.world_mut().spawn_empty().id();
	app.world_mut()
		.send_event(EventPathRequest::new(actor, id, 0, 1));
	app.update();
	{
		let mut route = app.world_mut().get_mut::<TileRoute>(actor).unwrap();
		assert_eq!(Some(1), route.peek_next_hop());
		assert_eq!(Some(1), route.next_hop());
		assert!(route.is_finished());
	}
	app.update();
	assert!(app.world().get::<TileRoute>(actor).is_none());
}

#[test]
fn request_from_despawned_actor_is_dropped() {
	let (mut app, _) = app_with_subsection();
	let actor = app.world_mut().spawn_empty().id();
	app.world_mut().despawn(actor);
	app.world_mut().send_event(EventPathRequest::new(
		actor,
		SubsectionID::new(0, 0),
		0,
		11,
	));
	app.update();
	assert!(app.world().get_entity(actor).is_err());
}

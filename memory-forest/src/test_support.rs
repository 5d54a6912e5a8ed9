//! Headless app and input helpers shared by the ECS tests.
use bevy::input::ButtonState;
use bevy::input::InputPlugin;
use bevy::input::mouse::MouseButtonInput;
use bevy::prelude::*;
use bevy::window::{ExitCondition, PrimaryWindow};

use crate::engine::core::app_setup::ForestPlugin;
use crate::engine::core::lifecycle::{ForestBuilt, ForestLifecycleRequest};
use crate::engine::memories::record::{Feeling, MemoryRecord, MemoryRecords, RecordId};
use crate::tools::marker_picking::state::MemorySelected;

/// Logical size of `Window::default()`.
pub const WINDOW_SIZE: Vec2 = Vec2::new(1280.0, 720.0);

#[derive(Resource)]
pub struct Collected<E: Event>(pub Vec<E>);

impl<E: Event> Default for Collected<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn collect<E: Event + Clone>(mut reader: EventReader<E>, mut log: ResMut<Collected<E>>) {
    log.0.extend(reader.read().cloned());
}

/// `ForestPlugin` without rendering, windowing backends or asset IO.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        InputPlugin,
        WindowPlugin {
            primary_window: None,
            exit_condition: ExitCondition::DontExit,
            ..default()
        },
        TransformPlugin,
    ))
    .init_resource::<Assets<Mesh>>()
    .init_resource::<Assets<StandardMaterial>>()
    .add_plugins(ForestPlugin)
    .init_resource::<Collected<MemorySelected>>()
    .init_resource::<Collected<ForestBuilt>>()
    .add_systems(Last, (collect::<MemorySelected>, collect::<ForestBuilt>));
    app
}

pub fn spawn_primary_window(app: &mut App) -> Entity {
    app.world_mut().spawn((Window::default(), PrimaryWindow)).id()
}

pub fn record(id: u64, title: &str, date: Option<&str>, feeling: Feeling) -> MemoryRecord {
    MemoryRecord {
        id: RecordId(id),
        title: title.to_string(),
        date: date.map(str::to_string),
        feeling,
        image: None,
    }
}

/// Three years: 2023 (ids 1, 2), 2024 (id 3) and Unknown (id 4).
pub fn sample_records() -> Vec<MemoryRecord> {
    vec![
        record(1, "First Day", Some("2023-02-15"), Feeling::Happy),
        record(2, "Moving Away", Some("2023-10-01"), Feeling::Sad),
        record(3, "Graduation", Some("2024-05-20"), Feeling::Special),
        record(4, "Rainy Goodbye", None, Feeling::Sad),
    ]
}

pub fn load_records(app: &mut App, records: Vec<MemoryRecord>) {
    app.world_mut()
        .resource_mut::<MemoryRecords>()
        .replace(records)
        .expect("test records use distinct ids");
}

pub fn mount(app: &mut App) {
    app.world_mut().send_event(ForestLifecycleRequest::Mount);
    app.update();
}

pub fn unmount(app: &mut App) {
    app.world_mut().send_event(ForestLifecycleRequest::Unmount);
    app.update();
}

pub fn move_cursor(app: &mut App, window: Entity, position: Vec2) {
    app.world_mut().send_event(CursorMoved {
        window,
        position,
        delta: None,
    });
    app.update();
}

fn send_left(app: &mut App, window: Entity, state: ButtonState) {
    app.world_mut().send_event(MouseButtonInput {
        button: MouseButton::Left,
        state,
        window,
    });
}

pub fn press_left(app: &mut App, window: Entity) {
    send_left(app, window, ButtonState::Pressed);
}

pub fn release_left(app: &mut App, window: Entity) {
    send_left(app, window, ButtonState::Released);
}

/// Press and release in place, one frame apart.
pub fn click(app: &mut App, window: Entity, position: Vec2) {
    move_cursor(app, window, position);
    press_left(app, window);
    app.update();
    release_left(app, window);
    app.update();
}

pub fn selections(app: &App) -> Vec<MemoryRecord> {
    app.world()
        .resource::<Collected<MemorySelected>>()
        .0
        .iter()
        .map(|event| event.record.clone())
        .collect()
}

pub fn built_events(app: &App) -> Vec<ForestBuilt> {
    app.world().resource::<Collected<ForestBuilt>>().0.clone()
}

//! Animation sink — fire-and-forget команды для host-аниматора
//!
//! Core только пишет значения (триггеры, speed параметр), состояние
//! анимации обратно не читается. Host дренит события каждый тик;
//! отсутствие аниматора у host'а деградирует только косметику.

use bevy::prelude::*;

/// Команда аниматору
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AnimationCommand {
    /// One-shot триггер ("Attack", "Hit", "Die")
    Trigger { entity: Entity, name: &'static str },
    /// Непрерывный параметр скорости (normalized, для blend tree)
    Speed { entity: Entity, value: f32 },
}

/// Animation Plugin — только регистрация события
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationCommand>();
    }
}

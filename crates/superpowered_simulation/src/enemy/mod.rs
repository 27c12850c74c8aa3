//! Enemy AI module
//!
//! Враг владеет своим здоровьем (EnemyVitals, Damageable) и гоняет
//! chase/stun/death автомат. Атаки идут через общий combat resolver
//! (AttackProfile + AttackState на той же entity), движение — через
//! navigation collaborator (NavAgent).

use bevy::prelude::*;

pub mod fsm;

pub use fsm::{
    enemy_attack, enemy_chase, enemy_state_transitions, react_to_damage, update_enemy_animation,
    EnemyAgent, EnemyDied, EnemyState, EnemyVitals, StunIntent, DEATH_DESPAWN_DELAY,
};

/// Enemy Plugin — регистрация событий
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StunIntent>().add_event::<EnemyDied>();
    }
}

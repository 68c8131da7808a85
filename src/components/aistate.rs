//! Per-entity enemy AI state.
//!
//! The decision logic lives in [`crate::systems::ai`]; this is only the
//! state record carried between ticks on the runtime object.

use serde::{Deserialize, Serialize};

/// Current phase of the enemy state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AiPhase {
    Idle,
    Approaching,
    Attacking,
    Retreating,
    Blocking,
    Jumping,
    Falling,
    HitStun,
}

/// Mutable AI bookkeeping for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiState {
    pub state: AiPhase,
    /// Seconds spent in the current state.
    pub state_timer: f32,
    /// Seconds until the next decision may be taken.
    pub reaction_timer: f32,
    /// Seconds until another attack may be started.
    pub attack_cooldown: f32,
    pub hit_stun_timer: f32,
    /// Index into the configured attack list while `Attacking`.
    pub current_attack: Option<usize>,
    /// Health observed last tick; a decrease forces `HitStun`.
    /// `None` until the first observation.
    pub previous_health: Option<f32>,
    pub target_player_id: Option<String>,
}

impl Default for AiState {
    fn default() -> Self {
        Self {
            state: AiPhase::Idle,
            state_timer: 0.0,
            reaction_timer: 0.0,
            attack_cooldown: 0.0,
            hit_stun_timer: 0.0,
            current_attack: None,
            previous_health: None,
            target_player_id: None,
        }
    }
}

impl AiState {
    /// Whether the machine is locked into its current state this tick.
    pub fn is_locked(&self) -> bool {
        self.state == AiPhase::HitStun || self.state == AiPhase::Attacking
    }
}

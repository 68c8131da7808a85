//! Difficulty-driven enemy state machine.
//!
//! An entity is AI-driven when its category is `enemy` and it carries a
//! script behavior named `"enemyAI"`; that script's properties are the
//! tuning surface the editor exposes. Each tick every AI entity runs:
//!
//! 1. hit detection — a health drop since the last tick forces `HitStun`;
//! 2. bookkeeping — reaction/cooldown/stun timers count down;
//! 3. decision — only when the reaction timer has elapsed and the machine
//!    is not locked mid-attack or stunned, a weighted-random tree picks the
//!    next state (block, attack, approach, retreat, jump, idle);
//! 4. continuation — the current state's fixed behavior runs every tick
//!    (velocity, clip selection) whether or not a decision happened;
//! 5. physics — gravity plus the same swept horizontal/vertical resolution
//!    every other mover uses, so AI bodies obey identical platform rules.
//!
//! The reaction interval shrinks with difficulty and is re-randomized ±20%
//! on every decision, so higher difficulty reacts faster but never on a
//! metronome.

use fastrand::Rng;
use glam::Vec2;
use log::warn;
use rustc_hash::FxHashSet;

use crate::components::aistate::{AiPhase, AiState};
use crate::components::behavior::ScriptBehavior;
use crate::components::gameobject::Category;
use crate::components::simobject::SimulatedGameObject;
use crate::resources::simstate::SimState;
use crate::systems::animation;
use crate::systems::physics::{apply_gravity, gather_obstacles, step_kinematics};

/// Script name that opts an enemy into AI control.
pub const AI_SCRIPT: &str = "enemyAI";

const HIT_STUN_DURATION: f32 = 0.4;
const JUMP_IMPULSE: f32 = 350.0;
/// Reaction interval bounds across difficulty 0..=10.
const REACTION_SLOWEST: f32 = 0.8;
const REACTION_FASTEST: f32 = 0.15;
/// Fallback attack length when the configured clip is missing.
const DEFAULT_ATTACK_DURATION: f32 = 0.4;

/// One configured attack.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSpec {
    pub range: f32,
    pub cooldown: f32,
    pub animation: String,
}

/// Tuning read from the `enemyAI` script properties.
#[derive(Debug, Clone, PartialEq)]
pub struct AiParams {
    /// 0 (sluggish) to 10 (relentless).
    pub difficulty: f32,
    pub speed: f32,
    pub attacks: Vec<AttackSpec>,
}

impl AiParams {
    /// Parse tuning from the script's free-form properties. Attack 1 always
    /// exists (defaults applied); attacks 2 and 3 exist only when their
    /// range is authored.
    pub fn from_script(script: &ScriptBehavior) -> Self {
        let difficulty = script.number("difficulty").unwrap_or(5.0).clamp(0.0, 10.0);
        let speed = script.number("speed").unwrap_or(80.0).max(0.0);

        let mut attacks = vec![AttackSpec {
            range: script.number("attack1Range").unwrap_or(40.0).max(1.0),
            cooldown: script.number("attack1Cooldown").unwrap_or(1.0).max(0.05),
            animation: script
                .string("attack1Animation")
                .unwrap_or("attack")
                .to_string(),
        }];
        for n in 2..=3 {
            let Some(range) = script.number(&format!("attack{}Range", n)) else {
                continue;
            };
            attacks.push(AttackSpec {
                range: range.max(1.0),
                cooldown: script
                    .number(&format!("attack{}Cooldown", n))
                    .unwrap_or(1.0)
                    .max(0.05),
                animation: script
                    .string(&format!("attack{}Animation", n))
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("attack{}", n)),
            });
        }

        Self {
            difficulty,
            speed,
            attacks,
        }
    }

    /// Next reaction delay: difficulty-scaled base, randomized ±20%.
    fn reaction_interval(&self, rng: &mut Rng) -> f32 {
        let t = self.difficulty / 10.0;
        let base = REACTION_SLOWEST + (REACTION_FASTEST - REACTION_SLOWEST) * t;
        base * (0.8 + 0.4 * rng.f32())
    }
}

/// Advance every AI-driven entity by one tick.
pub fn update_ai(state: &mut SimState, dt: f32) {
    let mut objects = state.store.to_vec();
    let indices: Vec<usize> = objects
        .iter()
        .enumerate()
        .filter(|(_, o)| {
            o.object.active
                && o.object.category == Category::Enemy
                && o.object.script(AI_SCRIPT).is_some()
        })
        .map(|(i, _)| i)
        .collect();

    let player = objects
        .iter()
        .find(|o| o.object.active && o.object.category == Category::Player)
        .map(|o| (o.id().to_string(), o.position, o.current_animation.clone()));

    for index in indices {
        let mut subject = objects[index].clone();
        step_entity(
            &mut subject,
            player.as_ref(),
            dt,
            &mut state.rng,
            &mut state.warned_missing_clips,
        );
        let obstacles = gather_obstacles(&objects, subject.id());
        apply_gravity(&mut subject, dt);
        step_kinematics(&mut subject, dt, &obstacles);
        objects[index] = subject;
    }
    state.store.replace_all(objects);
}

fn step_entity(
    subject: &mut SimulatedGameObject,
    player: Option<&(String, Vec2, Option<String>)>,
    dt: f32,
    rng: &mut Rng,
    warned: &mut FxHashSet<String>,
) {
    let params = match subject.object.script(AI_SCRIPT) {
        Some(script) => AiParams::from_script(script),
        None => return,
    };
    let health = subject
        .object
        .script(AI_SCRIPT)
        .and_then(|s| s.number("health"));
    let mut ai = subject.ai.take().unwrap_or_default();

    // Hit detection overrides everything else.
    if let (Some(health), Some(previous)) = (health, ai.previous_health) {
        if health < previous {
            enter(&mut ai, AiPhase::HitStun);
            ai.hit_stun_timer = HIT_STUN_DURATION;
            ai.current_attack = None;
        }
    }
    ai.previous_health = health.or(ai.previous_health);

    ai.state_timer += dt;
    ai.reaction_timer = (ai.reaction_timer - dt).max(0.0);
    ai.attack_cooldown = (ai.attack_cooldown - dt).max(0.0);
    ai.hit_stun_timer = (ai.hit_stun_timer - dt).max(0.0);

    // Self-terminating states.
    match ai.state {
        AiPhase::HitStun => {
            if ai.hit_stun_timer <= 0.0 {
                enter(&mut ai, AiPhase::Idle);
            }
        }
        AiPhase::Attacking => {
            let duration = ai
                .current_attack
                .and_then(|i| params.attacks.get(i))
                .and_then(|attack| subject.object.animation(&attack.animation))
                .map(|clip| clip.duration())
                .filter(|d| *d > 0.0)
                .unwrap_or(DEFAULT_ATTACK_DURATION);
            if ai.state_timer >= duration {
                ai.current_attack = None;
                enter(&mut ai, AiPhase::Idle);
            }
        }
        AiPhase::Jumping => {
            if subject.velocity.y > 0.0 {
                enter(&mut ai, AiPhase::Falling);
            }
        }
        AiPhase::Falling => {
            if subject.is_grounded {
                enter(&mut ai, AiPhase::Idle);
            }
        }
        _ => {}
    }

    // Decision, gated by the reaction timer and the locked states.
    if ai.reaction_timer <= 0.0 && !ai.is_locked() {
        if let Some((player_id, player_pos, player_clip)) = player {
            ai.target_player_id = Some(player_id.clone());
            decide(
                &mut ai,
                &params,
                subject.position,
                *player_pos,
                player_clip.as_deref(),
                subject.is_grounded,
                rng,
            );
        } else {
            enter(&mut ai, AiPhase::Idle);
        }
        ai.reaction_timer = params.reaction_interval(rng);
    }

    // Continuation: the current state's fixed per-tick behavior.
    let toward_player = player
        .map(|(_, pos, _)| (pos.x - subject.position.x).signum())
        .unwrap_or(0.0);
    match ai.state {
        AiPhase::Idle => {
            subject.velocity.x = 0.0;
            select_clip(subject, "idle", warned);
        }
        AiPhase::Approaching => {
            subject.velocity.x = toward_player * params.speed;
            select_clip(subject, "walk", warned);
        }
        AiPhase::Retreating => {
            subject.velocity.x = -toward_player * params.speed;
            select_clip(subject, "walk", warned);
        }
        AiPhase::Blocking => {
            subject.velocity.x = 0.0;
            select_clip(subject, "block", warned);
        }
        AiPhase::Attacking => {
            subject.velocity.x = 0.0;
            if let Some(attack) = ai.current_attack.and_then(|i| params.attacks.get(i)) {
                let clip = attack.animation.clone();
                select_clip(subject, &clip, warned);
            }
        }
        AiPhase::Jumping => {
            if subject.is_grounded && subject.velocity.y >= 0.0 {
                subject.velocity.y = -JUMP_IMPULSE;
            }
            select_clip(subject, "jump", warned);
        }
        AiPhase::Falling => {
            select_clip(subject, "fall", warned);
        }
        AiPhase::HitStun => {
            subject.velocity.x = 0.0;
            select_clip(subject, "hurt", warned);
        }
    }

    subject.ai = Some(ai);
}

/// The once-per-reaction weighted decision tree.
fn decide(
    ai: &mut AiState,
    params: &AiParams,
    position: Vec2,
    player_pos: Vec2,
    player_clip: Option<&str>,
    grounded: bool,
    rng: &mut Rng,
) {
    let distance = position.distance(player_pos);
    let primary_range = params.attacks[0].range;
    let t = params.difficulty / 10.0;

    // Block a player attack happening inside melee range.
    let player_attacking = player_clip.is_some_and(|c| c.starts_with("attack"));
    if player_attacking && distance <= primary_range * 1.2 {
        let block_chance = 0.2 + 0.5 * t;
        if rng.f32() < block_chance {
            enter(ai, AiPhase::Blocking);
            return;
        }
    }

    // Attack when something is in range and off cooldown.
    if ai.attack_cooldown <= 0.0 {
        let in_range: Vec<usize> = params
            .attacks
            .iter()
            .enumerate()
            .filter(|(_, a)| distance <= a.range)
            .map(|(i, _)| i)
            .collect();
        if !in_range.is_empty() {
            let attack_chance = 0.5 + 0.4 * t;
            if rng.f32() < attack_chance {
                // High difficulty picks the strongest in-range attack
                // (longest cooldown); low difficulty picks uniformly.
                let choice = if params.difficulty >= 7.0 {
                    *in_range
                        .iter()
                        .max_by(|a, b| {
                            params.attacks[**a]
                                .cooldown
                                .total_cmp(&params.attacks[**b].cooldown)
                        })
                        .unwrap_or(&in_range[0])
                } else {
                    in_range[rng.usize(..in_range.len())]
                };
                ai.current_attack = Some(choice);
                // Cooldown shortens as difficulty rises.
                let scale = 1.5 - t;
                ai.attack_cooldown = (params.attacks[choice].cooldown * scale).max(0.3);
                enter(ai, AiPhase::Attacking);
                return;
            }
        }
    }

    // Distance bands relative to the primary attack's range.
    if distance < primary_range * 0.6 {
        enter(ai, AiPhase::Retreating);
    } else if distance <= primary_range * 3.0 {
        if grounded && rng.f32() < 0.1 {
            enter(ai, AiPhase::Jumping);
        } else {
            enter(ai, AiPhase::Approaching);
        }
    } else {
        enter(ai, AiPhase::Idle);
    }
}

fn enter(ai: &mut AiState, state: AiPhase) {
    if ai.state != state {
        ai.state = state;
        ai.state_timer = 0.0;
    }
}

/// Clip selection that warns once per entity+clip instead of every tick.
fn select_clip(subject: &mut SimulatedGameObject, name: &str, warned: &mut FxHashSet<String>) {
    if subject.object.animation(name).is_none() {
        let key = format!("{}:{}", subject.id(), name);
        if warned.insert(key) {
            warn!(
                "ai entity '{}' has no '{}' animation, keeping current clip",
                subject.name(),
                name
            );
        }
        return;
    }
    animation::set_animation(subject, name, false);
}

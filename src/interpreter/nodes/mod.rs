//! Node handlers: the closed dispatch table of the interpreter.
//!
//! Every [`NodeKind`] maps to one handler function here. Handlers are plain
//! functions of `(node, entered input pin, context)`: they may pull values
//! from their input pins, cache their own outputs, mutate the entity store
//! copy-on-write, and push execution into downstream exec pins. A handler
//! never suspends; the whole wave runs synchronously.
//!
//! The match below is exhaustive, so adding a kind without a handler is a
//! compile error rather than a silent no-op. `Unknown` is the one
//! deliberately inert kind.
//!
//! Submodules group the catalog the way the editor palette does:
//! - [`events`] – wave roots (`onStart`, `onUpdate`, `onCollision`, keys)
//! - [`flow`] – branching, trigger-once, timers, countdowns, logging
//! - [`data`] – pure pull-evaluated producers (literals, math, queries)
//! - [`object`] – entity actions (move, spawn, destroy, animate, text)
//! - [`stage`] – camera, audio/video, scene flow, pausing

pub mod data;
pub mod events;
pub mod flow;
pub mod object;
pub mod stage;

use crate::components::graph::{GraphNode, NodeKind};
use crate::interpreter::context::ExecutionContext;

/// Handler signature: the node, the id of the input pin execution entered
/// through (`None` for pull evaluation), and the wave context.
pub type NodeHandler = fn(&GraphNode, Option<&str>, &mut ExecutionContext);

/// Static kind → handler table.
pub fn handler_for(kind: NodeKind) -> Option<NodeHandler> {
    match kind {
        NodeKind::OnStart => Some(events::on_start),
        NodeKind::OnUpdate => Some(events::on_update),
        NodeKind::OnCollision => Some(events::on_collision),
        NodeKind::OnKeyPress => Some(events::on_key),
        NodeKind::OnKeyRelease => Some(events::on_key),

        NodeKind::Branch => Some(flow::branch),
        NodeKind::TriggerOnce => Some(flow::trigger_once),
        NodeKind::Timer => Some(flow::timer),
        NodeKind::Countdown => Some(flow::countdown),
        NodeKind::Log => Some(flow::log_message),

        NodeKind::Number => Some(data::number),
        NodeKind::Boolean => Some(data::boolean),
        NodeKind::String => Some(data::string),
        NodeKind::Vector2 => Some(data::vector2),
        NodeKind::RandomRange => Some(data::random_range),
        NodeKind::MathOp => Some(data::math_op),
        NodeKind::Compare => Some(data::compare),
        NodeKind::LogicOp => Some(data::logic_op),
        NodeKind::KeyDown => Some(data::key_down),
        NodeKind::DeltaTime => Some(data::delta_time),
        NodeKind::GetObject => Some(data::get_object),
        NodeKind::GetPosition => Some(data::get_position),
        NodeKind::GetVelocity => Some(data::get_velocity),
        NodeKind::Distance => Some(data::distance),
        NodeKind::GetProperty => Some(data::get_property),

        NodeKind::SetPosition => Some(object::set_position),
        NodeKind::Translate => Some(object::translate),
        NodeKind::SetVelocity => Some(object::set_velocity),
        NodeKind::SetAnimation => Some(object::set_animation),
        NodeKind::SetText => Some(object::set_text),
        NodeKind::SetProperty => Some(object::set_property),
        NodeKind::SpawnObject => Some(object::spawn_object),
        NodeKind::DestroyObject => Some(object::destroy_object),
        NodeKind::CharacterMove => Some(object::character_move),
        NodeKind::MoveTowards => Some(object::move_towards),

        NodeKind::CameraFollow => Some(stage::camera_follow),
        NodeKind::SetCameraZoom => Some(stage::set_camera_zoom),
        NodeKind::PlayAudio => Some(stage::play_audio),
        NodeKind::StopAudio => Some(stage::stop_audio),
        NodeKind::PlayVideo => Some(stage::play_video),
        NodeKind::StopVideo => Some(stage::stop_video),
        NodeKind::ChangeScene => Some(stage::change_scene),
        NodeKind::PauseGame => Some(stage::pause_game),
        NodeKind::ResumeGame => Some(stage::resume_game),
        NodeKind::TogglePause => Some(stage::toggle_pause),

        NodeKind::Unknown => None,
    }
}

//! Per-tick simulation passes.
//!
//! Each submodule is one stage of the fixed tick order driven by
//! [`Simulation::step`](crate::engine::Simulation::step):
//!
//! 1. [`timers`] – due timers/countdowns fire through the interpreter
//! 2. [`animation`] – the animation clock advances every active clip
//! 3. [`ai`] – enemy state machines decide and move (own physics pass)
//! 4. [`kinematics`] – patrol platforms and projectiles integrate
//! 5. the `onUpdate` wave runs (see [`crate::interpreter`])
//! 6. [`collision`] – hitbox overlap detection feeds `onCollision`
//!
//! [`physics`] is the shared toolbox (hitbox derivation, swept solve,
//! movement resolution) used by stages 3 and 5 rather than a stage itself.

pub mod ai;
pub mod animation;
pub mod collision;
pub mod kinematics;
pub mod physics;
pub mod timers;

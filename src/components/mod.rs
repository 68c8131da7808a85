//! Leaf data types of the simulation.
//!
//! This module groups the records both hosts exchange with the core: the
//! authored scene data and its runtime projections. Nothing here ticks on
//! its own; the per-frame passes live in [`crate::systems`] and
//! [`crate::interpreter`].
//!
//! Submodules overview:
//! - [`gameobject`] – authored object identity, category, and behavior list
//! - [`behavior`] – the closed behavior variants (transform, sprite, platform, ...)
//! - [`animation`] – animation clips, frames, and authored hitboxes
//! - [`simobject`] – runtime projection with position/velocity/clock state
//! - [`aistate`] – enemy state-machine bookkeeping carried between ticks
//! - [`graph`] – visual-script nodes, pins, and connections
//! - [`scene`] – the scene record bundling objects and graph
//! - [`vec2xy`] – serde adapter for the editor's `{x, y}` vector form

pub mod aistate;
pub mod animation;
pub mod behavior;
pub mod gameobject;
pub mod graph;
pub mod scene;
pub mod simobject;
pub mod vec2xy;

//! Nodal Engine core.
//!
//! The canonical execution core for node-graph-driven 2D scenes: one
//! library embedded identically by the in-editor live preview and the
//! exported standalone build, so authored behavior runs the same in both.
//!
//! This crate deliberately ends at the data boundary. It consumes a scene
//! record (objects, layers, nodes, connections) and per-frame input, and
//! produces a per-tick snapshot (object list, camera, video state) for a
//! renderer it knows nothing about. Editors, packaging, and rendering live
//! in the hosts.
//!
//! # Module map
//!
//! - [`components`] – scene data and its runtime projections
//! - [`resources`] – per-scene mutable state (store, input, camera, timers)
//! - [`systems`] – the fixed per-tick passes (animation, physics, AI, ...)
//! - [`interpreter`] – pin evaluation, the node handler table, waves
//! - [`events`] – records passed from systems into the interpreter
//! - [`engine`] – the [`Simulation`](engine::Simulation) façade hosts embed

pub mod components;
pub mod engine;
pub mod events;
pub mod interpreter;
pub mod resources;
pub mod systems;

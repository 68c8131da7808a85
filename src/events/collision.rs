//! Collision event records.
//!
//! The overlap pass in [`crate::systems::collision`] emits one
//! [`CollisionEvent`] per overlapping entity pair per tick; the engine then
//! fires the graph's `onCollision` roots once per event. Observers of the
//! event are node graphs, not code: additional collision details (normals,
//! penetration) can be added by extending this type when needed.

/// Two active entities whose custom hitboxes overlap this tick.
///
/// `a` and `b` are entity ids. No ordering guarantees are provided beyond
/// being stable within a tick (store order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: String,
    pub b: String,
}

//! Pairwise hitbox overlap detection for `onCollision` events.
//!
//! This is the discrete companion to the swept solver in
//! [`crate::systems::physics`]: it does not resolve motion, it only reports
//! which entity pairs touch this tick so the graph can react.

use crate::components::simobject::SimulatedGameObject;
use crate::events::collision::CollisionEvent;
use crate::systems::physics::collision_shapes;

/// Scan all active entities that opted into custom hitboxes and report each
/// overlapping pair once. The first overlapping hitbox pair short-circuits
/// the remaining boxes of that entity pair.
pub fn detect_overlaps(objects: &[SimulatedGameObject]) -> Vec<CollisionEvent> {
    let candidates: Vec<&SimulatedGameObject> = objects
        .iter()
        .filter(|o| o.object.active && o.object.use_custom_hitboxes)
        .collect();

    let mut events = Vec::new();
    for (i, a) in candidates.iter().enumerate() {
        let shapes_a = collision_shapes(a);
        for b in &candidates[i + 1..] {
            let shapes_b = collision_shapes(b);
            let touching = shapes_a
                .iter()
                .any(|sa| shapes_b.iter().any(|sb| sa.overlaps(sb)));
            if touching {
                events.push(CollisionEvent {
                    a: a.id().to_string(),
                    b: b.id().to_string(),
                });
            }
        }
    }
    events
}

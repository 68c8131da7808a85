//! Scripted-motion pass: patrol platforms and ballistic projectiles.
//!
//! Runs after the AI update and before the `onUpdate` wave, so platform
//! velocities are current when movers resolve against them in the same tick.
//!
//! Patrol platforms ping-pong along their configured direction between their
//! initial position and `move_distance` away from it. The travel phase is
//! carried entirely by the object's own `velocity` field; there is no hidden
//! side-state, and riders read that velocity during the swept solve.
//!
//! Projectile-category objects integrate their velocity with no collision
//! resolution of their own; hits are delivered through the hitbox overlap
//! pass and `onCollision`.

use glam::Vec2;

use crate::components::gameobject::Category;
use crate::resources::store::ObjectStore;

/// Advance platform patrols and projectile motion by one tick.
pub fn update_kinematics(store: &mut ObjectStore, dt: f32) {
    let mut objects = store.to_vec();
    for obj in &mut objects {
        if !obj.object.active {
            continue;
        }
        if let Some(platform) = obj.object.platform_controller() {
            let direction = platform.move_direction;
            let speed = platform.move_speed;
            let distance = platform.move_distance;
            if speed <= 0.0 || distance <= 0.0 || direction == Vec2::ZERO {
                continue;
            }
            let dir = direction.normalize();
            // Signed travel along the patrol axis from the anchor.
            let travel = (obj.position - obj.initial_position).dot(dir);
            if obj.velocity == Vec2::ZERO {
                obj.velocity = dir * speed;
            } else if travel >= distance {
                obj.velocity = -dir * speed;
            } else if travel <= 0.0 && obj.velocity.dot(dir) < 0.0 {
                obj.velocity = dir * speed;
            }
            obj.position += obj.velocity * dt;
        } else if obj.object.category == Category::Bullet {
            obj.position += obj.velocity * dt;
        }
    }
    store.replace_all(objects);
}

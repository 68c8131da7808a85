//! Continuous-collision physics: hitbox derivation and the swept AABB solve.
//!
//! Coordinates are screen-style: x grows right, y grows **down**. Gravity is
//! positive y; an "upward" collision normal (a landing) is `(0, -1)`.
//!
//! Movement resolution is axis-split and order-sensitive: the horizontal
//! displacement is resolved first against every solid obstacle, then the
//! vertical displacement is resolved from the post-horizontal position,
//! where jumpthrough platforms only count for downward landings. The same
//! routine serves the AI pass, the `characterMove` node, and anything else
//! that moves a body through the world, which is what keeps the live preview
//! and the exported build identical.

use glam::Vec2;
use smallvec::SmallVec;

use crate::components::behavior::CollisionType;
use crate::components::gameobject::Category;
use crate::components::simobject::SimulatedGameObject;

/// Downward acceleration applied by gravity-integrating movers, in px/s².
pub const GRAVITY: f32 = 800.0;

/// Base rendered sprite size in pixels; world size is `32 × |scale|`.
pub const BASE_SPRITE_SIZE: f32 = 32.0;

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Result of a swept test: earliest touch time in `[0, 1]` of the
/// displacement step, and the surface normal at contact.
///
/// `time == 1` with a zero normal means no collision within the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub time: f32,
    pub normal: Vec2,
}

pub const NO_HIT: SweepHit = SweepHit {
    time: 1.0,
    normal: Vec2::ZERO,
};

/// Swept AABB test of `moving` displaced by `displacement` against the
/// static `obstacle`, using per-axis inverse-overlap entry/exit times.
///
/// The collision time is the later of the two axis entry times; the normal
/// sits on the limiting axis. When both entries tie, x wins (entry times
/// ordered descending, x compared first). Identical inputs always produce
/// identical output.
pub fn sweep_aabb(moving: Aabb, displacement: Vec2, obstacle: Aabb) -> SweepHit {
    // Per-axis distances to first and last touch.
    let (entry_dist_x, exit_dist_x) = if displacement.x >= 0.0 {
        (obstacle.min.x - moving.max.x, obstacle.max.x - moving.min.x)
    } else {
        (obstacle.max.x - moving.min.x, obstacle.min.x - moving.max.x)
    };
    let (entry_dist_y, exit_dist_y) = if displacement.y >= 0.0 {
        (obstacle.min.y - moving.max.y, obstacle.max.y - moving.min.y)
    } else {
        (obstacle.max.y - moving.min.y, obstacle.min.y - moving.max.y)
    };

    // A zero-displacement axis collides only if the boxes already overlap
    // on that axis; otherwise the pair can never meet this step.
    let (entry_x, exit_x) = if displacement.x == 0.0 {
        if moving.max.x <= obstacle.min.x || moving.min.x >= obstacle.max.x {
            return NO_HIT;
        }
        (f32::NEG_INFINITY, f32::INFINITY)
    } else {
        (
            entry_dist_x / displacement.x,
            exit_dist_x / displacement.x,
        )
    };
    let (entry_y, exit_y) = if displacement.y == 0.0 {
        if moving.max.y <= obstacle.min.y || moving.min.y >= obstacle.max.y {
            return NO_HIT;
        }
        (f32::NEG_INFINITY, f32::INFINITY)
    } else {
        (
            entry_dist_y / displacement.y,
            exit_dist_y / displacement.y,
        )
    };

    let entry_time = entry_x.max(entry_y);
    let exit_time = exit_x.min(exit_y);

    // Separating, receding, or touching outside this step.
    if entry_time > exit_time
        || (entry_x < 0.0 && entry_y < 0.0)
        || entry_x > 1.0
        || entry_y > 1.0
    {
        return NO_HIT;
    }

    let normal = if entry_x >= entry_y {
        if displacement.x >= 0.0 {
            Vec2::new(-1.0, 0.0)
        } else {
            Vec2::new(1.0, 0.0)
        }
    } else if displacement.y >= 0.0 {
        Vec2::new(0.0, -1.0)
    } else {
        Vec2::new(0.0, 1.0)
    };

    SweepHit {
        time: entry_time.max(0.0),
        normal,
    }
}

/// World-space collision boxes for an entity.
///
/// Without custom hitboxes this is a single `32 × |scale|` box centered on
/// the position. With them, the active clip's current frame (frame 0 under
/// `syncHitboxes`) supplies local rectangles scaled from the frame's source
/// pixel size to the rendered size and mirrored by the sign of the scale;
/// a locked-to-sprite-bounds box is always the full rendered rectangle.
pub fn collision_shapes(obj: &SimulatedGameObject) -> SmallVec<[Aabb; 4]> {
    let scale = obj.scale();
    let rendered = Vec2::new(
        BASE_SPRITE_SIZE * scale.x.abs(),
        BASE_SPRITE_SIZE * scale.y.abs(),
    );

    let mut shapes = SmallVec::new();
    if obj.object.use_custom_hitboxes {
        if let Some(frame) = obj
            .current_clip()
            .and_then(|clip| clip.hitbox_frame(obj.current_frame))
        {
            let source_w = frame.source_width.unwrap_or(BASE_SPRITE_SIZE).max(1.0);
            let source_h = frame.source_height.unwrap_or(BASE_SPRITE_SIZE).max(1.0);
            let factor = Vec2::new(rendered.x / source_w, rendered.y / source_h);
            for hitbox in &frame.hitboxes {
                if hitbox.locked_to_sprite_bounds {
                    shapes.push(Aabb::from_center_size(obj.position, rendered));
                    continue;
                }
                // Authored rect is in source pixels, origin at the sprite's
                // top-left. Mirroring flips the local center about the
                // sprite center, never the box extents.
                let local_center = Vec2::new(
                    hitbox.x + hitbox.width * 0.5 - source_w * 0.5,
                    hitbox.y + hitbox.height * 0.5 - source_h * 0.5,
                );
                let mirrored = Vec2::new(
                    local_center.x * factor.x * scale.x.signum(),
                    local_center.y * factor.y * scale.y.signum(),
                );
                let size = Vec2::new(hitbox.width * factor.x, hitbox.height * factor.y);
                shapes.push(Aabb::from_center_size(obj.position + mirrored, size));
            }
        }
    }
    if shapes.is_empty() {
        shapes.push(Aabb::from_center_size(obj.position, rendered));
    }
    shapes
}

/// One obstacle box a mover can collide with.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleBox {
    pub aabb: Aabb,
    pub kind: CollisionType,
    /// Obstacle velocity; riders of moving platforms are carried by it.
    pub velocity: Vec2,
}

/// Collect the obstacle boxes a mover must respect: platform-controller
/// entities and hitbox-category entities (always solid).
pub fn gather_obstacles(
    objects: &[SimulatedGameObject],
    exclude_id: &str,
) -> Vec<ObstacleBox> {
    let mut obstacles = Vec::new();
    for obj in objects {
        if !obj.object.active || obj.id() == exclude_id {
            continue;
        }
        let kind = if let Some(platform) = obj.object.platform_controller() {
            platform.collision_type
        } else if obj.object.category == Category::Hitbox {
            CollisionType::Solid
        } else {
            continue;
        };
        for aabb in collision_shapes(obj) {
            obstacles.push(ObstacleBox {
                aabb,
                kind,
                velocity: obj.velocity,
            });
        }
    }
    obstacles
}

/// Integrate gravity into a mover's velocity.
pub fn apply_gravity(obj: &mut SimulatedGameObject, dt: f32) {
    obj.velocity.y += GRAVITY * dt;
}

/// Move an entity by `velocity × dt` with swept collision resolution.
///
/// Horizontal first: clamp by the earliest hit against solid obstacles and
/// zero the horizontal velocity on contact. Vertical second, from the
/// post-horizontal position, against solids and jumpthrough platforms; a
/// jumpthrough only blocks when the contact normal points up (a landing).
/// Landing sets `is_grounded` and rides the platform's own motion.
pub fn step_kinematics(obj: &mut SimulatedGameObject, dt: f32, obstacles: &[ObstacleBox]) {
    obj.is_grounded = false;
    let shapes = collision_shapes(obj);
    let displacement = obj.velocity * dt;

    // Horizontal pass.
    let dx = Vec2::new(displacement.x, 0.0);
    let mut applied_x = displacement.x;
    if displacement.x != 0.0 {
        let mut min_time = 1.0_f32;
        for shape in &shapes {
            for obstacle in obstacles {
                if obstacle.kind != CollisionType::Solid {
                    continue;
                }
                let hit = sweep_aabb(*shape, dx, obstacle.aabb);
                if hit.time < min_time && hit.normal.x != 0.0 {
                    min_time = hit.time;
                }
            }
        }
        applied_x = displacement.x * min_time;
        if min_time < 1.0 {
            obj.velocity.x = 0.0;
        }
    }
    obj.position.x += applied_x;

    // Vertical pass, from the post-horizontal position.
    let dy = Vec2::new(0.0, displacement.y);
    if displacement.y != 0.0 {
        let offset = Vec2::new(applied_x, 0.0);
        let mut min_time = 1.0_f32;
        let mut landing_velocity = None;
        for shape in shapes.iter().map(|s| s.translated(offset)) {
            for obstacle in obstacles {
                let hit = sweep_aabb(shape, dy, obstacle.aabb);
                if hit.normal.y == 0.0 || hit.time >= min_time {
                    continue;
                }
                match obstacle.kind {
                    CollisionType::Solid => {}
                    // Jumpthrough blocks only a downward landing.
                    CollisionType::Jumpthrough => {
                        if hit.normal.y >= 0.0 {
                            continue;
                        }
                    }
                }
                min_time = hit.time;
                landing_velocity = (hit.normal.y < 0.0).then_some(obstacle.velocity);
            }
        }
        obj.position.y += displacement.y * min_time;
        if min_time < 1.0 {
            obj.velocity.y = 0.0;
            if let Some(platform_velocity) = landing_velocity {
                obj.is_grounded = true;
                if platform_velocity != Vec2::ZERO {
                    obj.position += platform_velocity * dt;
                }
            }
        }
    }
}

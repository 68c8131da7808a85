//! End-to-end tick tests: gravity and landing, keyboard platforming, the
//! enemy state machine, and pause semantics, all through `Simulation`.

use serde_json::{json, Value};

use nodalengine::components::aistate::AiPhase;
use nodalengine::engine::Simulation;
use nodalengine::components::scene::Scene;

const DT: f32 = 1.0 / 60.0;

fn scene(value: Value) -> Scene {
    serde_json::from_value(value).expect("test scene must parse")
}

fn pin(id: &str, name: &str, pin_type: &str) -> Value {
    json!({"id": id, "name": name, "type": pin_type})
}

fn conn(id: &str, from: (&str, &str), to: (&str, &str)) -> Value {
    json!({
        "id": id,
        "fromNodeId": from.0,
        "fromOutputId": from.1,
        "toNodeId": to.0,
        "toInputId": to.1,
    })
}

/// A solid floor: default hitbox scaled to `scale` at `(x, y)`.
fn floor_object(id: &str, x: f32, y: f32, scale_x: f32) -> Value {
    json!({
        "id": id,
        "name": id,
        "category": "platform",
        "behaviors": [
            {"type": "transform", "position": {"x": x, "y": y}, "scale": {"x": scale_x, "y": 1.0}},
            {"type": "platformController", "collisionType": "solid"}
        ]
    })
}

fn player_object(id: &str, x: f32, y: f32) -> Value {
    json!({
        "id": id,
        "name": id,
        "category": "player",
        "behaviors": [
            {"type": "transform", "position": {"x": x, "y": y}},
            {"type": "spriteRenderer", "sprite": "hero"}
        ]
    })
}

fn enemy_object(id: &str, x: f32, y: f32, props: Value) -> Value {
    json!({
        "id": id,
        "name": id,
        "category": "enemy",
        "behaviors": [
            {"type": "transform", "position": {"x": x, "y": y}},
            {"type": "spriteRenderer", "sprite": "brute"},
            {"type": "script", "script": "enemyAI", "properties": props}
        ]
    })
}

/// onUpdate → characterMove(hero), gravity on.
fn character_move_graph() -> (Value, Value) {
    let nodes = json!([
        {
            "id": "root", "type": "onUpdate",
            "outputs": [pin("root-then", "then", "exec")]
        },
        {
            "id": "ctl", "type": "characterMove",
            "inputs": [pin("ctl-in", "in", "exec")],
            "outputs": [pin("ctl-then", "then", "exec")],
            "properties": {
                "targetName": "hero",
                "speed": 120.0,
                "jumpForce": 400.0
            }
        }
    ]);
    let connections = json!([
        conn("c1", ("root", "root-then"), ("ctl", "ctl-in")),
    ]);
    (nodes, connections)
}

fn hero<'a>(sim: &'a Simulation) -> &'a nodalengine::components::simobject::SimulatedGameObject {
    sim.objects()
        .iter()
        .find(|o| o.name() == "hero")
        .expect("hero must exist")
}

#[test]
fn rising_body_reverses_and_lands_flush_on_the_platform_top() {
    // Initial velocity (0, -1) and gravity 800: the body rises briefly,
    // falls, and must come to rest exactly on the platform's top edge.
    let (nodes, connections) = character_move_graph();
    let mut nodes = nodes.as_array().cloned().unwrap();
    nodes.push(json!({
        "id": "boot", "type": "onStart",
        "outputs": [pin("boot-then", "then", "exec")]
    }));
    nodes.push(json!({
        "id": "lift", "type": "setVelocity",
        "inputs": [pin("lift-in", "in", "exec")],
        "outputs": [pin("lift-then", "then", "exec")],
        "properties": {"targetName": "hero", "x": 0.0, "y": -1.0}
    }));
    let mut connections = connections.as_array().cloned().unwrap();
    connections.push(conn("c2", ("boot", "boot-then"), ("lift", "lift-in")));

    // Platform top at y = 20, four pixels under the hero's feet.
    let scene = scene(json!({
        "gameObjects": [
            player_object("hero", 0.0, 0.0),
            floor_object("floor", 0.0, 36.0, 8.0)
        ],
        "nodes": nodes,
        "connections": connections
    }));
    let mut sim = Simulation::new(&scene, 0);

    sim.step(DT);
    // The boot wave applied the upward velocity before the first move.
    for _ in 0..120 {
        sim.step(DT);
    }
    let hero = hero(&sim);
    // Flush contact: hero half-height 16 above the platform top at 20.
    assert!((hero.position.y - 4.0).abs() < 1e-3);
    assert_eq!(hero.velocity.y, 0.0);
    assert!(hero.is_grounded);
}

#[test]
fn held_key_walks_the_character() {
    let (nodes, connections) = character_move_graph();
    let scene = scene(json!({
        "gameObjects": [
            player_object("hero", 0.0, 0.0),
            floor_object("floor", 0.0, 36.0, 30.0)
        ],
        "nodes": nodes,
        "connections": connections
    }));
    let mut sim = Simulation::new(&scene, 0);

    // Settle onto the floor first.
    for _ in 0..30 {
        sim.step(DT);
    }
    assert!(hero(&sim).is_grounded);
    let start_x = hero(&sim).position.x;

    sim.keyboard_mut().press("ArrowRight");
    for _ in 0..60 {
        sim.step(DT);
    }
    let walked = hero(&sim).position.x - start_x;
    assert!((walked - 120.0).abs() < 2.0, "walked {}", walked);

    sim.keyboard_mut().release("ArrowRight");
    sim.step(DT);
    let rest_x = hero(&sim).position.x;
    sim.step(DT);
    assert_eq!(hero(&sim).position.x, rest_x);
}

#[test]
fn jump_leaves_the_ground_and_gravity_brings_the_body_back() {
    let (nodes, connections) = character_move_graph();
    let scene = scene(json!({
        "gameObjects": [
            player_object("hero", 0.0, 0.0),
            floor_object("floor", 0.0, 36.0, 30.0)
        ],
        "nodes": nodes,
        "connections": connections
    }));
    let mut sim = Simulation::new(&scene, 0);
    for _ in 0..30 {
        sim.step(DT);
    }
    let ground_y = hero(&sim).position.y;

    sim.keyboard_mut().press(" ");
    sim.step(DT);
    assert!(hero(&sim).velocity.y < 0.0);
    for _ in 0..10 {
        sim.step(DT);
    }
    assert!(hero(&sim).position.y < ground_y);
    assert!(!hero(&sim).is_grounded);

    sim.keyboard_mut().release(" ");
    for _ in 0..120 {
        sim.step(DT);
    }
    assert!(hero(&sim).is_grounded);
    assert!((hero(&sim).position.y - ground_y).abs() < 1e-3);
}

#[test]
fn ai_state_is_stable_while_the_reaction_timer_runs() {
    let scene = scene(json!({
        "gameObjects": [
            // Player far outside every distance band: decisions pick Idle.
            player_object("hero", 10000.0, 0.0),
            enemy_object("brute", 0.0, 0.0, json!({"difficulty": 0})),
            floor_object("floor", 0.0, 36.0, 30.0)
        ],
        "nodes": [],
        "connections": []
    }));
    let mut sim = Simulation::new(&scene, 3);

    let mut previous: Option<(AiPhase, f32)> = None;
    for _ in 0..180 {
        sim.step(DT);
        let brute = sim
            .objects()
            .iter()
            .find(|o| o.name() == "brute")
            .expect("enemy must exist");
        let ai = brute.ai.as_ref().expect("ai state must exist");
        if let Some((prev_state, prev_timer)) = previous {
            let locked_out = matches!(
                prev_state,
                AiPhase::HitStun | AiPhase::Attacking | AiPhase::Jumping | AiPhase::Falling
            );
            if prev_timer > DT + 1e-4 && !locked_out {
                assert_eq!(ai.state, prev_state);
            }
        }
        previous = Some((ai.state, ai.reaction_timer));
    }
}

#[test]
fn ai_walks_toward_a_player_in_range() {
    let scene = scene(json!({
        "gameObjects": [
            player_object("hero", 100.0, 16.0),
            enemy_object("brute", 0.0, 0.0, json!({"difficulty": 5, "speed": 80.0})),
            floor_object("floor", 100.0, 48.0, 30.0)
        ],
        "nodes": [],
        "connections": []
    }));
    let mut sim = Simulation::new(&scene, 11);
    for _ in 0..120 {
        sim.step(DT);
    }
    let brute = sim
        .objects()
        .iter()
        .find(|o| o.name() == "brute")
        .unwrap();
    assert!(
        brute.position.x > 5.0,
        "enemy should close in, at x {}",
        brute.position.x
    );
    assert_eq!(
        brute.ai.as_ref().unwrap().target_player_id.as_deref(),
        Some("hero")
    );
}

#[test]
fn health_drop_forces_hit_stun() {
    let scene = scene(json!({
        "gameObjects": [
            player_object("hero", 10000.0, 0.0),
            enemy_object("brute", 0.0, 0.0, json!({"difficulty": 5, "health": 100})),
            floor_object("floor", 0.0, 36.0, 30.0)
        ],
        "nodes": [],
        "connections": []
    }));
    let mut sim = Simulation::new(&scene, 0);
    for _ in 0..10 {
        sim.step(DT);
    }

    let brute_id = sim
        .objects()
        .iter()
        .find(|o| o.name() == "brute")
        .unwrap()
        .id()
        .to_string();
    sim.state_mut().store.update(&brute_id, |o| {
        if let Some(script) = o.script_mut("enemyAI") {
            script.set("health", json!(40));
        }
    });

    sim.step(DT);
    let stunned = sim.state().store.get(&brute_id).unwrap();
    assert_eq!(stunned.ai.as_ref().unwrap().state, AiPhase::HitStun);

    // Stun wears off after its fixed duration.
    for _ in 0..40 {
        sim.step(DT);
    }
    let recovered = sim.state().store.get(&brute_id).unwrap();
    assert_ne!(recovered.ai.as_ref().unwrap().state, AiPhase::HitStun);
}

#[test]
fn pause_freezes_motion_but_keeps_key_waves_alive() {
    let scene = scene(json!({
        "gameObjects": [
            {
                "id": "shot", "name": "shot", "category": "bullet",
                "behaviors": [{"type": "transform", "position": {"x": 0.0, "y": 0.0}}]
            }
        ],
        "nodes": [
            {
                "id": "boot", "type": "onStart",
                "outputs": [pin("boot-then", "then", "exec")]
            },
            {
                "id": "launch", "type": "setVelocity",
                "inputs": [pin("launch-in", "in", "exec")],
                "outputs": [pin("launch-then", "then", "exec")],
                "properties": {"targetName": "shot", "x": 60.0, "y": 0.0}
            },
            {
                "id": "keyroot", "type": "onKeyPress",
                "outputs": [pin("keyroot-then", "then", "exec")],
                "properties": {"key": "p"}
            },
            {
                "id": "toggle", "type": "togglePause",
                "inputs": [pin("toggle-in", "in", "exec")],
                "outputs": [pin("toggle-then", "then", "exec")]
            }
        ],
        "connections": [
            conn("c1", ("boot", "boot-then"), ("launch", "launch-in")),
            conn("c2", ("keyroot", "keyroot-then"), ("toggle", "toggle-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    sim.step(DT);
    assert!(sim.objects()[0].position.x > 0.0);

    sim.keyboard_mut().press("p");
    sim.step(DT);
    assert!(sim.is_paused());
    let frozen_x = sim.objects()[0].position.x;
    for _ in 0..10 {
        sim.step(DT);
    }
    assert_eq!(sim.objects()[0].position.x, frozen_x);

    sim.keyboard_mut().release("p");
    sim.step(DT);
    sim.keyboard_mut().press("p");
    sim.step(DT);
    assert!(!sim.is_paused());
    sim.step(DT);
    assert!(sim.objects()[0].position.x > frozen_x);
}

//! Interpreter integration tests: wave semantics, memoization, flow nodes,
//! timers and countdowns, driven through the public `Simulation` façade
//! with scenes built as editor-style JSON.

use serde_json::{json, Value};

use nodalengine::components::scene::Scene;
use nodalengine::engine::Simulation;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

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

fn empty_object(id: &str, name: &str, x: f32, y: f32) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "empty",
        "behaviors": [
            {"type": "transform", "position": {"x": x, "y": y}}
        ]
    })
}

fn text_object(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "text",
        "behaviors": [
            {"type": "transform", "position": {"x": 0.0, "y": 0.0}},
            {"type": "textRenderer", "text": "", "fontSize": 12.0, "color": "#ffffff"}
        ]
    })
}

fn object_x(sim: &Simulation, name: &str) -> f32 {
    sim.objects()
        .iter()
        .find(|o| o.name() == name)
        .expect("object must exist")
        .position
        .x
}

fn text_of(sim: &Simulation, name: &str) -> String {
    sim.objects()
        .iter()
        .find(|o| o.name() == name)
        .and_then(|o| {
            o.object.behaviors.iter().find_map(|b| match b {
                nodalengine::components::behavior::Behavior::TextRenderer(t) => {
                    Some(t.text.clone())
                }
                _ => None,
            })
        })
        .expect("text object must exist")
}

#[test]
fn memoization_executes_upstream_once_per_wave() {
    // The same randomRange output feeds both sides of a subtraction; with
    // per-wave memoization both reads observe one draw, so the result is 0.
    let scene = scene(json!({
        "gameObjects": [text_object("txt", "display")],
        "nodes": [
            {
                "id": "root", "type": "onUpdate",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "rand", "type": "randomRange",
                "outputs": [pin("rand-value", "value", "number")],
                "properties": {"min": 0.0, "max": 100.0}
            },
            {
                "id": "sub", "type": "mathOp",
                "inputs": [pin("sub-a", "a", "number"), pin("sub-b", "b", "number")],
                "outputs": [pin("sub-result", "result", "number")],
                "properties": {"op": "subtract"}
            },
            {
                "id": "show", "type": "setText",
                "inputs": [pin("show-in", "in", "exec"), pin("show-text", "text", "any")],
                "outputs": [pin("show-then", "then", "exec")],
                "properties": {"targetName": "display"}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("show", "show-in")),
            conn("c2", ("rand", "rand-value"), ("sub", "sub-a")),
            conn("c3", ("rand", "rand-value"), ("sub", "sub-b")),
            conn("c4", ("sub", "sub-result"), ("show", "show-text")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 9);
    for _ in 0..3 {
        sim.step(1.0 / 60.0);
        assert_eq!(text_of(&sim, "display"), "0");
    }
}

#[test]
fn trigger_once_fires_on_first_activation_only() {
    let scene_json = json!({
        "gameObjects": [empty_object("crate", "crate", 0.0, 0.0)],
        "nodes": [
            {
                "id": "root", "type": "onUpdate",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "once", "type": "triggerOnce",
                "inputs": [pin("once-in", "in", "exec")],
                "outputs": [pin("once-then", "then", "exec")]
            },
            {
                "id": "move", "type": "translate",
                "inputs": [pin("move-in", "in", "exec")],
                "outputs": [pin("move-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 10.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("once", "once-in")),
            conn("c2", ("once", "once-then"), ("move", "move-in")),
        ]
    });
    let mut sim = Simulation::new(&scene(scene_json.clone()), 0);
    for _ in 0..5 {
        sim.step(1.0 / 60.0);
    }
    assert!(approx_eq(object_x(&sim, "crate"), 10.0));

    // Scene reload resets the triggered-once set: exactly one more fire.
    sim.load_scene(&scene(scene_json));
    for _ in 0..3 {
        sim.step(1.0 / 60.0);
    }
    assert!(approx_eq(object_x(&sim, "crate"), 10.0));
}

#[test]
fn branch_routes_by_condition() {
    let scene = scene(json!({
        "gameObjects": [empty_object("crate", "crate", 0.0, 0.0)],
        "nodes": [
            {
                "id": "root", "type": "onStart",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "flag", "type": "boolean",
                "outputs": [pin("flag-value", "value", "boolean")],
                "properties": {"value": true}
            },
            {
                "id": "if", "type": "branch",
                "inputs": [pin("if-in", "in", "exec"), pin("if-cond", "condition", "boolean")],
                "outputs": [pin("if-true", "true", "exec"), pin("if-false", "false", "exec")]
            },
            {
                "id": "yes", "type": "setPosition",
                "inputs": [pin("yes-in", "in", "exec")],
                "outputs": [pin("yes-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 5.0, "y": 0.0}
            },
            {
                "id": "no", "type": "setPosition",
                "inputs": [pin("no-in", "in", "exec")],
                "outputs": [pin("no-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": -5.0, "y": 0.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("if", "if-in")),
            conn("c2", ("flag", "flag-value"), ("if", "if-cond")),
            conn("c3", ("if", "if-true"), ("yes", "yes-in")),
            conn("c4", ("if", "if-false"), ("no", "no-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    sim.step(1.0 / 60.0);
    assert!(approx_eq(object_x(&sim, "crate"), 5.0));
}

#[test]
fn unknown_node_kind_is_inert() {
    // Execution entering an unknown node stops there; nothing downstream
    // fires, and its data outputs read as absent.
    let scene = scene(json!({
        "gameObjects": [empty_object("crate", "crate", 0.0, 0.0)],
        "nodes": [
            {
                "id": "root", "type": "onUpdate",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "mystery", "type": "quantumEntangle",
                "inputs": [pin("my-in", "in", "exec")],
                "outputs": [pin("my-then", "then", "exec"), pin("my-out", "value", "number")]
            },
            {
                "id": "move", "type": "translate",
                "inputs": [pin("move-in", "in", "exec")],
                "outputs": [pin("move-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 10.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("mystery", "my-in")),
            conn("c2", ("mystery", "my-then"), ("move", "move-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    sim.step(1.0 / 60.0);
    assert!(approx_eq(object_x(&sim, "crate"), 0.0));
}

#[test]
fn cyclic_exec_graph_is_cut_by_the_depth_guard() {
    // a -> b -> a; without the guard this recurses forever.
    let scene = scene(json!({
        "gameObjects": [empty_object("crate", "crate", 0.0, 0.0)],
        "nodes": [
            {
                "id": "root", "type": "onStart",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "a", "type": "translate",
                "inputs": [pin("a-in", "in", "exec")],
                "outputs": [pin("a-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 1.0}
            },
            {
                "id": "b", "type": "translate",
                "inputs": [pin("b-in", "in", "exec")],
                "outputs": [pin("b-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 1.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("a", "a-in")),
            conn("c2", ("a", "a-then"), ("b", "b-in")),
            conn("c3", ("b", "b-then"), ("a", "a-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    // Completing at all proves the guard: the wave is depth-bounded.
    sim.step(1.0 / 60.0);
    let travelled = object_x(&sim, "crate");
    assert!(travelled >= 1.0);
    assert!(travelled.is_finite());
}

#[test]
fn key_root_fires_for_its_key_only_and_on_the_edge() {
    let scene = scene(json!({
        "gameObjects": [empty_object("crate", "crate", 0.0, 0.0)],
        "nodes": [
            {
                "id": "root", "type": "onKeyPress",
                "outputs": [pin("root-then", "then", "exec"), pin("root-key", "key", "string")],
                "properties": {"key": "a"}
            },
            {
                "id": "move", "type": "translate",
                "inputs": [pin("move-in", "in", "exec")],
                "outputs": [pin("move-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 10.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("move", "move-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);

    sim.keyboard_mut().press("b");
    sim.step(1.0 / 60.0);
    assert!(approx_eq(object_x(&sim, "crate"), 0.0));

    sim.keyboard_mut().press("a");
    sim.step(1.0 / 60.0);
    assert!(approx_eq(object_x(&sim, "crate"), 10.0));

    // Held, not re-pressed: no second wave.
    sim.step(1.0 / 60.0);
    assert!(approx_eq(object_x(&sim, "crate"), 10.0));
}

#[test]
fn collision_root_outputs_the_pair_honoring_filters() {
    // alpha and beta overlap. The root filters objectA == "beta", so the
    // payload arrives swapped and destroying objectA removes beta.
    let scene = scene(json!({
        "gameObjects": [
            {
                "id": "alpha", "name": "alpha", "category": "player",
                "useCustomHitboxes": true,
                "behaviors": [{"type": "transform", "position": {"x": 0.0, "y": 0.0}}]
            },
            {
                "id": "beta", "name": "beta", "category": "enemy",
                "useCustomHitboxes": true,
                "behaviors": [{"type": "transform", "position": {"x": 10.0, "y": 0.0}}]
            }
        ],
        "nodes": [
            {
                "id": "root", "type": "onCollision",
                "outputs": [
                    pin("root-then", "then", "exec"),
                    pin("root-a", "objectA", "gameObject"),
                    pin("root-b", "objectB", "gameObject")
                ],
                "properties": {"objectA": "beta"}
            },
            {
                "id": "kill", "type": "destroyObject",
                "inputs": [pin("kill-in", "in", "exec"), pin("kill-target", "target", "gameObject")],
                "outputs": [pin("kill-then", "then", "exec")]
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("kill", "kill-in")),
            conn("c2", ("root", "root-a"), ("kill", "kill-target")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    sim.step(1.0 / 60.0);
    let names: Vec<&str> = sim.objects().iter().map(|o| o.name()).collect();
    assert_eq!(names, vec!["alpha"]);
}

#[test]
fn one_shot_timer_fires_exactly_once() {
    let scene = scene(json!({
        "gameObjects": [empty_object("crate", "crate", 0.0, 0.0)],
        "nodes": [
            {
                "id": "root", "type": "onStart",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "timer", "type": "timer",
                "inputs": [pin("t-start", "start", "exec"), pin("t-stop", "stop", "exec")],
                "outputs": [pin("t-finished", "finished", "exec")],
                "properties": {"duration": 0.05, "loop": false}
            },
            {
                "id": "move", "type": "translate",
                "inputs": [pin("move-in", "in", "exec")],
                "outputs": [pin("move-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 1.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("timer", "t-start")),
            conn("c2", ("timer", "t-finished"), ("move", "move-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    for _ in 0..6 {
        sim.step(0.02);
    }
    assert!(approx_eq(object_x(&sim, "crate"), 1.0));
}

#[test]
fn looping_timer_rearms_with_a_fresh_start() {
    let scene = scene(json!({
        "gameObjects": [empty_object("crate", "crate", 0.0, 0.0)],
        "nodes": [
            {
                "id": "root", "type": "onStart",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "timer", "type": "timer",
                "inputs": [pin("t-start", "start", "exec"), pin("t-stop", "stop", "exec")],
                "outputs": [pin("t-finished", "finished", "exec")],
                "properties": {"duration": 0.05, "loop": true}
            },
            {
                "id": "move", "type": "translate",
                "inputs": [pin("move-in", "in", "exec")],
                "outputs": [pin("move-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 1.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("timer", "t-start")),
            conn("c2", ("timer", "t-finished"), ("move", "move-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    for _ in 0..3 {
        sim.step(0.05);
    }
    assert!(approx_eq(object_x(&sim, "crate"), 3.0));
}

#[test]
fn countdown_updates_display_and_completes_once() {
    let scene = scene(json!({
        "gameObjects": [
            text_object("clock", "clock"),
            empty_object("marker", "marker", 0.0, 0.0)
        ],
        "nodes": [
            {
                "id": "root", "type": "onStart",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "cd", "type": "countdown",
                "inputs": [pin("cd-start", "start", "exec"), pin("cd-stop", "stop", "exec")],
                "outputs": [pin("cd-finished", "finished", "exec")],
                "properties": {"duration": 5.0, "targetName": "clock"}
            },
            {
                "id": "move", "type": "translate",
                "inputs": [pin("move-in", "in", "exec")],
                "outputs": [pin("move-then", "then", "exec")],
                "properties": {"targetName": "marker", "x": 10.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("cd", "cd-start")),
            conn("c2", ("cd", "cd-finished"), ("move", "move-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);

    sim.step(0.5);
    assert_eq!(text_of(&sim, "clock"), "00:05");

    for _ in 0..9 {
        sim.step(0.5);
    }
    assert_eq!(text_of(&sim, "clock"), "00:00");
    assert!(approx_eq(object_x(&sim, "marker"), 10.0));

    // Two more seconds of ticks: completion must not re-fire.
    for _ in 0..4 {
        sim.step(0.5);
    }
    assert_eq!(text_of(&sim, "clock"), "00:00");
    assert!(approx_eq(object_x(&sim, "marker"), 10.0));
}

#[test]
fn change_scene_without_id_fires_nothing() {
    let scene = scene(json!({
        "gameObjects": [empty_object("crate", "crate", 0.0, 0.0)],
        "nodes": [
            {
                "id": "root", "type": "onStart",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "goto", "type": "changeScene",
                "inputs": [pin("goto-in", "in", "exec")],
                "outputs": [pin("goto-then", "then", "exec")],
                "properties": {}
            },
            {
                "id": "move", "type": "translate",
                "inputs": [pin("move-in", "in", "exec")],
                "outputs": [pin("move-then", "then", "exec")],
                "properties": {"targetName": "crate", "x": 10.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("goto", "goto-in")),
            conn("c2", ("goto", "goto-then"), ("move", "move-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    sim.step(1.0 / 60.0);
    assert_eq!(sim.take_scene_request(), None);
    assert!(approx_eq(object_x(&sim, "crate"), 0.0));
}

#[test]
fn change_scene_with_id_queues_the_request() {
    let scene = scene(json!({
        "gameObjects": [],
        "nodes": [
            {
                "id": "root", "type": "onStart",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "goto", "type": "changeScene",
                "inputs": [pin("goto-in", "in", "exec")],
                "outputs": [pin("goto-then", "then", "exec")],
                "properties": {"scene": "level2"}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("goto", "goto-in")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    sim.step(1.0 / 60.0);
    assert_eq!(sim.take_scene_request().as_deref(), Some("level2"));
}

#[test]
fn spawned_object_flows_through_its_output_pin() {
    // onStart spawns a bullet and pipes the fresh reference into a
    // setVelocity node; the kinematics pass then carries it.
    let scene = scene(json!({
        "gameObjects": [],
        "nodes": [
            {
                "id": "root", "type": "onStart",
                "outputs": [pin("root-then", "then", "exec")]
            },
            {
                "id": "spawn", "type": "spawnObject",
                "inputs": [pin("spawn-in", "in", "exec")],
                "outputs": [pin("spawn-then", "then", "exec"), pin("spawn-obj", "object", "gameObject")],
                "properties": {"category": "bullet", "x": 0.0, "y": 0.0}
            },
            {
                "id": "launch", "type": "setVelocity",
                "inputs": [
                    pin("launch-in", "in", "exec"),
                    pin("launch-target", "target", "gameObject")
                ],
                "outputs": [pin("launch-then", "then", "exec")],
                "properties": {"x": 300.0, "y": 0.0}
            }
        ],
        "connections": [
            conn("c1", ("root", "root-then"), ("spawn", "spawn-in")),
            conn("c2", ("spawn", "spawn-then"), ("launch", "launch-in")),
            conn("c3", ("spawn", "spawn-obj"), ("launch", "launch-target")),
        ]
    }));
    let mut sim = Simulation::new(&scene, 0);
    sim.step(0.1);
    assert_eq!(sim.objects().len(), 1);
    assert_eq!(sim.objects()[0].velocity.x, 300.0);
    sim.step(0.1);
    assert!(sim.objects()[0].position.x > 0.0);
}

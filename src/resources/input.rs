//! Per-frame keyboard state fed in by the host.
//!
//! Keys are identified by their editor-facing names (the browser's
//! `KeyboardEvent.key` values: `"ArrowLeft"`, `"a"`, `" "`, ...). The host
//! reports transitions before each tick; held state and pressed/released
//! edges are derived here so node handlers and controllers read one
//! consistent snapshot per tick.

use rustc_hash::FxHashSet;

/// Keyboard snapshot for the current tick.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: FxHashSet<String>,
    just_pressed: FxHashSet<String>,
    just_released: FxHashSet<String>,
}

impl KeyboardState {
    /// Report a key-down transition from the host.
    pub fn press(&mut self, key: &str) {
        if self.held.insert(key.to_string()) {
            self.just_pressed.insert(key.to_string());
        }
    }

    /// Report a key-up transition from the host.
    pub fn release(&mut self, key: &str) {
        if self.held.remove(key) {
            self.just_released.insert(key.to_string());
        }
    }

    /// Clear the per-tick edges. Called by the engine at the end of a tick;
    /// held state persists until the host reports a release.
    pub fn end_tick(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Drop everything, including held keys. Used on scene load.
    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn was_pressed(&self, key: &str) -> bool {
        self.just_pressed.contains(key)
    }

    pub fn was_released(&self, key: &str) -> bool {
        self.just_released.contains(key)
    }

    /// Keys pressed this tick, for the `onKeyPress` root scan.
    pub fn pressed_keys(&self) -> impl Iterator<Item = &str> {
        self.just_pressed.iter().map(String::as_str)
    }

    /// Keys released this tick, for the `onKeyRelease` root scan.
    pub fn released_keys(&self) -> impl Iterator<Item = &str> {
        self.just_released.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_edge_once() {
        let mut kb = KeyboardState::default();
        kb.press("ArrowLeft");
        assert!(kb.is_down("ArrowLeft"));
        assert!(kb.was_pressed("ArrowLeft"));
        kb.end_tick();
        // Still held, but no longer an edge.
        kb.press("ArrowLeft");
        assert!(kb.is_down("ArrowLeft"));
        assert!(!kb.was_pressed("ArrowLeft"));
    }

    #[test]
    fn release_clears_held_and_sets_edge() {
        let mut kb = KeyboardState::default();
        kb.press(" ");
        kb.end_tick();
        kb.release(" ");
        assert!(!kb.is_down(" "));
        assert!(kb.was_released(" "));
    }
}

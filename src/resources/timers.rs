//! Timer and countdown bookkeeping, keyed by graph node id.
//!
//! Stores only the arming state; the per-tick firing pass lives in
//! [`crate::systems::timers`]. Time is the simulation clock in milliseconds
//! (accumulated `deltaTime`), never wall time, so both hosts and the tests
//! observe identical firing ticks.

use rustc_hash::FxHashMap;

/// An armed `timer` node.
#[derive(Debug, Clone, Copy)]
pub struct ActiveTimer {
    /// Simulation clock at arming, in milliseconds.
    pub started_at_ms: f64,
    /// Duration in seconds.
    pub duration: f32,
    pub looping: bool,
}

/// Armed timers keyed by their node id.
#[derive(Debug, Clone, Default)]
pub struct TimerStore {
    pub timers: FxHashMap<String, ActiveTimer>,
}

impl TimerStore {
    pub fn start(&mut self, node_id: &str, now_ms: f64, duration: f32, looping: bool) {
        self.timers.insert(
            node_id.to_string(),
            ActiveTimer {
                started_at_ms: now_ms,
                duration,
                looping,
            },
        );
    }

    pub fn stop(&mut self, node_id: &str) -> bool {
        self.timers.remove(node_id).is_some()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

/// An armed `countdown` node.
#[derive(Debug, Clone)]
pub struct Countdown {
    pub started_at_ms: f64,
    /// Duration in seconds.
    pub duration: f32,
    /// Id of the text object receiving the `mm:ss` display.
    pub target_id: Option<String>,
    /// Completion already fired. A finished countdown stays tracked until
    /// explicitly stopped.
    pub finished: bool,
    /// Last string written to the target, to avoid rewrites.
    pub last_display: String,
}

/// Armed countdowns keyed by their node id.
#[derive(Debug, Clone, Default)]
pub struct CountdownStore {
    pub countdowns: FxHashMap<String, Countdown>,
}

impl CountdownStore {
    pub fn start(&mut self, node_id: &str, now_ms: f64, duration: f32, target_id: Option<String>) {
        self.countdowns.insert(
            node_id.to_string(),
            Countdown {
                started_at_ms: now_ms,
                duration,
                target_id,
                finished: false,
                last_display: String::new(),
            },
        );
    }

    pub fn stop(&mut self, node_id: &str) -> bool {
        self.countdowns.remove(node_id).is_some()
    }

    pub fn clear(&mut self) {
        self.countdowns.clear();
    }
}

/// Format remaining seconds as `mm:ss`, rounding up so the display only
/// reads `00:00` once the countdown has actually completed.
pub fn format_mmss(remaining: f32) -> String {
    let total = remaining.max(0.0).ceil() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

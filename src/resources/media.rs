//! Audio and video playback handles.
//!
//! The core does not decode or mix anything; it only tracks which assets the
//! graph asked to play so the host's renderer/audio layer can act on the
//! snapshot. State is reset on scene load.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Names of audio assets currently requested to play.
#[derive(Debug, Clone, Default)]
pub struct AudioChannels {
    playing: FxHashSet<String>,
}

impl AudioChannels {
    pub fn play(&mut self, name: &str) {
        self.playing.insert(name.to_string());
    }

    pub fn stop(&mut self, name: &str) {
        self.playing.remove(name);
    }

    pub fn stop_all(&mut self) {
        self.playing.clear();
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.playing.contains(name)
    }
}

/// Active video playback, if any. Carried verbatim into the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoState {
    pub current: Option<String>,
    pub playing: bool,
}

impl VideoState {
    pub fn play(&mut self, name: &str) {
        self.current = Some(name.to_string());
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.current = None;
    }
}

//! Serde adapter mapping [`glam::Vec2`] to the editor's `{"x": .., "y": ..}`
//! object form. Use with `#[serde(with = "crate::components::vec2xy")]`.

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
struct XY {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}

pub fn serialize<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
    XY { x: v.x, y: v.y }.serialize(s)
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
    let xy = XY::deserialize(d)?;
    Ok(Vec2::new(xy.x, xy.y))
}

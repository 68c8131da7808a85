//! Values flowing through data pins.
//!
//! Pins are loosely typed the way the editor is: numbers and booleans
//! convert into each other, and anything can be displayed as a string.
//! Conversions that make no sense (a string as a vector) simply yield
//! `None` and the reading handler falls back to its default.

use glam::Vec2;

/// A value produced by a node output.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f32),
    Bool(bool),
    Str(String),
    /// A game-object reference, by entity id.
    Object(String),
    Vec2(Vec2),
    Vec3([f32; 3]),
}

impl Value {
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    /// Display form, used by `log`, `setText`, and string pins.
    pub fn to_display(&self) -> String {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Value::Bool(b) => b.to_string(),
            Value::Str(s) => s.clone(),
            Value::Object(id) => id.clone(),
            Value::Vec2(v) => format!("({}, {})", v.x, v.y),
            Value::Vec3(v) => format!("({}, {}, {})", v[0], v[1], v[2]),
        }
    }

    pub fn as_object_id(&self) -> Option<&str> {
        match self {
            Value::Object(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Value::Vec2(v) => Some(*v),
            Value::Vec3(v) => Some(Vec2::new(v[0], v[1])),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercions() {
        assert_eq!(Value::Number(2.5).as_f32(), Some(2.5));
        assert_eq!(Value::Bool(true).as_f32(), Some(1.0));
        assert_eq!(Value::Str("3.5".into()).as_f32(), Some(3.5));
        assert_eq!(Value::Str("nope".into()).as_f32(), None);
        assert_eq!(Value::Object("id".into()).as_f32(), None);
    }

    #[test]
    fn boolean_coercions() {
        assert_eq!(Value::Number(0.0).as_bool(), Some(false));
        assert_eq!(Value::Number(-1.0).as_bool(), Some(true));
        assert_eq!(Value::Str("true".into()).as_bool(), None);
    }

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(Value::Number(42.0).to_display(), "42");
        assert_eq!(Value::Number(1.25).to_display(), "1.25");
    }
}

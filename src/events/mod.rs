//! Event records passed between systems and the interpreter.
//!
//! Submodules overview:
//! - [`collision`] – entity pairs reported by the overlap pass

pub mod collision;

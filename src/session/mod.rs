//! Session wiring: options and the editor facade that owns all mutable state.

pub(crate) mod editor;
pub(crate) mod opts;

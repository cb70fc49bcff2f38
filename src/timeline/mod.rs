//! Clips, tracks and the placement rules that keep them consistent.

pub(crate) mod model;
pub(crate) mod source;
pub(crate) mod validate;

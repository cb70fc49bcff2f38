//! Conversions between timeline seconds and surface pixels.

pub(crate) mod bands;
pub(crate) mod mapper;

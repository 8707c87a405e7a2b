//! Domain layer: deploy configuration, repository location and the
//! reference types produced by resolution.

pub mod entities;
pub mod value_objects;

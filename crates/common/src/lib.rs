//! Shared types for the bonsai workspace.

mod types;

pub use types::{Pose, heading_vector, normalize_degrees};

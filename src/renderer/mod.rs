//! Render boundary
//!
//! The page's WebGL renderer draws the scene; this module only hands it
//! transforms, either as structs or as a packed instance buffer.

pub mod instance;
pub mod snapshot;

pub use instance::InstanceRaw;
pub use snapshot::{ObjectKind, ObjectTransform, RenderSnapshot};

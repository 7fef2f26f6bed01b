//! The `project.pbxproj` text codec.
//!
//! - `plist`: the OpenStep property-list syntax
//! - `decode`: text to object graph
//! - `encode`: object graph to text, with deterministic key assignment

pub mod decode;
pub mod encode;
pub(crate) mod ids;
pub mod plist;

pub use decode::decode;
pub use encode::encode;

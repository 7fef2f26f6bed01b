//! High-level operations.
//!
//! This module contains the implementation of `xc` commands.

pub mod attach;
pub mod detach;
pub mod finder;
pub mod init;
pub mod link;
pub mod project_io;
pub mod session;
pub mod workspace;

pub use attach::{attach, attach_packages, AttachReport, AttachedPackage, LocalLink};
pub use detach::{detach, detach_packages, DetachReport, DetachedPackage};
pub use finder::{find_xcode_project, locate, resolve_project_path};
pub use init::{init, InitOptions};
pub use link::{delink, link, LinkResult};
pub use project_io::{load_project, save_project};
pub use session::Session;
pub use workspace::{project_bundles, workspace_projects};

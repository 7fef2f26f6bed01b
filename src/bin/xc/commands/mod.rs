//! Command implementations

pub mod attach;
pub mod delink;
pub mod detach;
pub mod init;
pub mod link;
pub mod show;

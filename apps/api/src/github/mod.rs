//! GitHub skill scanning and roadmap auto-completion.

pub mod client;
pub mod handlers;
pub mod skills;

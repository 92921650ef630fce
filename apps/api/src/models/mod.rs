pub mod challenge;
pub mod lesson;
pub mod progress;
pub mod roadmap;
pub mod user;

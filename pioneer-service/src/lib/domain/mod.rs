pub mod directory;
pub mod user;

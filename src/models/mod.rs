pub mod joke;
pub mod user;

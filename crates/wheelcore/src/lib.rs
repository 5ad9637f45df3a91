pub mod animation;
pub mod command;
pub mod geometry;
pub mod macros;
pub mod prizes;
pub mod resolver;
pub mod session;
pub mod store;
pub mod trivia;

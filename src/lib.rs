// Line composer library - exposes the core modules for testing

pub mod config;
pub mod input;
pub mod line;
pub mod store;
pub mod surface;

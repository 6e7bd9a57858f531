pub mod config;
pub mod dynamics;
pub mod geometry;
pub mod state;
pub mod view;

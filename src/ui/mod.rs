//! In-scene UI models
//!
//! Semantic widget state only; layout and drawing belong to the renderer.

pub mod menu;

pub use menu::{Menu, MenuAction, MenuItem, MenuPage};

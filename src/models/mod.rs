//! Data models for the lost and found board.

mod item;

pub use item::*;

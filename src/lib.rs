pub mod barrier;
mod collision;
pub mod compute;
pub mod config;
pub mod draw;
pub mod entities;
pub mod rect;
pub mod schedule;

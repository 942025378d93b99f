//! Side-scrolling terminal shooter.
//!
//! The simulation (`compute`, `collision`, `terrain`) is pure and works in
//! logical field units; `display` maps it onto the terminal and `driver`
//! ties input, simulation and drawing together one frame at a time.

pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod input;
pub mod terrain;

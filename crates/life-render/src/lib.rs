//! Rendering and export collaborators for the simulation engine.
//!
//! Consumes the history and potential sequences a run produces; nothing in
//! this crate feeds back into the engine, so an export failure never affects
//! the computed simulation results.

pub mod raster;
pub mod animation;
pub mod chart;
pub mod export;

pub use animation::save_gif;
pub use chart::save_potential_chart;
pub use export::save_run;
pub use raster::rasterize;

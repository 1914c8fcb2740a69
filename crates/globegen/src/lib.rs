pub mod biome;
pub mod biome_map;
pub mod config;
pub mod error;
pub mod globe;
pub mod instances;
pub mod mesh_data;
pub mod models;
pub mod particles;
pub mod power_grid;
pub mod sampler;
pub mod tools;

pub use config::{get_config, reload_config};
pub use error::GlobeGenError;

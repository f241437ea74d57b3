pub mod config;
pub mod filter;
pub mod maps;
pub mod render;
pub mod sampler;
pub mod sampling;
pub mod types;
pub mod util;

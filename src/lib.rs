pub mod config;
pub mod error;
pub mod lineage;
pub mod parse;
pub mod store;
pub mod validate;
pub mod wasm;
pub mod workflow;

pub mod config_io;
pub mod persistence;
pub mod store;

//! Database schema and queries for the collection repository

pub mod beatmaps;
pub mod collections;
pub mod init;

pub use init::init_database;

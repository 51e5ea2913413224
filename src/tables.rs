pub mod database;

pub use database::DatabaseStore;

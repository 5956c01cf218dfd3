pub mod bounds;
pub mod catalog;
pub mod connection;
pub mod schema;
pub mod sqlgen;

pub use connection::PgConnection;

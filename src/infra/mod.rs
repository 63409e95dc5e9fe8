//! Infrastructure: SQLite connection, migrations, spreadsheet codec.

pub mod db;
pub mod xlsx;

pub(crate) use db::get_connection;
pub use db::{init_db, DbPool};

use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const CREATE_EXPENSES_SQL: &str = include_str!("migrations/0001_create_expenses.sql");

pub const EXPECTED_USER_VERSION: i64 = 1;

pub const REQUIRED_INDEX_NAMES: [&str; 1] = ["idx_expenses_date_id"];

pub const REQUIRED_META_KEYS: [(&str, &str); 1] = [("schema_version", "v1")];

pub fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(CREATE_EXPENSES_SQL)])
}

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    migrations().to_latest(conn)
}

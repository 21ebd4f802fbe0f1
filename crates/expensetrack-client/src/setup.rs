use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use crate::migrations::{EXPECTED_USER_VERSION, REQUIRED_INDEX_NAMES, REQUIRED_META_KEYS, run_pending};
use crate::state::{
    ensure_store_directory, map_sqlite_error, open_connection, open_in_memory_connection,
    resolve_store_home, store_db_path,
};
use crate::{ClientError, ClientResult};

const EXPENSES_COLUMNS: [&str; 6] = ["id", "title", "income", "expense", "date", "category"];
const INTERNAL_META_COLUMNS: [&str; 2] = ["key", "value"];

const REQUIRED_CORE_TABLES: [(&str, &[&str]); 2] = [
    ("expenses", &EXPENSES_COLUMNS),
    ("internal_meta", &INTERNAL_META_COLUMNS),
];

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub db_path: PathBuf,
    pub schema_version: String,
}

/// A migrated, verified connection together with where it lives.
pub struct PreparedStore {
    pub connection: Connection,
    pub context: SetupContext,
}

pub fn ensure_initialized(home_override: Option<&Path>) -> ClientResult<PreparedStore> {
    let store_home = resolve_store_home(home_override)?;
    ensure_store_directory(&store_home)?;

    let db_path = store_db_path(&store_home);
    let connection = open_connection(&db_path)?;
    prepare(connection, db_path)
}

pub fn ensure_initialized_in_memory() -> ClientResult<PreparedStore> {
    let connection = open_in_memory_connection()?;
    prepare(connection, PathBuf::from(":memory:"))
}

fn prepare(mut connection: Connection, db_path: PathBuf) -> ClientResult<PreparedStore> {
    run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;

    verify_core_tables(&connection, &db_path)?;
    verify_post_migration_objects(&connection, &db_path)?;
    let schema_version = read_schema_version(&connection, &db_path)?;

    tracing::info!(
        db_path = %db_path.display(),
        schema_version = %schema_version,
        "transaction store ready"
    );

    Ok(PreparedStore {
        connection,
        context: SetupContext {
            db_path,
            schema_version,
        },
    })
}

fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    match error {
        rusqlite_migration::Error::RusqliteError { query: _, err } => {
            let mapped = map_sqlite_error(db_path, err);
            if matches!(
                mapped.code.as_str(),
                "store_locked" | "store_corrupt" | "store_init_permission_denied" | "store_full"
            ) {
                mapped
            } else {
                ClientError::migration_failed(db_path, &error.to_string())
            }
        }
        _ => ClientError::migration_failed(db_path, &error.to_string()),
    }
}

fn verify_core_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (table_name, required_columns) in REQUIRED_CORE_TABLES {
        if !sqlite_object_exists(connection, "table", table_name, db_path)? {
            return Err(ClientError::store_corrupt(db_path));
        }

        let columns = table_columns(connection, table_name, db_path)?;
        for required_column in required_columns {
            if !columns.iter().any(|column| column == required_column) {
                return Err(ClientError::store_corrupt(db_path));
            }
        }
    }

    Ok(())
}

fn verify_post_migration_objects(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let user_version = connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    if user_version != EXPECTED_USER_VERSION {
        return Err(ClientError::store_corrupt(db_path));
    }

    for (meta_key, expected_value) in REQUIRED_META_KEYS {
        let value = connection
            .query_row(
                "SELECT value FROM internal_meta WHERE key = ?1 LIMIT 1",
                [meta_key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        if value.as_deref() != Some(expected_value) {
            return Err(ClientError::store_corrupt(db_path));
        }
    }

    for index_name in REQUIRED_INDEX_NAMES {
        if !sqlite_object_exists(connection, "index", index_name, db_path)? {
            return Err(ClientError::store_corrupt(db_path));
        }
    }

    Ok(())
}

fn sqlite_object_exists(
    connection: &Connection,
    object_type: &str,
    object_name: &str,
    db_path: &Path,
) -> ClientResult<bool> {
    let exists = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2 LIMIT 1",
            params![object_type, object_name],
            |_row| Ok(true),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .unwrap_or(false);

    Ok(exists)
}

fn table_columns(
    connection: &Connection,
    table_name: &str,
    db_path: &Path,
) -> ClientResult<Vec<String>> {
    if !REQUIRED_CORE_TABLES
        .iter()
        .any(|(required_name, _)| required_name == &table_name)
    {
        return Err(ClientError::store_init_failed(
            db_path,
            "Refused PRAGMA table inspection for non-core table.",
        ));
    }

    // `table_name` comes from REQUIRED_CORE_TABLES, never from user input.
    let sql = format!("PRAGMA table_info({table_name})");
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let column_iter = statement
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut columns: Vec<String> = Vec::new();
    for row in column_iter {
        columns.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }

    Ok(columns)
}

fn read_schema_version(connection: &Connection, db_path: &Path) -> ClientResult<String> {
    let value = connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = 'schema_version' LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(value.unwrap_or_else(|| "v1".to_string()))
}

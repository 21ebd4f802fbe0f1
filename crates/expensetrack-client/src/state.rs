use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Error as SqliteError, ffi::ErrorCode};

use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "EXPENSETRACK_HOME";

pub fn resolve_store_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV_VAR) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".expensetrack")
            } else {
                return Err(ClientError::store_init_failed(
                    Path::new("."),
                    "Could not resolve a home directory for the transaction store.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn ensure_store_directory(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))?;
    set_private_permissions_best_effort(path);
    Ok(())
}

pub fn store_db_path(home: &Path) -> PathBuf {
    home.join("expenses.db")
}

pub fn open_connection(db_path: &Path) -> ClientResult<Connection> {
    let connection =
        Connection::open(db_path).map_err(|error| map_sqlite_error(db_path, &error))?;
    configure_connection(&connection, db_path)?;
    Ok(connection)
}

pub fn open_in_memory_connection() -> ClientResult<Connection> {
    let db_path = Path::new(":memory:");
    let connection =
        Connection::open_in_memory().map_err(|error| map_sqlite_error(db_path, &error))?;
    configure_connection(&connection, db_path)?;
    Ok(connection)
}

fn configure_connection(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    connection
        .busy_timeout(Duration::from_millis(250))
        .map_err(|error| map_sqlite_error(db_path, &error))
}

pub fn map_io_error(path: &Path, error: &std::io::Error) -> ClientError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        return ClientError::store_init_permission_denied(path, &error.to_string());
    }

    ClientError::store_init_failed(path, &error.to_string())
}

pub fn map_sqlite_error(path: &Path, error: &SqliteError) -> ClientError {
    let mapped = match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::store_locked(path)
        }
        Some(ErrorCode::DiskFull) => ClientError::store_full(path),
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => {
            ClientError::store_corrupt(path)
        }
        Some(ErrorCode::ReadOnly) => ClientError::store_read_only(path),
        Some(ErrorCode::CannotOpen | ErrorCode::PermissionDenied) => {
            ClientError::store_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::store_write_failed(path, &error.to_string()),
    };
    tracing::warn!(code = %mapped.code, "sqlite error: {error}");
    mapped
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::store_init_failed(path, &error.to_string()))
}

#[cfg(unix)]
fn set_private_permissions_best_effort(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn set_private_permissions_best_effort(_path: &Path) {}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{map_sqlite_error, resolve_store_home, store_db_path};

    #[test]
    fn explicit_override_wins_and_is_absolutized() {
        let resolved = resolve_store_home(Some(Path::new("relative-home")));
        assert!(resolved.is_ok());
        if let Ok(path) = resolved {
            assert!(path.is_absolute());
            assert!(path.ends_with("relative-home"));
        }
    }

    #[test]
    fn db_file_lives_under_home() {
        let path = store_db_path(Path::new("/tmp/et-home"));
        assert_eq!(path, Path::new("/tmp/et-home/expenses.db"));
    }

    #[test]
    fn disk_full_maps_to_store_full() {
        let error = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
            None,
        );
        let mapped = map_sqlite_error(Path::new("/tmp/expenses.db"), &error);
        assert_eq!(mapped.code, "store_full");
    }

    #[test]
    fn busy_maps_to_store_locked() {
        let error = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        let mapped = map_sqlite_error(Path::new("/tmp/expenses.db"), &error);
        assert_eq!(mapped.code, "store_locked");
    }
}

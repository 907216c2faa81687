//! Store location and connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Create the store file and apply the schema (`ensure_schema`).
//! - Open one configured connection per repository call (`Store::connect`).
//!
//! # Invariants
//! - Returned connections have `foreign_keys=OFF` and a busy timeout.
//! - Returned connections expose the `fold_case` SQL function.
//! - `Store::connect` never creates a missing file; only `ensure_schema` does.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{debug, error, info};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the SQL function that lowercases text with Unicode rules.
///
/// SQLite's built-in `lower()` and `LIKE` fold ASCII letters only.
pub const FOLD_CASE_FN: &str = "fold_case";

/// Location of a schema-ready academic store.
///
/// Obtained from [`ensure_schema`] and passed to every repository at
/// construction. Holds no open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Returns the store file path.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Opens a fresh connection scoped to one repository call.
    ///
    /// The connection closes when dropped, on success and error paths alike.
    pub fn connect(&self) -> DbResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.path, flags).inspect_err(|err| {
            error!(
                "event=db_connect module=db status=error error_code=db_open_failed error={}",
                err
            );
        })?;
        configure_connection(&conn)?;
        Ok(conn)
    }
}

/// Creates the store if needed and applies the academic schema.
///
/// Idempotent: safe to call on every startup against the same file.
///
/// # Side effects
/// - Creates the store file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn ensure_schema(path: impl AsRef<Path>) -> DbResult<Store> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let created = !path.exists();
    info!("event=db_open module=db status=start created={created}");

    let mut conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    let bootstrap = configure_connection(&conn).and_then(|()| apply_migrations(&mut conn));
    match bootstrap {
        Ok(applied) => {
            info!(
                "event=db_open module=db status=ok duration_ms={} schema_steps_applied={}",
                started_at.elapsed().as_millis(),
                applied
            );
            Ok(Store {
                path: path.to_path_buf(),
            })
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.create_scalar_function(
        FOLD_CASE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).to_lowercase()),
                _ => None,
            })
        },
    )?;
    debug!("event=db_configure module=db status=ok");
    Ok(())
}

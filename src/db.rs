//! SQLite pool for the record store.
//!
//! Every connection handed out by the pool has the journal pragmas applied
//! and the `fold_case` SQL function registered, which the search queries in
//! [`crate::repository`] depend on.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

diesel::define_sql_function! {
    /// Unicode lower-casing, so `Â` and `â` compare equal. SQLite's own
    /// `lower()` only folds ASCII.
    fn fold_case(x: Text) -> Text;
}

/// Folds text the same way `fold_case` does inside SQL.
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Per-connection setup run by r2d2 whenever a connection is opened.
#[derive(Debug)]
pub struct RecordStoreSetup {
    /// Switch the journal to WAL so readers do not block the writer.
    pub wal: bool,
    pub busy_timeout: Option<Duration>,
}

impl Default for RecordStoreSetup {
    fn default() -> Self {
        Self {
            wal: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl RecordStoreSetup {
    fn apply(&self, conn: &mut SqliteConnection) -> diesel::QueryResult<()> {
        if self.wal {
            conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        }
        if let Some(timeout) = self.busy_timeout {
            conn.batch_execute(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()))?;
        }
        fold_case_utils::register_impl(conn, |value: String| fold(&value))
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for RecordStoreSetup {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        self.apply(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Opens the pool for `database_url` with [`RecordStoreSetup::default`].
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(RecordStoreSetup::default()))
        .build(manager)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|e| {
        log::error!("Failed to get connection from pool: {e}");
    })
}

//! The storage handle and everything that lives in a table.

use camino::Utf8Path;
use sqlx::{
    pool::PoolConnection,
    query::Query,
    sqlite::{SqliteArguments, SqliteConnectOptions},
    Pool, Sqlite,
};

use crate::error::StoreError;

pub const RECIPES_TABLE: &str = "recipes";
pub const COMMENTS_TABLE: &str = "comments";
pub const SPOTLIGHT_TABLE: &str = "recipe_of_the_day";

pub const LADLE_DB_FILE: &str = "ladle.sqlite";

/// Anything persisted knows how to build its own insertion query.
pub trait InsertIntoTable {
    fn make_insertion_query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>>;
}

/// A handle to the recipe database.
///
/// Cheap to clone; every operation acquires a pooled connection and releases
/// it before returning. Handlers take this explicitly instead of reaching
/// for a global.
#[derive(Clone, Debug)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Opens (or creates) the database under `folder` and brings the schema
    /// up to date.
    ///
    /// Idempotent: an existing database is migrated in place, never wiped.
    #[tracing::instrument]
    pub async fn open(folder: &Utf8Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(folder)
            .await
            .map_err(|err| StoreError::CreateDirFailed {
                path: folder.to_string(),
                err,
            })?;

        let options = SqliteConnectOptions::new()
            .filename(folder.join(LADLE_DB_FILE))
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = Pool::<Sqlite>::connect_lazy_with(options);

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .inspect_err(|e| tracing::error!("Migrating the recipe database failed! err: {e}"))?;

        Ok(Self { pool })
    }

    /// Grabs a connection from the pool.
    pub(crate) async fn conn(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        let conn = self
            .pool
            .acquire()
            .await
            .inspect_err(|e| tracing::error!("Failed to get database connection! err: {e}"))?;
        Ok(conn)
    }

    /// The underlying pool, for callers that need raw queries.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

//! MySQL-backed school store.

use crate::domain::{NewSchool, SchoolRecord, StoredSchool};
use crate::infra::config::{ConfigError, DbConfig, CONNECTION_LIMIT};
use crate::storage::{SchoolStore, StoreError};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Table layout the queries below expect. The table normally already exists;
/// this is only applied by `preflight --create-table`.
pub const SCHOOLS_DDL: &str = "CREATE TABLE IF NOT EXISTS schools (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    contact TEXT NOT NULL,
    image LONGTEXT,
    email TEXT NOT NULL
)";

const SELECT_SCHOOLS: &str = "SELECT CAST(id AS SIGNED) AS id, name, address, city, state, contact, image, email
     FROM schools ORDER BY id DESC";

const INSERT_SCHOOL: &str =
    "INSERT INTO schools (name, address, city, state, contact, image, email) VALUES (?, ?, ?, ?, ?, ?, ?)";

/// Owns the process-wide connection pool.
///
/// Settings are checked when the store is built; the pool itself is opened on
/// first use and reused afterwards. If that first connect fails the cell stays
/// empty and the next call tries again.
pub struct MySqlSchoolStore {
    options: MySqlConnectOptions,
    pool: OnceCell<MySqlPool>,
}

impl MySqlSchoolStore {
    pub fn new(config: &DbConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);
        Self {
            options,
            pool: OnceCell::new(),
        }
    }

    /// Builds the store from `DB_*` environment variables, failing if any required one is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&DbConfig::from_env()?))
    }

    pub async fn pool(&self) -> Result<&MySqlPool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                info!(
                    max_connections = CONNECTION_LIMIT,
                    "opening MySQL connection pool"
                );
                MySqlPoolOptions::new()
                    .max_connections(CONNECTION_LIMIT)
                    .connect_with(self.options.clone())
                    .await
            })
            .await
            .map_err(StoreError::from)
    }

    /// Creates the `schools` table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query(SCHOOLS_DDL).execute(pool).await?;
        Ok(())
    }

    /// Closes the pool if it was ever opened.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
        }
    }
}

#[async_trait]
impl SchoolStore for MySqlSchoolStore {
    async fn list_schools(&self) -> Result<Vec<StoredSchool>, StoreError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(SELECT_SCHOOLS).fetch_all(pool).await?;
        debug!(rows = rows.len(), "fetched schools");
        rows.iter()
            .map(stored_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    async fn insert_school(&self, school: NewSchool) -> Result<SchoolRecord, StoreError> {
        let pool = self.pool().await?;
        let result = sqlx::query(INSERT_SCHOOL)
            .bind(&school.name)
            .bind(&school.address)
            .bind(&school.city)
            .bind(&school.state)
            .bind(&school.contact)
            .bind(&school.image)
            .bind(&school.email)
            .execute(pool)
            .await
            .map_err(StoreError::from_write)?;

        let id = result.last_insert_id() as i64;
        debug!(id, "inserted school");
        Ok(school.with_id(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

fn text_column(row: &MySqlRow, column: &str) -> Result<String, sqlx::Error> {
    Ok(row.try_get::<Option<String>, _>(column)?.unwrap_or_default())
}

// Older rows may hold the image in a binary column or as NULL; anything that
// is not UTF-8 text is treated as no image.
fn image_column(row: &MySqlRow) -> Option<String> {
    match row.try_get::<Option<String>, _>("image") {
        Ok(v) => v,
        Err(_) => row
            .try_get::<Option<Vec<u8>>, _>("image")
            .ok()
            .flatten()
            .and_then(|bytes| String::from_utf8(bytes).ok()),
    }
}

fn stored_from_row(row: &MySqlRow) -> Result<StoredSchool, sqlx::Error> {
    Ok(StoredSchool {
        id: row.try_get("id")?,
        name: text_column(row, "name")?,
        address: text_column(row, "address")?,
        city: text_column(row, "city")?,
        state: text_column(row, "state")?,
        contact: text_column(row, "contact")?,
        email: text_column(row, "email")?,
        image: image_column(row),
    })
}

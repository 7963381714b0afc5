//! Database Module
//!
//! Handles the SurrealDB connection and the branch table definition

pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};

use crate::core::{Config, ServerError};

/// Branch table schema
///
/// SCHEMAFULL: unknown keys are never stored. The unique index on `code`
/// rejects duplicate writes that race past the repository pre-check.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS branch SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON branch TYPE string;
DEFINE FIELD IF NOT EXISTS code ON branch TYPE string;
DEFINE FIELD IF NOT EXISTS address ON branch TYPE string;
DEFINE FIELD IF NOT EXISTS city ON branch TYPE string;
DEFINE FIELD IF NOT EXISTS state ON branch TYPE string;
DEFINE FIELD IF NOT EXISTS phone ON branch TYPE option<string>;
DEFINE FIELD IF NOT EXISTS email ON branch TYPE option<string>;
DEFINE FIELD IF NOT EXISTS status ON branch TYPE string DEFAULT 'active' ASSERT $value IN ['active', 'inactive'];
DEFINE FIELD IF NOT EXISTS created_at ON branch TYPE int;
DEFINE FIELD IF NOT EXISTS updated_at ON branch TYPE int;
DEFINE INDEX IF NOT EXISTS branch_code_unique ON branch FIELDS code UNIQUE;
"#;

/// Database service - owns a SurrealDB connection
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Any>,
}

impl DbService {
    /// Connect using the configured connection string and apply the schema
    ///
    /// The engine is picked from the URL scheme (`rocksdb://`, `mem://`, ...).
    pub async fn connect(config: &Config) -> Result<Self, ServerError> {
        let db = any::connect(config.database_url.as_str())
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;

        db.use_ns(config.database_ns.as_str())
            .use_db(config.database_name.as_str())
            .await
            .map_err(|e| ServerError::Database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(
            url = %config.database_url,
            ns = %config.database_ns,
            db = %config.database_name,
            "Database connection established"
        );

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| ServerError::Database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Branch schema applied");

        Ok(Self { db })
    }
}

//! Branch Repository

use serde::{Deserialize, Serialize};
use shared::util::{millis_to_datetime, now_millis};
use shared::{Branch, BranchStatus, BranchUpdate, ListParams};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use super::{BaseRepository, RepoError, RepoResult};

const TABLE: &str = "branch";

/// Projection shared by every read; the record key is exposed as a plain string
const FIELDS: &str = "record::id(id) AS id, name, code, address, city, state, phone, email, \
                      status, created_at, updated_at";

/// Stored branch row
#[derive(Debug, Clone, Deserialize)]
struct BranchRecord {
    id: String,
    name: String,
    code: String,
    address: String,
    city: String,
    state: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    status: BranchStatus,
    created_at: i64,
    updated_at: i64,
}

impl From<BranchRecord> for Branch {
    fn from(record: BranchRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            code: record.code,
            address: record.address,
            city: record.city,
            state: record.state,
            phone: record.phone,
            email: record.email,
            status: record.status,
            created_at: millis_to_datetime(record.created_at),
            updated_at: millis_to_datetime(record.updated_at),
        }
    }
}

/// Validated create input (required fields present)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBranch {
    pub name: String,
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: BranchStatus,
}

/// Row written on create
#[derive(Debug, Serialize)]
struct BranchContent {
    name: String,
    code: String,
    address: String,
    city: String,
    state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    status: BranchStatus,
    created_at: i64,
    updated_at: i64,
}

/// MERGE patch; absent fields keep their stored value
#[derive(Debug, Serialize)]
struct BranchPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<BranchStatus>,
    updated_at: i64,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

/// One page of branches plus the size of the whole matching set
#[derive(Debug, Clone)]
pub struct BranchSlice {
    pub branches: Vec<Branch>,
    pub total: u64,
}

#[derive(Clone)]
pub struct BranchRepository {
    base: BaseRepository,
}

impl BranchRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find one page of branches matching the search text
    ///
    /// Search is a case-insensitive substring match on name, code or city.
    pub async fn find_page(&self, params: &ListParams) -> RepoResult<BranchSlice> {
        let filter = if params.search.is_empty() {
            ""
        } else {
            " WHERE string::contains(string::lowercase(name), $search) \
             OR string::contains(string::lowercase(code), $search) \
             OR string::contains(string::lowercase(city), $search)"
        };
        // Column and direction come from closed enums, never from raw input
        let page_sql = format!(
            "SELECT {FIELDS} FROM {TABLE}{filter} ORDER BY {} {} LIMIT $limit START $start",
            params.sort_field.column(),
            params.sort_order.as_str().to_uppercase(),
        );
        let count_sql = format!("SELECT count() AS total FROM {TABLE}{filter} GROUP ALL");

        let mut result = self
            .base
            .db()
            .query(page_sql)
            .query(count_sql)
            .bind(("search", params.search.to_lowercase()))
            .bind(("limit", params.limit))
            .bind(("start", params.offset()))
            .await?;

        let records: Vec<BranchRecord> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|row| row.total).unwrap_or(0);

        Ok(BranchSlice {
            branches: records.into_iter().map(Branch::from).collect(),
            total,
        })
    }

    /// Find branch by record key
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Branch>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM type::thing($table, $id)"))
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .await?;
        let records: Vec<BranchRecord> = result.take(0)?;
        Ok(records.into_iter().next().map(Branch::from))
    }

    /// Find branch by code
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Branch>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE} WHERE code = $code LIMIT 1"))
            .bind(("code", code.to_string()))
            .await?;
        let records: Vec<BranchRecord> = result.take(0)?;
        Ok(records.into_iter().next().map(Branch::from))
    }

    /// Create a new branch
    pub async fn create(&self, data: NewBranch) -> RepoResult<Branch> {
        // Check duplicate code
        if self.find_by_code(&data.code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Branch code '{}' already exists",
                data.code
            )));
        }

        let now = now_millis();
        let id = uuid::Uuid::new_v4().simple().to_string();
        let content = BranchContent {
            name: data.name,
            code: data.code,
            address: data.address,
            city: data.city,
            state: data.state,
            phone: data.phone,
            email: data.email,
            status: data.status,
            created_at: now,
            updated_at: now,
        };

        self.base
            .db()
            .query("CREATE type::thing($table, $id) CONTENT $data")
            .bind(("table", TABLE))
            .bind(("id", id.clone()))
            .bind(("data", content))
            .await?
            .check()?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create branch".to_string()))
    }

    /// Overwrite the fields present in `data`
    ///
    /// Returns `None` when no branch has this id. `updated_at` always moves
    /// forward, even for an empty patch.
    pub async fn update(&self, id: &str, data: BranchUpdate) -> RepoResult<Option<Branch>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        // Check duplicate code if changing
        if let Some(ref new_code) = data.code
            && new_code != &existing.code
            && self.find_by_code(new_code).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Branch code '{}' already exists",
                new_code
            )));
        }

        let updated_at = now_millis().max(existing.updated_at.timestamp_millis() + 1);
        let patch = BranchPatch {
            name: data.name,
            code: data.code,
            address: data.address,
            city: data.city,
            state: data.state,
            phone: data.phone,
            email: data.email,
            status: data.status,
            updated_at,
        };

        self.base
            .db()
            .query("UPDATE type::thing($table, $id) MERGE $data")
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .bind(("data", patch))
            .await?
            .check()?;

        self.find_by_id(id).await
    }

    /// Hard delete a branch; deleting a missing id is not an error
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE type::thing($table, $id)")
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    /// Cheap round trip used by the health probe
    pub async fn ping(&self) -> RepoResult<()> {
        self.base.db().query("RETURN true").await?.check()?;
        Ok(())
    }
}

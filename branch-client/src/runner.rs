//! Effect runner
//!
//! 执行 [`Effect`] 并把结果转换为 [`ManagementEvent`] 送回状态机。

use std::path::Path;

use serde_json::Value;
use shared::Branch;

use crate::api::BranchApi;
use crate::client::HttpClient;
use crate::spreadsheet;
use crate::view::{Effect, ManagementEvent};
use crate::{ClientError, ClientResult};

/// Runs effects one at a time against the API
pub struct EffectRunner<H> {
    api: BranchApi<H>,
}

impl<H: HttpClient> EffectRunner<H> {
    pub fn new(api: BranchApi<H>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &BranchApi<H> {
        &self.api
    }

    /// Execute one effect; failures are logged and reported as events
    pub async fn run(&self, effect: Effect) -> ManagementEvent {
        match effect {
            Effect::FetchList(query) => match self.api.list(&query).await {
                Ok(page) => ManagementEvent::ListLoaded(page),
                Err(e) => {
                    tracing::error!(error = %e, "Error fetching branches");
                    ManagementEvent::ListFailed(e.to_string())
                }
            },
            Effect::Create(data) => match self.api.create(&data).await {
                Ok(branch) => {
                    tracing::info!(id = %branch.id, code = %branch.code, "Branch created");
                    ManagementEvent::SaveSucceeded(Some(branch))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error saving branch");
                    ManagementEvent::SaveFailed(e.to_string())
                }
            },
            Effect::Update { id, data } => match self.api.update(&id, &data).await {
                Ok(branch) => {
                    if branch.is_none() {
                        tracing::warn!(id = %id, "Update target no longer exists");
                    }
                    ManagementEvent::SaveSucceeded(branch)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error saving branch");
                    ManagementEvent::SaveFailed(e.to_string())
                }
            },
            Effect::Delete { id } => match self.api.delete(&id).await {
                Ok(_) => {
                    tracing::info!(id = %id, "Branch deleted");
                    ManagementEvent::DeleteSucceeded
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error deleting branch");
                    ManagementEvent::DeleteFailed(e.to_string())
                }
            },
            Effect::Import { path } => match self.import_file(&path).await {
                Ok(created) => ManagementEvent::ImportFinished {
                    imported: created.len(),
                },
                Err(ClientError::Import { imported, source }) => {
                    tracing::error!(error = %source, imported, "Error importing branches");
                    ManagementEvent::ImportFailed {
                        imported,
                        message: source.to_string(),
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error importing branches");
                    ManagementEvent::ImportFailed {
                        imported: 0,
                        message: e.to_string(),
                    }
                }
            },
            Effect::Export { path, branches } => {
                match spreadsheet::export_branches(&path, &branches) {
                    Ok(()) => ManagementEvent::ExportFinished {
                        path,
                        rows: branches.len(),
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "Error exporting branches");
                        ManagementEvent::ExportFailed(e.to_string())
                    }
                }
            }
        }
    }

    /// Read a workbook and create one branch per row
    pub async fn import_file(&self, path: &Path) -> ClientResult<Vec<Branch>> {
        let rows = spreadsheet::read_rows(path)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "Importing branches");
        self.import_rows(rows).await
    }

    /// Create rows sequentially, awaiting each; the first failure stops the import
    ///
    /// Rows created before the failure are kept.
    pub async fn import_rows(
        &self,
        rows: impl IntoIterator<Item = spreadsheet::Row>,
    ) -> ClientResult<Vec<Branch>> {
        let mut created = Vec::new();
        for row in rows {
            match self.api.create_raw(&Value::Object(row)).await {
                Ok(branch) => created.push(branch),
                Err(source) => {
                    return Err(ClientError::Import {
                        imported: created.len(),
                        source: Box::new(source),
                    });
                }
            }
        }
        Ok(created)
    }
}

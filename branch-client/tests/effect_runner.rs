//! EffectRunner tests against a scripted in-memory transport

use std::sync::Mutex;

use async_trait::async_trait;
use branch_client::spreadsheet::{self, Row};
use branch_client::view::{Effect, ManagementEvent};
use branch_client::{BranchApi, ClientError, ClientResult, EffectRunner, HttpClient};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::{Branch, BranchListQuery, BranchStatus};

/// Records every call; POST fails once `fail_after` rows were accepted
#[derive(Default)]
struct ScriptedHttp {
    calls: Mutex<Vec<String>>,
    created: Mutex<usize>,
    fail_after: Option<usize>,
}

impl ScriptedHttp {
    fn failing_after(rows: usize) -> Self {
        Self {
            fail_after: Some(rows),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn branch_json(id: &str, body: &Value) -> Value {
    json!({
        "id": id,
        "name": body.get("name").cloned().unwrap_or(json!("")),
        "code": body.get("code").cloned().unwrap_or(json!("")),
        "address": "1 Main St",
        "city": "Springfield",
        "state": "IL",
        "status": "active",
        "createdAt": "2024-05-01T08:30:00Z",
        "updatedAt": "2024-05-01T08:30:00Z"
    })
}

fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.record(format!("GET {path}"));
        decode(json!({
            "branches": [branch_json("b1", &json!({"name": "Main St", "code": "MN01"}))],
            "totalPages": 4,
            "currentPage": 1
        }))
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.record(format!("POST {path}"));
        let body = serde_json::to_value(body)?;
        let mut created = self.created.lock().unwrap();
        if self.fail_after == Some(*created) {
            return Err(ClientError::Api {
                code: 1001,
                message: "Branch code 'DUP' already exists".into(),
            });
        }
        *created += 1;
        decode(branch_json(&format!("new{}", *created), &body))
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        _body: &B,
    ) -> ClientResult<T> {
        self.record(format!("PUT {path}"));
        decode(Value::Null)
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.record(format!("DELETE {path}"));
        decode(json!({"message": "Branch deleted successfully"}))
    }
}

fn row(name: &str, code: &str) -> Row {
    let mut row = Row::new();
    row.insert("name".into(), Value::String(name.into()));
    row.insert("code".into(), Value::String(code.into()));
    row
}

#[tokio::test]
async fn test_fetch_list_loads_page() {
    let runner = EffectRunner::new(BranchApi::new(ScriptedHttp::default()));
    let event = runner
        .run(Effect::FetchList(BranchListQuery::new(1, 10).with_search("main")))
        .await;

    match event {
        ManagementEvent::ListLoaded(page) => {
            assert_eq!(page.total_pages, 4);
            assert_eq!(page.branches[0].code, "MN01");
            assert_eq!(page.branches[0].status, BranchStatus::Active);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(
        runner.api().http().calls(),
        vec!["GET /api/branches?page=1&limit=10&search=main&sortBy=name&sortOrder=asc"]
    );
}

#[tokio::test]
async fn test_import_is_sequential_and_stops_on_failure() {
    let runner = EffectRunner::new(BranchApi::new(ScriptedHttp::failing_after(2)));
    let rows = vec![row("A", "A1"), row("B", "B1"), row("Dup", "DUP"), row("C", "C1")];

    let err = runner.import_rows(rows).await.unwrap_err();
    match err {
        ClientError::Import { imported, source } => {
            assert_eq!(imported, 2);
            assert_eq!(source.to_string(), "Branch code 'DUP' already exists");
        }
        other => panic!("unexpected error {other:?}"),
    }
    // the row after the failure is never sent
    assert_eq!(runner.api().http().calls().len(), 3);
}

#[tokio::test]
async fn test_update_of_missing_branch_still_closes_dialog() {
    let runner = EffectRunner::new(BranchApi::new(ScriptedHttp::default()));
    let event = runner
        .run(Effect::Update {
            id: "gone".into(),
            data: Default::default(),
        })
        .await;
    assert_eq!(event, ManagementEvent::SaveSucceeded(None));
    assert_eq!(runner.api().http().calls(), vec!["PUT /api/branches/gone"]);
}

#[tokio::test]
async fn test_export_then_import_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(spreadsheet::DEFAULT_EXPORT_FILE);
    let runner = EffectRunner::new(BranchApi::new(ScriptedHttp::default()));

    let branches: Vec<Branch> = vec![
        serde_json::from_value(branch_json("x1", &json!({"name": "North", "code": "N1"})))
            .unwrap(),
        serde_json::from_value(branch_json("x2", &json!({"name": "South", "code": "S1"})))
            .unwrap(),
    ];
    let event = runner
        .run(Effect::Export {
            path: path.clone(),
            branches,
        })
        .await;
    assert_eq!(
        event,
        ManagementEvent::ExportFinished {
            path: path.clone(),
            rows: 2
        }
    );

    let event = runner.run(Effect::Import { path }).await;
    assert_eq!(event, ManagementEvent::ImportFinished { imported: 2 });
}

#[tokio::test]
async fn test_import_of_missing_file_reports_zero_rows() {
    let runner = EffectRunner::new(BranchApi::new(ScriptedHttp::default()));
    let event = runner
        .run(Effect::Import {
            path: "does/not/exist.xlsx".into(),
        })
        .await;
    assert!(matches!(event, ManagementEvent::ImportFailed { imported: 0, .. }));
    assert!(runner.api().http().calls().is_empty());
}

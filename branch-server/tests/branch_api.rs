//! Branch API integration tests (in-process router, in-memory SurrealDB)

mod common;

use branch_client::{ClientError, HttpClient};
use common::{api, create, payload};
use serde_json::{Value, json};
use shared::{BranchListQuery, BranchStatus, BranchUpdate, ErrorCode, SortField, SortOrder};

fn codes(page: &shared::BranchPage) -> Vec<&str> {
    page.branches.iter().map(|b| b.code.as_str()).collect()
}

#[tokio::test]
async fn test_create_update_delete_scenario() {
    let api = api().await;

    let created = api
        .create(&payload("Main St", "MN01", "Springfield"))
        .await
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.status, BranchStatus::Active);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.phone, None);

    let update = BranchUpdate {
        city: Some("Shelbyville".into()),
        ..Default::default()
    };
    let updated = api.update(&created.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.city, "Shelbyville");
    assert_eq!(updated.name, "Main St");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let message = api.delete(&created.id).await.unwrap();
    assert_eq!(message.message, "Branch deleted successfully");

    let page = api.list(&BranchListQuery::default()).await.unwrap();
    assert!(page.branches.iter().all(|b| b.id != created.id));
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.current_page, 1);
}

#[tokio::test]
async fn test_duplicate_code_is_rejected_without_side_effects() {
    let api = api().await;
    create(&api, "Main St", "MN01", "Springfield").await;

    let err = api
        .create(&payload("Other", "MN01", "Capital City"))
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(ErrorCode::BranchCodeExists.code()));
    assert_eq!(err.to_string(), "Branch code 'MN01' already exists");

    let page = api.list(&BranchListQuery::default()).await.unwrap();
    assert_eq!(codes(&page), vec!["MN01"]);
    assert_eq!(page.branches[0].name, "Main St");
}

#[tokio::test]
async fn test_update_to_taken_code_is_rejected() {
    let api = api().await;
    create(&api, "Main St", "MN01", "Springfield").await;
    let other = create(&api, "Side St", "SD01", "Springfield").await;

    let update = BranchUpdate {
        code: Some("MN01".into()),
        ..Default::default()
    };
    let err = api.update(&other.id, &update).await.unwrap_err();
    assert_eq!(err.api_code(), Some(ErrorCode::BranchCodeExists.code()));

    // keeping its own code is fine
    let update = BranchUpdate {
        code: Some("SD01".into()),
        name: Some("Side Street".into()),
        ..Default::default()
    };
    let updated = api.update(&other.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.name, "Side Street");
}

#[tokio::test]
async fn test_missing_required_fields() {
    let api = api().await;

    let err = api
        .create_raw(&json!({ "name": "Main St", "city": "" }))
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(ErrorCode::ValidationFailed.code()));
    assert_eq!(
        err.to_string(),
        "Branch validation failed: code is required, address is required, city is required, state is required"
    );
}

#[tokio::test]
async fn test_invalid_status_and_wrong_types_are_rejected() {
    let api = api().await;

    let mut body = serde_json::to_value(payload("Main St", "MN01", "Springfield")).unwrap();
    body["status"] = json!("closed");
    let err = api.create_raw(&body).await.unwrap_err();
    assert_eq!(err.api_code(), Some(ErrorCode::ValidationFailed.code()));

    let mut body = serde_json::to_value(payload("Main St", "MN01", "Springfield")).unwrap();
    body["name"] = json!(42);
    let err = api.create_raw(&body).await.unwrap_err();
    assert_eq!(err.api_code(), Some(ErrorCode::ValidationFailed.code()));

    let page = api.list(&BranchListQuery::default()).await.unwrap();
    assert!(page.branches.is_empty());
}

#[tokio::test]
async fn test_create_ignores_unknown_and_server_owned_keys() {
    let api = api().await;

    let mut body = serde_json::to_value(payload("Main St", "MN01", "Springfield")).unwrap();
    body["id"] = json!("chosen-by-client");
    body["createdAt"] = json!("2001-01-01T00:00:00Z");
    body["color"] = json!("blue");
    body["phone"] = json!("555-0100");
    body["status"] = json!("inactive");

    let created = api.create_raw(&body).await.unwrap();
    assert_ne!(created.id, "chosen-by-client");
    assert_ne!(created.created_at.to_rfc3339(), "2001-01-01T00:00:00+00:00");
    assert_eq!(created.phone.as_deref(), Some("555-0100"));
    assert_eq!(created.status, BranchStatus::Inactive);
}

#[tokio::test]
async fn test_pagination_bounds_and_total_pages() {
    let api = api().await;
    for i in 1..=7 {
        create(&api, &format!("Branch {i}"), &format!("C{i:02}"), "Springfield").await;
    }

    for limit in 1..=8i64 {
        let expected_pages = 7u64.div_ceil(limit as u64);
        let mut seen = Vec::new();
        for page in 1..=(expected_pages as i64 + 1) {
            let result = api.list(&BranchListQuery::new(page, limit)).await.unwrap();
            assert!(result.branches.len() as i64 <= limit);
            assert_eq!(result.total_pages, expected_pages);
            assert_eq!(result.current_page, page as u64);
            seen.extend(result.branches.into_iter().map(|b| b.code));
        }
        // every branch appears exactly once across the pages
        seen.sort();
        assert_eq!(seen.len(), 7, "limit {limit}");
        seen.dedup();
        assert_eq!(seen.len(), 7, "limit {limit}");
    }
}

#[tokio::test]
async fn test_page_and_limit_below_one_are_clamped() {
    let api = api().await;
    create(&api, "Main St", "MN01", "Springfield").await;
    create(&api, "Side St", "SD01", "Springfield").await;

    let page = api.list(&BranchListQuery::new(0, -3)).await.unwrap();
    assert_eq!(page.current_page, 1);
    assert_eq!(page.branches.len(), 1);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_unparseable_page_is_a_client_error() {
    let api = api().await;
    let err = api
        .http()
        .get::<Value>("/api/branches?page=abc")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { code, .. } if code == ErrorCode::InvalidRequest.code()));
}

#[tokio::test]
async fn test_search_matches_name_code_or_city_case_insensitively() {
    let api = api().await;
    let target = create(&api, "Main St", "MN01", "Shelbyville").await;
    create(&api, "Side St", "SD01", "Springfield").await;
    create(&api, "Lakeside", "LK01", "Capital City").await;

    // city only, one branch
    let page = api
        .list(&BranchListQuery::default().with_search("SHELBY"))
        .await
        .unwrap();
    assert_eq!(page.branches.len(), 1);
    assert_eq!(page.branches[0].id, target.id);

    // name match ("side") on two branches
    let page = api
        .list(&BranchListQuery::default().with_search("side"))
        .await
        .unwrap();
    assert_eq!(codes(&page), vec!["LK01", "SD01"]);

    // code match
    let page = api
        .list(&BranchListQuery::default().with_search("lk0"))
        .await
        .unwrap();
    assert_eq!(codes(&page), vec!["LK01"]);

    let page = api
        .list(&BranchListQuery::default().with_search("nowhere"))
        .await
        .unwrap();
    assert!(page.branches.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn test_search_keeps_whitespace() {
    let api = api().await;
    create(&api, "Main St", "MN01", "Springfield").await;
    create(&api, "Maintown", "MT01", "Springfield").await;
    create(&api, "Downtown", "DT01", "Springfield").await;

    let page = api
        .list(&BranchListQuery::default().with_search(" "))
        .await
        .unwrap();
    assert_eq!(codes(&page), vec!["MN01"]);

    let page = api
        .list(&BranchListQuery::default().with_search("main "))
        .await
        .unwrap();
    assert_eq!(codes(&page), vec!["MN01"]);

    let page = api
        .list(&BranchListQuery::default().with_search("main"))
        .await
        .unwrap();
    assert_eq!(codes(&page), vec!["MN01", "MT01"]);
}

#[tokio::test]
async fn test_huge_page_and_limit_are_served() {
    let api = api().await;
    create(&api, "Alpha", "A01", "Springfield").await;
    create(&api, "Bravo", "B01", "Springfield").await;
    create(&api, "Charlie", "C01", "Springfield").await;

    let page = api
        .list(&BranchListQuery::new(1, i64::MAX))
        .await
        .unwrap();
    assert_eq!(codes(&page), vec!["A01", "B01", "C01"]);
    assert_eq!(page.total_pages, 1);

    for (page_no, limit) in [(2, i64::MAX), (4, i64::MAX), (i64::MAX, 10), (i64::MAX, i64::MAX)] {
        let page = api
            .list(&BranchListQuery::new(page_no, limit))
            .await
            .unwrap();
        assert!(page.branches.is_empty(), "page={page_no} limit={limit}");
        assert_eq!(page.current_page, page_no as u64);
    }
}

#[tokio::test]
async fn test_sorting() {
    let api = api().await;
    create(&api, "Bravo", "B02", "Zurich").await;
    create(&api, "Alpha", "C03", "York").await;
    create(&api, "Charlie", "A01", "Xenia").await;

    // default: name ascending
    let page = api.list(&BranchListQuery::default()).await.unwrap();
    assert_eq!(codes(&page), vec!["C03", "B02", "A01"]);

    let page = api
        .list(&BranchListQuery::default().with_sort(SortField::Code, SortOrder::Desc))
        .await
        .unwrap();
    assert_eq!(codes(&page), vec!["C03", "B02", "A01"]);

    let page = api
        .list(&BranchListQuery::default().with_sort(SortField::City, SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(codes(&page), vec!["A01", "C03", "B02"]);

    // unknown field falls back to name, unknown direction sorts descending
    let mut query = BranchListQuery::default();
    query.sort_by = "nonsense".into();
    query.sort_order = "sideways".into();
    let page = api.list(&query).await.unwrap();
    assert_eq!(codes(&page), vec!["A01", "B02", "C03"]);
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let api = api().await;
    let mut data = payload("Main St", "MN01", "Springfield");
    data.phone = Some("555-0100".into());
    data.email = Some("main@example.com".into());
    let created = api.create(&data).await.unwrap();

    let update = BranchUpdate {
        status: Some(BranchStatus::Inactive),
        ..Default::default()
    };
    let updated = api.update(&created.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.status, BranchStatus::Inactive);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.code, created.code);
    assert_eq!(updated.address, created.address);
    assert_eq!(updated.city, created.city);
    assert_eq!(updated.state, created.state);
    assert_eq!(updated.phone, created.phone);
    assert_eq!(updated.email, created.email);
    assert!(updated.updated_at > created.updated_at);

    // explicit nulls are treated as absent
    let again = api
        .http()
        .put::<Option<shared::Branch>, _>(
            &format!("/api/branches/{}", created.id),
            &json!({ "phone": null }),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.phone.as_deref(), Some("555-0100"));
    assert!(again.updated_at > updated.updated_at);
}

#[tokio::test]
async fn test_update_missing_branch_returns_null() {
    let api = api().await;
    let update = BranchUpdate {
        name: Some("Ghost".into()),
        ..Default::default()
    };
    let result = api.update("does-not-exist", &update).await.unwrap();
    assert!(result.is_none());

    let page = api.list(&BranchListQuery::default()).await.unwrap();
    assert!(page.branches.is_empty());
}

#[tokio::test]
async fn test_delete_missing_branch_succeeds() {
    let api = api().await;
    let message = api.delete("does-not-exist").await.unwrap();
    assert_eq!(message.message, "Branch deleted successfully");
}

#[tokio::test]
async fn test_health() {
    let api = api().await;
    let health = api.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

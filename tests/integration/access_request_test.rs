//! Integration tests for the access-request workflow.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_request_notifies_owner_and_blocks_duplicates() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let portfolio_id = app.portfolio(&owner, false).await;

    let request_id = app.request_access(&requester, portfolio_id).await;

    let inbox = app
        .request(
            "GET",
            "/api/notifications?filter=access",
            None,
            Some(&owner.token),
        )
        .await;
    let items = inbox.data().as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "access_request");
    assert_eq!(items[0]["access_request_id"], request_id.to_string());

    let duplicate = app
        .request(
            "POST",
            &format!("/api/portfolios/{portfolio_id}/access-requests"),
            None,
            Some(&requester.token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.error_code(), "CONFLICT");

    let mine = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}/access-requests/mine"),
            None,
            Some(&requester.token),
        )
        .await;
    assert_eq!(mine.data()["status"], "pending");
}

#[tokio::test]
async fn test_self_request_and_overlong_message_are_rejected() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let portfolio_id = app.portfolio(&owner, false).await;
    let path = format!("/api/portfolios/{portfolio_id}/access-requests");

    let own = app.request("POST", &path, None, Some(&owner.token)).await;
    assert_eq!(own.status, StatusCode::FORBIDDEN);

    let long = app
        .request(
            "POST",
            &path,
            Some(json!({ "message": "x".repeat(501) })),
            Some(&requester.token),
        )
        .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);
    assert_eq!(long.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_approve_grants_full_view_and_notifies_requester() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let portfolio_id = app.portfolio(&owner, false).await;
    let request_id = app.request_access(&requester, portfolio_id).await;

    let approved = app
        .request(
            "PUT",
            &format!("/api/access-requests/{request_id}/approve"),
            Some(json!({ "note": "Welcome" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.data()["status"], "approved");
    assert!(!approved.data()["decided_at"].is_null());

    let inbox = app
        .request("GET", "/api/notifications", None, Some(&requester.token))
        .await;
    let items = inbox.data().as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "access_granted");

    let view = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}"),
            None,
            Some(&requester.token),
        )
        .await;
    let data = view.data();
    assert_eq!(data["access_level"], "granted");
    for section in ["about", "projects", "education", "experience", "skills", "social_media"] {
        assert_eq!(data["sections"][section], true, "{section}");
    }
    assert_eq!(data["can_request_access"], false);
}

#[tokio::test]
async fn test_second_decision_is_already_decided() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let portfolio_id = app.portfolio(&owner, false).await;
    let request_id = app.request_access(&requester, portfolio_id).await;

    let first = app
        .request(
            "PUT",
            &format!("/api/access-requests/{request_id}/approve"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "PUT",
            &format!("/api/access-requests/{request_id}/reject"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.error_code(), "ALREADY_DECIDED");

    let record = app
        .request(
            "GET",
            &format!("/api/access-requests/{request_id}"),
            None,
            Some(&requester.token),
        )
        .await;
    assert_eq!(record.data()["status"], "approved");
}

#[tokio::test]
async fn test_non_owner_cannot_decide() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let intruder = app.user("intruder").await;
    let portfolio_id = app.portfolio(&owner, false).await;
    let request_id = app.request_access(&requester, portfolio_id).await;

    for user in [&requester, &intruder] {
        let response = app
            .request(
                "PUT",
                &format!("/api/access-requests/{request_id}/approve"),
                None,
                Some(&user.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    let hidden = app
        .request(
            "GET",
            &format!("/api/access-requests/{request_id}"),
            None,
            Some(&intruder.token),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rejection_allows_a_new_request() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let portfolio_id = app.portfolio(&owner, false).await;
    let first = app.request_access(&requester, portfolio_id).await;

    let rejected = app
        .request(
            "PUT",
            &format!("/api/access-requests/{first}/reject"),
            Some(json!({ "note": "Not right now" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(rejected.data()["status"], "rejected");

    let denied = app
        .request(
            "GET",
            "/api/notifications?filter=access",
            None,
            Some(&requester.token),
        )
        .await;
    assert_eq!(denied.data()[0]["kind"], "access_denied");

    let second = app.request_access(&requester, portfolio_id).await;
    assert_ne!(first, second);

    let received = app
        .request("GET", "/api/access-requests/received", None, Some(&owner.token))
        .await;
    let items = received.data().as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], second.to_string());

    let sent = app
        .request("GET", "/api/access-requests/sent", None, Some(&requester.token))
        .await;
    assert_eq!(sent.data().as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_unknown_request_is_not_found() {
    let app = TestApp::new();
    let owner = app.user("owner").await;

    let response = app
        .request(
            "PUT",
            "/api/access-requests/00000000-0000-0000-0000-000000000000/approve",
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_grant_on_public_portfolio_opens_hidden_sections() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let portfolio_id = app.portfolio(&owner, true).await;
    app.request(
        "PUT",
        &format!("/api/portfolios/{portfolio_id}/visibility"),
        Some(json!({ "is_skills_public": false })),
        Some(&owner.token),
    )
    .await;
    let path = format!("/api/portfolios/{portfolio_id}");

    let before = app.request("GET", &path, None, Some(&requester.token)).await;
    assert_eq!(before.data()["access_level"], "public");
    assert_eq!(before.data()["sections"]["skills"], false);

    let request_id = app.request_access(&requester, portfolio_id).await;
    app.request(
        "PUT",
        &format!("/api/access-requests/{request_id}/approve"),
        None,
        Some(&owner.token),
    )
    .await;

    let after = app.request("GET", &path, None, Some(&requester.token)).await;
    assert_eq!(after.data()["access_level"], "granted");
    assert_eq!(after.data()["sections"]["skills"], true);
}

//! Integration tests for the notification inbox and change events.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_mark_read_and_mark_all_read() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let portfolio_id = app.portfolio(&owner, false).await;
    for name in ["ann", "ben", "cal"] {
        let requester = app.user(name).await;
        app.request_access(&requester, portfolio_id).await;
    }
    assert_eq!(app.unread(&owner).await, 3);

    let inbox = app
        .request("GET", "/api/notifications?filter=unread", None, Some(&owner.token))
        .await;
    let first_id = inbox.data()[0]["id"].as_str().unwrap_or_default().to_string();

    let marked = app
        .request(
            "PUT",
            &format!("/api/notifications/{first_id}/read"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(marked.status, StatusCode::OK);
    assert_eq!(marked.data()["is_read"], true);
    assert_eq!(app.unread(&owner).await, 2);

    let all = app
        .request("PUT", "/api/notifications/read-all", None, Some(&owner.token))
        .await;
    assert_eq!(all.data()["marked"], 2);
    assert_eq!(app.unread(&owner).await, 0);
}

#[tokio::test]
async fn test_cannot_read_someone_elses_notification() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let portfolio_id = app.portfolio(&owner, false).await;
    app.request_access(&requester, portfolio_id).await;

    let inbox = app
        .request("GET", "/api/notifications", None, Some(&owner.token))
        .await;
    let id = inbox.data()[0]["id"].as_str().unwrap_or_default().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            None,
            Some(&requester.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.unread(&owner).await, 1);
}

#[tokio::test]
async fn test_unknown_filter_is_rejected() {
    let app = TestApp::new();
    let user = app.user("user").await;

    let response = app
        .request("GET", "/api/notifications?filter=bogus", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_paged_listing() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let portfolio_id = app.portfolio(&owner, false).await;
    for name in ["ann", "ben", "cal"] {
        let requester = app.user(name).await;
        app.request_access(&requester, portfolio_id).await;
    }

    let page = app
        .request(
            "GET",
            "/api/notifications?page=2&per_page=2",
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(page.data().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_change_events_reach_subscribers() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let requester = app.user("requester").await;
    let portfolio_id = app.portfolio(&owner, false).await;

    let mut events = app.state.events.subscribe();
    app.request_access(&requester, portfolio_id).await;

    let mut notified = false;
    while let Ok(event) = events.try_recv() {
        if event.notifications_changed_for() == Some(owner.id) {
            notified = true;
        }
    }
    assert!(notified);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let portfolio_id = app.portfolio(&owner, true).await;
    let requester = app.user("requester").await;
    app.request_access(&requester, portfolio_id).await;

    let page = app
        .request(
            "GET",
            "/api/notifications?page=18446744073709551615&per_page=100",
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.data().as_array().map(Vec::len), Some(0));

    let public = app
        .request(
            "GET",
            "/api/portfolios/public?page=18446744073709551615",
            None,
            None,
        )
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.data().as_array().map(Vec::len), Some(0));
}

//! Integration tests for the resolved portfolio view and owner-only routes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_private_portfolio_is_locked_for_strangers() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let stranger = app.user("stranger").await;
    let portfolio_id = app.portfolio(&owner, false).await;

    let view = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}"),
            None,
            Some(&stranger.token),
        )
        .await;

    assert_eq!(view.status, StatusCode::OK);
    let data = view.data();
    assert_eq!(data["access_level"], "locked");
    assert!(data["about"].is_null());
    assert_eq!(data["can_request_access"], true);
    for section in ["about", "projects", "education", "experience", "skills", "social_media"] {
        assert_eq!(data["sections"][section], false, "{section}");
    }
}

#[tokio::test]
async fn test_anonymous_viewer_cannot_request_access() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let portfolio_id = app.portfolio(&owner, false).await;

    let view = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}?name=Visitor&email=v%40example.com"),
            None,
            None,
        )
        .await;

    assert_eq!(view.status, StatusCode::OK);
    assert_eq!(view.data()["access_level"], "locked");
    assert_eq!(view.data()["can_request_access"], false);
}

#[tokio::test]
async fn test_public_portfolio_follows_section_flags() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let viewer = app.user("viewer").await;
    let portfolio_id = app.portfolio(&owner, true).await;

    let updated = app
        .request(
            "PUT",
            &format!("/api/portfolios/{portfolio_id}/visibility"),
            Some(json!({ "is_skills_public": false })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["is_skills_public"], false);

    let view = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}"),
            None,
            Some(&viewer.token),
        )
        .await;
    let data = view.data();
    assert_eq!(data["access_level"], "public");
    assert_eq!(data["sections"]["skills"], false);
    assert_eq!(data["sections"]["projects"], true);
    assert_eq!(data["about"]["title"], "owner's work");
}

#[tokio::test]
async fn test_owner_sees_everything_and_is_not_logged() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let portfolio_id = app.portfolio(&owner, false).await;

    let view = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(view.data()["access_level"], "owner");
    assert_eq!(view.data()["sections"]["skills"], true);

    let views = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}/views"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(views.status, StatusCode::OK);
    assert_eq!(views.data().as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_views_are_logged_for_the_owner_only() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let visitor = app.user("visitor").await;
    let portfolio_id = app.portfolio(&owner, true).await;

    app.request(
        "GET",
        &format!("/api/portfolios/{portfolio_id}"),
        None,
        Some(&visitor.token),
    )
    .await;
    app.request(
        "GET",
        &format!("/api/portfolios/{portfolio_id}?name=Anon&phone=555-0100"),
        None,
        None,
    )
    .await;

    let views = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}/views"),
            None,
            Some(&owner.token),
        )
        .await;
    let logs = views.data().as_array().cloned().unwrap_or_default();
    assert_eq!(logs.len(), 2);
    // Newest first: the anonymous view carries its contact details.
    assert!(logs[0]["viewer_id"].is_null());
    assert_eq!(logs[0]["viewer_name"], "Anon");
    assert_eq!(logs[1]["viewer_id"], visitor.id.to_string());

    let forbidden = app
        .request(
            "GET",
            &format!("/api/portfolios/{portfolio_id}/views"),
            None,
            Some(&visitor.token),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_only_owner_can_update_or_delete() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let other = app.user("other").await;
    let portfolio_id = app.portfolio(&owner, true).await;
    let path = format!("/api/portfolios/{portfolio_id}");

    let update = app
        .request("PUT", &path, Some(json!({ "title": "Mine now" })), Some(&other.token))
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);
    assert_eq!(update.error_code(), "FORBIDDEN");

    let delete = app.request("DELETE", &path, None, Some(&other.token)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let delete = app.request("DELETE", &path, None, Some(&owner.token)).await;
    assert_eq!(delete.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_listing_excludes_private_portfolios() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let public_id = app.portfolio(&owner, true).await;
    app.portfolio(&owner, false).await;

    let listing = app.request("GET", "/api/portfolios/public", None, None).await;
    assert_eq!(listing.status, StatusCode::OK);
    let items = listing.data().as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], public_id.to_string());

    let own = app.request("GET", "/api/portfolios", None, Some(&owner.token)).await;
    assert_eq!(own.data().as_array().map(Vec::len), Some(2));
}

//! HTTP integration tests driving the full router on the in-memory store.

mod helpers;

mod access_request_test;
mod auth_test;
mod notification_test;
mod portfolio_test;

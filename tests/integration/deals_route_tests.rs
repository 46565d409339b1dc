//! Integration tests for the deals page loader (`GET /deals`).

use after8_deals::http::routes::DealsPage;
use after8_deals::models::deal::DealMutation;

use super::test_helpers::spawn_server;

async fn fetch(base_url: &str, suffix: &str) -> DealsPage {
    let resp = reqwest::get(format!("{base_url}/deals{suffix}"))
        .await
        .expect("HTTP GET /deals");
    assert_eq!(resp.status(), 200);
    resp.json().await.expect("deals page json")
}

#[tokio::test]
async fn without_query_returns_all_deals_and_null_q() {
    let server = spawn_server().await;
    server.store.seed(12);

    let page = fetch(&server.base_url, "").await;

    assert_eq!(page.deals.len(), 12);
    assert!(page.q.is_none());
}

#[tokio::test]
async fn query_filters_and_echoes_raw_q() {
    let server = spawn_server().await;
    let beef = server
        .store
        .create(DealMutation::new("Beef Tacos", "Bite Labs", "7.50"));
    server
        .store
        .create(DealMutation::new("Miso Soup", "Bite Labs", "3.20"));
    let shrimp = server
        .store
        .create(DealMutation::new("Shrimp Tacos", "Bistro Bliss", "8.00"));

    let page = fetch(&server.base_url, "?q=Tacos").await;

    assert_eq!(page.q.as_deref(), Some("Tacos"));
    assert_eq!(page.deals, vec![shrimp, beef]);
}

#[tokio::test]
async fn empty_query_is_echoed_but_does_not_filter() {
    let server = spawn_server().await;
    server.store.seed(5);

    let page = fetch(&server.base_url, "?q=").await;

    assert_eq!(page.q.as_deref(), Some(""));
    assert_eq!(page.deals.len(), 5);
}

#[tokio::test]
async fn deals_are_serialized_with_camel_case_timestamps() {
    let server = spawn_server().await;
    server.store.create_empty();

    let body: serde_json::Value = reqwest::get(format!("{}/deals", server.base_url))
        .await
        .expect("HTTP GET /deals")
        .json()
        .await
        .expect("json");

    let first = &body["deals"][0];
    assert!(first["createdAt"].is_string());
    assert_eq!(first["currency"], "nzh");
    assert!(body["q"].is_null());
}

//! API integration tests
//!
//! Run against a live server with seeded departments:
//! `cargo run --bin seed && cargo test -- --ignored`

use chrono::{Duration, Local, NaiveDate};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an administrator bearer token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// A date far enough ahead that the seed generator never booked it
fn free_date(offset_days: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(30 + offset_days)
}

async fn book(client: &Client, department_id: i64, time_slot: &str, iin: &str) -> reqwest::Response {
    client
        .post(format!("{}/appointments", BASE_URL))
        .json(&json!({
            "department_id": department_id,
            "time_slot": time_slot,
            "user_name": "Тест Тестов",
            "phone_number": "77010000000",
            "iin": iin,
            "service": "Консультация"
        }))
        .send()
        .await
        .expect("Failed to send booking request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_departments() {
    let client = Client::new();

    let response = client
        .get(format!("{}/departments", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let departments = body.as_array().expect("Expected array");
    assert!(!departments.is_empty());
    assert!(departments[0]["name"].is_string());
    assert!(departments[0]["address"].is_string());
    assert!(departments[0]["kind"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_department_services_match_kind() {
    let client = Client::new();

    let departments: Value = client
        .get(format!("{}/departments", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    for department in departments.as_array().expect("Expected array") {
        let id = department["id"].as_i64().unwrap();
        let services: Value = client
            .get(format!("{}/departments/{}/services", BASE_URL, id))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse response");

        let services = services.as_array().expect("Expected array");
        match department["kind"].as_str().unwrap() {
            "standard" => assert_eq!(services.len(), 6),
            "extended" => assert_eq!(services.len(), 11),
            other => panic!("Unexpected kind {}", other),
        }
    }
}

#[tokio::test]
#[ignore]
async fn test_available_slots_full_day() {
    let client = Client::new();
    let date = free_date(0);

    let response = client
        .get(format!("{}/departments/2/slots?date={}", BASE_URL, date))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let slots: Value = response.json().await.expect("Failed to parse response");
    let slots = slots.as_array().expect("Expected array");
    // 9:00-18:00 with 30-minute slots
    assert_eq!(slots.len(), 18);
    assert_eq!(slots[0].as_str().unwrap(), format!("{}T09:00:00", date));
    assert_eq!(slots[17].as_str().unwrap(), format!("{}T17:30:00", date));
}

#[tokio::test]
#[ignore]
async fn test_booked_slot_removed_from_availability() {
    let client = Client::new();
    let date = free_date(9);
    let slot = format!("{}T10:30:00", date);

    async fn fetch_slots(client: &Client, date: NaiveDate) -> Vec<String> {
        let body: Value = client
            .get(format!("{}/departments/4/slots?date={}", BASE_URL, date))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse response");
        body.as_array()
            .expect("Expected array")
            .iter()
            .map(|s| s.as_str().unwrap().to_string())
            .collect()
    }

    let before = fetch_slots(&client, date).await;
    assert!(before.contains(&slot));

    let response = book(&client, 4, &slot, "990101350123").await;
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_i64().unwrap();

    // Exactly the booked instant disappears from the listing
    let after = fetch_slots(&client, date).await;
    assert_eq!(after.len(), before.len() - 1);
    assert!(!after.contains(&slot));
    assert!(after.iter().all(|s| before.contains(s)));

    // Cancelling restores the full grid
    let response = client
        .post(format!("{}/appointments/{}/cancel", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    assert_eq!(fetch_slots(&client, date).await, before);
}

#[tokio::test]
#[ignore]
async fn test_available_slots_malformed_date() {
    let client = Client::new();

    let response = client
        .get(format!("{}/departments/2/slots?date=02-06-2025", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_and_fetch_round_trip() {
    let client = Client::new();
    let slot = format!("{}T10:00:00", free_date(1));

    let response = book(&client, 2, &slot, "990101350123").await;
    assert_eq!(response.status(), 201);

    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_i64().expect("No appointment ID");
    assert_eq!(created["status"], "active");

    let fetched: Value = client
        .get(format!("{}/appointments/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(fetched["time_slot"], created["time_slot"]);
    assert_eq!(fetched["iin"], "990101350123");
    assert_eq!(fetched["service"], "Консультация");
    assert!(fetched["department_name"].is_string());
    assert!(fetched["department_address"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_double_booking_conflicts() {
    let client = Client::new();
    let slot = format!("{}T09:00:00", free_date(2));

    let first = book(&client, 2, &slot, "990101350123").await;
    assert_eq!(first.status(), 201);

    let second = book(&client, 2, &slot, "880202450456").await;
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_booking_single_winner() {
    let client = Client::new();
    let slot = format!("{}T11:30:00", free_date(3));

    let (a, b) = tokio::join!(
        book(&client, 2, &slot, "990101350123"),
        book(&client, 2, &slot, "880202450456"),
    );

    let statuses = [a.status().as_u16(), b.status().as_u16()];
    assert!(statuses.contains(&201), "one booking must win: {:?}", statuses);
    assert!(statuses.contains(&409), "one booking must lose: {:?}", statuses);
}

#[tokio::test]
#[ignore]
async fn test_booking_off_grid_rejected() {
    let client = Client::new();

    let response = book(&client, 2, &format!("{}T09:15:00", free_date(4)), "990101350123").await;
    assert_eq!(response.status(), 400);

    let response = book(&client, 2, &format!("{}T08:30:00", free_date(4)), "990101350123").await;
    assert_eq!(response.status(), 400);

    let response = book(&client, 2, &format!("{}T18:00:00", free_date(4)), "990101350123").await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_bad_iin_rejected() {
    let client = Client::new();

    let response = book(&client, 2, &format!("{}T09:00:00", free_date(5)), "12345").await;
    assert_eq!(response.status(), 400);

    let response = book(&client, 2, &format!("{}T09:00:00", free_date(5)), "99010135012x").await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_wrong_service_rejected() {
    let client = Client::new();

    // Department 2 is a standard branch; driver services are extended-only
    let response = client
        .post(format!("{}/appointments", BASE_URL))
        .json(&json!({
            "department_id": 2,
            "time_slot": format!("{}T09:30:00", free_date(6)),
            "user_name": "Тест Тестов",
            "phone_number": "77010000000",
            "iin": "990101350123",
            "service": "Водительское удостоверение"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_booking_unknown_department() {
    let client = Client::new();

    let response = book(&client, 99999, &format!("{}T09:00:00", free_date(7)), "990101350123").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_cancel_frees_slot() {
    let client = Client::new();
    let slot = format!("{}T14:00:00", free_date(8));

    let response = book(&client, 3, &slot, "990101350123").await;
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/appointments/{}/cancel", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Cancelling again conflicts
    let response = client
        .post(format!("{}/appointments/{}/cancel", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // The slot is bookable again
    let response = book(&client, 3, &slot, "880202450456").await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_admin_requires_token() {
    let client = Client::new();

    for path in ["admin/appointments", "admin/statistics", "admin/reports/appointments.csv"] {
        let response = client
            .get(format!("{}/{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 401, "{} must be admin-gated", path);
    }
}

#[tokio::test]
#[ignore]
async fn test_admin_statistics() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/admin/statistics", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_appointments"].is_number());
    assert!(body["appointments_today"].is_number());
    assert!(body["appointments_yesterday"].is_number());
    assert!(body["load_percentage"].is_number());
    assert!(body["by_department"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_admin_csv_export() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/admin/reports/appointments.csv", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.starts_with("id,department,address,time_slot"));
}

use reqwest::Client;
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token: None,
        }
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.authed(self.client.get(format!("{}{}", self.base_url, path)))
            .send()
            .await
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.authed(self.client.post(format!("{}{}", self.base_url, path)))
            .json(&json)
            .send()
            .await
    }

    async fn patch(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.authed(self.client.patch(format!("{}{}", self.base_url, path)))
            .json(&json)
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.authed(self.client.delete(format!("{}{}", self.base_url, path)))
            .send()
            .await
    }
}

/// End-to-end workflow against a running server. Skips itself unless
/// TEST_API_BASE_URL is set by the test runner.
#[tokio::test]
async fn test_label_office_complete_workflow() {
    let base_url = match std::env::var("TEST_API_BASE_URL") {
        Ok(url) => url,
        Err(_) => {
            println!("Skipping: TEST_API_BASE_URL is not set");
            return;
        }
    };

    let mut client = TestClient::new(base_url);

    // Wait for the API server to be ready
    let mut retries = 0;
    loop {
        match client.get("/health").await {
            Ok(resp) if resp.status().is_success() => break,
            _ => {
                retries += 1;
                if retries >= 30 {
                    panic!("API server is not responding after {} attempts", retries);
                }
                sleep(Duration::from_secs(2)).await;
            }
        }
    }

    // 1. Register an admin account and log in
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis();
    let email = format!("it-admin-{}@label.example", suffix);

    let resp = client
        .post(
            "/auth/register",
            json!({
                "email": email,
                "display_name": "Integration Admin",
                "password": "integration-pass",
                "is_admin": true
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "register failed: {:?}", resp.text().await);

    // Registering the same email again is a conflict
    let resp = client
        .post(
            "/auth/register",
            json!({ "email": email, "password": "integration-pass" }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let resp = client
        .post(
            "/auth/login",
            json!({ "email": email, "password": "integration-pass" }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let login: Value = resp.json().await.unwrap();
    let token = login["token"].as_str().unwrap().to_string();
    assert_eq!(login["user"]["is_admin"], json!(true));
    client.token = Some(token);

    // 2. Roster: create an artist, then a contract for them
    let resp = client
        .post(
            "/artists",
            json!({
                "name": "Integration Artist",
                "email": "artist@label.example",
                "status": "active"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let artist: Value = resp.json().await.unwrap();
    let artist_id = artist["id"].as_str().unwrap().to_string();

    let resp = client
        .post(
            "/contracts",
            json!({
                "artist_id": artist_id,
                "title": "Integration recording deal",
                "kind": "recording",
                "royalty_rate_bps": 1500
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    // A contract against an unknown artist is rejected with field errors
    let resp = client
        .post(
            "/contracts",
            json!({
                "artist_id": "no-such-artist",
                "title": "Bad deal",
                "kind": "recording"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    // 3. Catalog: product with a valid GTIN, duplicate GTIN rejected
    let resp = client
        .post(
            "/products",
            json!({
                "title": "Integration LP",
                "artist_id": artist_id,
                "format": "album",
                "gtin": "4006381333931"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let product: Value = resp.json().await.unwrap();
    let product_id = product["id"].as_str().unwrap().to_string();
    assert_eq!(product["registration"], json!("unregistered"));

    let resp = client
        .post(
            "/products",
            json!({
                "title": "Copycat LP",
                "format": "album",
                "gtin": "4006381333931"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let resp = client
        .post(
            "/products",
            json!({
                "title": "Broken LP",
                "format": "album",
                "gtin": "4006381333930"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 422, "bad check digit must be rejected");

    // Filtered listings are served from the store, not the full table
    let resp = client
        .get(&format!("/products?artist_id={}", artist_id))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let products: Value = resp.json().await.unwrap();
    assert!(products["total"].as_u64().unwrap() >= 1);

    let resp = client.get("/artists?status=active").await.unwrap();
    assert_eq!(resp.status(), 200);
    let artists: Value = resp.json().await.unwrap();
    assert!(artists["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a["id"] == json!(artist_id.clone())));

    // 4. Check digit utilities
    let resp = client
        .post(
            "/gs1/check-digit",
            json!({ "body": "400638133393", "kind": "gtin-13" }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["check_digit"], json!(1));
    assert_eq!(body["complete"], json!("4006381333931"));

    let resp = client
        .post("/gs1/validate", json!({ "code": "036000291452" }))
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["valid"], json!(true));

    // 5. Licensing dashboard counts the new license
    let resp = client
        .post(
            "/licenses",
            json!({
                "licensee": "Integration Films",
                "work_title": "Integration LP",
                "artist_id": artist_id,
                "kind": "sync",
                "status": "active"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client.get("/licenses/dashboard").await.unwrap();
    assert_eq!(resp.status(), 200);
    let dashboard: Value = resp.json().await.unwrap();
    assert!(dashboard["total"].as_u64().unwrap() >= 1);

    // An absurd expiry window is rejected rather than computed
    let resp = client
        .get("/licenses/dashboard?expiring_within=9223372036854775807")
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    // 6. Payments and royalty reporting
    let resp = client
        .post(
            "/payments",
            json!({
                "artist_id": artist_id,
                "amount_cents": 12345,
                "currency": "EUR",
                "period": "2025-07",
                "kind": "royalty"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let payment: Value = resp.json().await.unwrap();
    assert_eq!(payment["status"], json!("pending"));

    let resp = client
        .get(&format!("/artists/{}/royalties", artist_id))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let summary: Value = resp.json().await.unwrap();
    assert_eq!(summary["outstanding_cents"], json!(12345));

    let resp = client
        .get(&format!("/artists/{}/statement", artist_id))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // 7. Auth boundaries: deletes need a token, and an admin one at that
    let anonymous = TestClient::new(client.base_url.clone());
    let resp = anonymous
        .delete(&format!("/products/{}", product_id))
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let member_email = format!("it-member-{}@label.example", suffix);
    let resp = client
        .post(
            "/auth/register",
            json!({
                "email": member_email,
                "display_name": "Integration Member",
                "password": "integration-pass"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(
            "/auth/login",
            json!({ "email": member_email, "password": "integration-pass" }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let member_login: Value = resp.json().await.unwrap();
    let mut member = TestClient::new(client.base_url.clone());
    member.token = Some(member_login["token"].as_str().unwrap().to_string());

    let resp = member
        .delete(&format!("/products/{}", product_id))
        .await
        .unwrap();
    assert_eq!(resp.status(), 403, "member accounts must not delete");

    let resp = client.get("/partners/ddex/parties").await.unwrap();
    assert_eq!(resp.status(), 501);

    // 8. Passkey enrollment round trip
    let resp = client.post("/auth/passkeys/begin", json!({})).await.unwrap();
    assert_eq!(resp.status(), 200);
    let challenge: Value = resp.json().await.unwrap();

    let resp = client
        .post(
            "/auth/passkeys/complete",
            json!({
                "challenge": challenge["challenge"],
                "credential_id": "cred-it-1",
                "public_key": "a1b2c3d4",
                "label": "Integration key"
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client.get("/auth/passkeys").await.unwrap();
    let passkeys: Value = resp.json().await.unwrap();
    assert!(passkeys["total"].as_u64().unwrap() >= 1);

    // 9. Admin cleanup path
    let resp = client
        .patch(
            &format!("/artists/{}", artist_id),
            json!({ "status": "inactive" }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .delete(&format!("/products/{}", product_id))
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    // 10. Logout invalidates the session
    let resp = client.post("/auth/logout", json!({})).await.unwrap();
    assert_eq!(resp.status(), 204);
    let resp = client.get("/auth/me").await.unwrap();
    assert_eq!(resp.status(), 401);
}

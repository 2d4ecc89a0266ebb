//! End-to-end tests for the meal pages, driven over a real listener.

use mealtrack::db::{init_db, MealRepository};
use mealtrack::models::MealDraft;
use mealtrack::web::{app, AppState};
use tempfile::TempDir;

struct TestApp {
    base_url: String,
    repo: MealRepository,
    _temp_dir: TempDir, // Keep alive for duration of test
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn spawn_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_db(&temp_dir.path().join("test.db")).await.unwrap();
    let repo = MealRepository::new(pool);

    let state = AppState { repo: repo.clone() };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{}", addr),
        repo,
        _temp_dir: temp_dir,
    }
}

/// Client that does not follow redirects, so 302 responses stay visible.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_page_shows_meal() {
    let app = spawn_app().await;
    app.repo.create(&MealDraft::new("Apple", 95)).await.unwrap();

    let response = client().get(app.url("/")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Apple"));
}

#[tokio::test]
async fn test_detail_page_shows_meal() {
    let app = spawn_app().await;
    let meal = app.repo.create(&MealDraft::new("Apple", 95)).await.unwrap();

    let response = client()
        .get(app.url(&format!("/meal/{}/", meal.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Apple"));
    assert!(body.contains("95 kcal"));
}

#[tokio::test]
async fn test_detail_page_unknown_id_is_404() {
    let app = spawn_app().await;

    let response = client().get(app.url("/meal/999/")).send().await.unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_create_meal_redirects_and_persists() {
    let app = spawn_app().await;
    app.repo.create(&MealDraft::new("Apple", 95)).await.unwrap();

    let response = client()
        .post(app.url("/create/"))
        .form(&[("name", "Banana"), ("calories", "110")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 302);
    assert_eq!(response.headers()["location"], "/");
    assert_eq!(app.repo.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_form_renders_empty() {
    let app = spawn_app().await;

    let response = client().get(app.url("/create/")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("name=\"calories\""));
}

#[tokio::test]
async fn test_create_with_invalid_fields_rerenders_form() {
    let app = spawn_app().await;

    let response = client()
        .post(app.url("/create/"))
        .form(&[("name", ""), ("calories", "-5")])
        .send()
        .await
        .unwrap();

    // Form errors come back on the page itself, not as a redirect
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("This field is required."));
    assert!(app.repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_non_numeric_calories_rerenders_form() {
    let app = spawn_app().await;

    let response = client()
        .post(app.url("/create/"))
        .form(&[("name", "Apple"), ("calories", "lots")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Enter a whole number."));
    // Submitted values survive the round trip
    assert!(body.contains("value=\"Apple\""));
    assert!(app.repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_meal_redirects_and_updates() {
    let app = spawn_app().await;
    let meal = app.repo.create(&MealDraft::new("Apple", 95)).await.unwrap();

    let response = client()
        .post(app.url(&format!("/edit/{}/", meal.id)))
        .form(&[("name", "Red Apple"), ("calories", "100")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 302);
    let updated = app.repo.get(meal.id).await.unwrap();
    assert_eq!(updated.name, "Red Apple");
    assert_eq!(updated.calories, 100);
    assert_eq!(updated.created_at, meal.created_at);
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let app = spawn_app().await;
    let meal = app.repo.create(&MealDraft::new("Apple", 95)).await.unwrap();

    let response = client()
        .get(app.url(&format!("/edit/{}/", meal.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("value=\"Apple\""));
    assert!(body.contains("value=\"95\""));
}

#[tokio::test]
async fn test_edit_unknown_id_is_404() {
    let app = spawn_app().await;

    let response = client()
        .post(app.url("/edit/999/"))
        .form(&[("name", "Apple"), ("calories", "95")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_edit_unknown_id_with_invalid_fields_is_404() {
    let app = spawn_app().await;

    // The missing id wins over the field errors
    let response = client()
        .post(app.url("/edit/999/"))
        .form(&[("name", ""), ("calories", "-5")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_edit_unknown_id_with_non_numeric_calories_is_404() {
    let app = spawn_app().await;

    let response = client()
        .post(app.url("/edit/999/"))
        .form(&[("name", "Apple"), ("calories", "lots")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_delete_meal_redirects_and_removes() {
    let app = spawn_app().await;
    let meal = app.repo.create(&MealDraft::new("Apple", 95)).await.unwrap();

    let response = client()
        .post(app.url(&format!("/delete/{}/", meal.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 302);
    assert!(app.repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_confirmation_page() {
    let app = spawn_app().await;
    let meal = app.repo.create(&MealDraft::new("Apple", 95)).await.unwrap();

    let response = client()
        .get(app.url(&format!("/delete/{}/", meal.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Apple - 95 kcal"));
    // Still there until the POST
    assert_eq!(app.repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_id_is_404() {
    let app = spawn_app().await;

    let response = client().post(app.url("/delete/999/")).send().await.unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = spawn_app().await;

    let response = client().get(app.url("/health")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(body["status"], "ok");
}

//! The five request handlers: list, detail, create, update, delete.
//!
//! Each handler is a plain function over the shared [`AppState`]; all
//! persistence goes through the repository, and every successful write
//! answers with a 302 redirect back to the list page so a browser
//! refresh cannot resubmit the form.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::db::{MealRepository, RepoError};
use crate::models::{FieldError, MealDraft};

use super::views;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: MealRepository,
}

/// Form fields accepted by the create and edit pages.
///
/// Calories is kept as text so a non-numeric submission becomes an
/// inline field error instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub calories: String,
}

impl MealForm {
    fn parse(&self) -> Result<MealDraft, Vec<FieldError>> {
        match self.calories.trim().parse::<i64>() {
            Ok(calories) => Ok(MealDraft::new(self.name.clone(), calories)),
            Err(_) => Err(vec![FieldError::new("calories", "Enter a whole number.")]),
        }
    }

    fn from_meal(meal: &crate::models::Meal) -> Self {
        Self {
            name: meal.name.clone(),
            calories: meal.calories.to_string(),
        }
    }
}

// --- handlers ---

/// GET / — all meals.
pub async fn list_meals(State(state): State<AppState>) -> Response {
    match state.repo.list().await {
        Ok(meals) => Html(views::list_page(&meals)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// GET /meal/{id}/ — a single meal.
pub async fn meal_detail(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.repo.get(id).await {
        Ok(meal) => Html(views::detail_page(&meal)).into_response(),
        Err(RepoError::NotFound) => not_found(),
        Err(err) => storage_error(err),
    }
}

/// GET /create/ — empty form.
pub async fn create_form() -> Html<String> {
    Html(views::form_page(
        "Add meal",
        "/create/",
        &MealForm::default(),
        &[],
    ))
}

/// POST /create/ — persist a new meal, or re-render the form with
/// field errors.
pub async fn create_meal(State(state): State<AppState>, Form(form): Form<MealForm>) -> Response {
    let draft = match form.parse() {
        Ok(draft) => draft,
        Err(errors) => return create_form_with_errors(&form, &errors),
    };

    match state.repo.create(&draft).await {
        Ok(meal) => {
            tracing::info!(id = meal.id, "created meal");
            redirect_to_list()
        }
        Err(RepoError::Validation(errors)) => create_form_with_errors(&form, &errors),
        Err(err) => storage_error(err),
    }
}

/// GET /edit/{id}/ — form prefilled with the stored values.
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.repo.get(id).await {
        Ok(meal) => Html(views::form_page(
            "Edit meal",
            &format!("/edit/{}/", id),
            &MealForm::from_meal(&meal),
            &[],
        ))
        .into_response(),
        Err(RepoError::NotFound) => not_found(),
        Err(err) => storage_error(err),
    }
}

/// POST /edit/{id}/ — overwrite name and calories.
pub async fn edit_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<MealForm>,
) -> Response {
    // Resolve the id before looking at the form; an unknown meal is
    // 404 regardless of what was submitted.
    match state.repo.get(id).await {
        Ok(_) => {}
        Err(RepoError::NotFound) => return not_found(),
        Err(err) => return storage_error(err),
    }

    let draft = match form.parse() {
        Ok(draft) => draft,
        Err(errors) => return edit_form_with_errors(id, &form, &errors),
    };

    match state.repo.update(id, &draft).await {
        Ok(meal) => {
            tracing::info!(id = meal.id, "updated meal");
            redirect_to_list()
        }
        Err(RepoError::NotFound) => not_found(),
        Err(RepoError::Validation(errors)) => edit_form_with_errors(id, &form, &errors),
        Err(err) => storage_error(err),
    }
}

/// GET /delete/{id}/ — confirmation page.
pub async fn delete_confirm(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.repo.get(id).await {
        Ok(meal) => Html(views::confirm_delete_page(&meal)).into_response(),
        Err(RepoError::NotFound) => not_found(),
        Err(err) => storage_error(err),
    }
}

/// POST /delete/{id}/ — remove the meal.
pub async fn delete_meal(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.repo.delete(id).await {
        Ok(()) => {
            tracing::info!(id, "deleted meal");
            redirect_to_list()
        }
        Err(RepoError::NotFound) => not_found(),
        Err(err) => storage_error(err),
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// --- response helpers ---

fn create_form_with_errors(form: &MealForm, errors: &[FieldError]) -> Response {
    Html(views::form_page("Add meal", "/create/", form, errors)).into_response()
}

fn edit_form_with_errors(id: i64, form: &MealForm, errors: &[FieldError]) -> Response {
    Html(views::form_page(
        "Edit meal",
        &format!("/edit/{}/", id),
        form,
        errors,
    ))
    .into_response()
}

/// Plain 302 back to the list page. `Redirect::to` would answer 303;
/// the pages rely on classic found semantics.
fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
}

fn storage_error(err: RepoError) -> Response {
    tracing::error!(error = %err, "storage operation failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
}

//! Inline HTML rendering for the meal pages.
//!
//! The pages are deliberately plain: a shared shell around each page
//! body, no stylesheets or client-side assets. User-supplied text is
//! escaped before it reaches the page.

use crate::models::{FieldError, Meal};

use super::handlers::MealForm;

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared page shell. `title` is escaped by the caller where needed.
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title} - Mealtrack</title></head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>"#
    )
}

pub fn list_page(meals: &[Meal]) -> String {
    let mut body = String::new();

    if meals.is_empty() {
        body.push_str("<p>No meals logged yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for meal in meals {
            body.push_str(&format!(
                "<li><a href=\"/meal/{id}/\">{label}</a> \
                 <a href=\"/edit/{id}/\">edit</a> \
                 <a href=\"/delete/{id}/\">delete</a></li>\n",
                id = meal.id,
                label = escape(&meal.to_string()),
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<p><a href=\"/create/\">Add meal</a></p>");
    page("Meals", &body)
}

pub fn detail_page(meal: &Meal) -> String {
    let body = format!(
        "<dl>\n\
         <dt>Name</dt><dd>{name}</dd>\n\
         <dt>Calories</dt><dd>{calories} kcal</dd>\n\
         <dt>Logged</dt><dd>{date}</dd>\n\
         </dl>\n\
         <p><a href=\"/edit/{id}/\">Edit</a> \
         <a href=\"/delete/{id}/\">Delete</a> \
         <a href=\"/\">Back to list</a></p>",
        name = escape(&meal.name),
        calories = meal.calories,
        date = meal.created_at,
        id = meal.id,
    );
    page(&escape(&meal.name), &body)
}

/// Create/edit form. `errors` are rendered inline next to their field.
pub fn form_page(title: &str, action: &str, form: &MealForm, errors: &[FieldError]) -> String {
    let field_errors = |field: &str| -> String {
        errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| format!("<p class=\"error\">{}</p>\n", escape(&e.message)))
            .collect()
    };

    let body = format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <p><label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label></p>\n\
         {name_errors}\
         <p><label>Calories <input type=\"text\" name=\"calories\" value=\"{calories}\"></label></p>\n\
         {calories_errors}\
         <p><button type=\"submit\">Save</button> <a href=\"/\">Cancel</a></p>\n\
         </form>",
        action = escape(action),
        name = escape(&form.name),
        name_errors = field_errors("name"),
        calories = escape(&form.calories),
        calories_errors = field_errors("calories"),
    );
    page(title, &body)
}

/// Delete confirmation. The actual delete only happens on POST.
pub fn confirm_delete_page(meal: &Meal) -> String {
    let body = format!(
        "<p>Delete \"{label}\"?</p>\n\
         <form method=\"post\" action=\"/delete/{id}/\">\n\
         <button type=\"submit\">Confirm</button> <a href=\"/\">Cancel</a>\n\
         </form>",
        label = escape(&meal.to_string()),
        id = meal.id,
    );
    page("Delete meal", &body)
}

pub fn not_found_page() -> String {
    page("Not found", "<p>No meal exists with that id.</p>")
}

pub fn error_page() -> String {
    page("Server error", "<p>Something went wrong. Try again later.</p>")
}

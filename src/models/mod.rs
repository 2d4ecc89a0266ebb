mod meal;

pub use meal::{FieldError, Meal, MealDraft, MAX_NAME_LEN};

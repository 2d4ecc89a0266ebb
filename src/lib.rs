//! Mealtrack: a minimal calorie-logging web application.
//!
//! A single entity (a meal with a name, calorie count, and creation
//! date) served through list, detail, create, edit, and delete pages.
//!
//! - [`models`]: the meal record and its field constraints
//! - [`db`]: SQLite pool setup and the meal repository
//! - [`web`]: router, handlers, and inline page rendering
//! - [`config`]: file/env configuration

pub mod config;
pub mod db;
pub mod models;
pub mod web;

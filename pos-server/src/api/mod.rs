//! HTTP API
//!
//! One module per resource, each exposing `router()`:
//!
//! - [`health`] - liveness and database check (public)
//! - [`auth`] - login, current user, token refresh, password change
//! - [`categories`] / [`menus`] - catalog
//! - [`zones`] / [`tables`] - seating
//! - [`orders`] / [`order_items`] / [`bills`] - order and payment workflow
//! - [`cashiers`] - user management (admin)
//! - [`dashboard`] - sales overview

pub mod auth;
pub mod health;

// Catalog
pub mod categories;
pub mod menus;

// Seating
pub mod tables;
pub mod zones;

// Orders and payment
pub mod bills;
pub mod order_items;
pub mod orders;

// Administration
pub mod cashiers;
pub mod dashboard;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

//! Bill API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::permissions::BILLS_MANAGE;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bills", routes())
}

fn routes() -> Router<ServerState> {
    // Voiding a paid bill additionally needs bills:void, checked in the handler
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission(BILLS_MANAGE)))
}

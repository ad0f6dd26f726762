//! Comanda API module
//!
//! Order-taking endpoints for waitstaff plus the admin-only order list.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let order_routes = Router::new().nest("/comandas", routes());

    let manager_routes = Router::new()
        .route("/manager/comandas", get(handler::list_all))
        .layer(middleware::from_fn(require_admin));

    order_routes.merge(manager_routes)
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::order_screen))
        .route("/mesa/{id}", get(handler::mesa_view))
        .route("/agregar_item", post(handler::agregar_item))
        .route("/mesa/{id}/finalizar", post(handler::finalizar))
}

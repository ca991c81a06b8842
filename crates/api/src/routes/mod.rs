//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod admin;
pub mod estimate;
pub mod health;
pub mod inquiries;

/// Creates the API router with public and admin routes.
///
/// Admin routes sit behind the JWT middleware; everything else is public.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .merge(admin::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(inquiries::routes())
        .merge(estimate::routes())
        .merge(admin_routes)
}

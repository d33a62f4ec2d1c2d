use utoipa_axum::router::OpenApiRouter;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(handlers::blog::routes())
        .merge(handlers::user::routes())
        .merge(handlers::login::routes())
}

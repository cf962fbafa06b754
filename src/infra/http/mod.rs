mod admin;
pub mod error;
mod middleware;
mod public;

pub use error::ApiError;
pub use middleware::{RequestContext, log_responses, set_request_context};

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::admin::careers::CareersService;
use crate::application::admin::categories::AdminCategoriesService;
use crate::application::admin::inbox::InboxService;
use crate::application::admin::products::AdminProductsService;
use crate::application::admin::statistics::AdminStatisticsService;
use crate::application::admin::testimonials::AdminTestimonialsService;
use crate::application::error::ErrorReport;
use crate::application::reads::CachedReads;
use crate::cache::{ResponseCacheState, response_cache_layer};
use crate::infra::db::PostgresRepositories;

#[derive(Clone)]
pub struct AppState {
    pub reads: CachedReads,
    pub products: AdminProductsService,
    pub categories: AdminCategoriesService,
    pub careers: CareersService,
    pub testimonials: AdminTestimonialsService,
    pub statistics: AdminStatisticsService,
    pub inbox: InboxService,
    pub repos: PostgresRepositories,
}

pub fn build_router(state: AppState, cache: ResponseCacheState) -> Router {
    // Only the public read pages go through the response cache; form
    // submissions and the admin API always hit their handlers.
    let public_pages = Router::new()
        .route("/", get(public::home))
        .route("/products", get(public::products_index))
        .route("/products/{category_id}", get(public::products_for_category))
        .route("/about", get(public::about))
        .route("/careers", get(public::careers))
        .layer(axum::middleware::from_fn_with_state(
            cache,
            response_cache_layer,
        ));

    Router::new()
        .merge(public_pages)
        .route("/contact", post(public::submit_contact))
        .route("/careers/{job_id}/apply", post(public::submit_application))
        .nest("/api/admin", admin::router())
        .route("/healthz", get(health))
        .layer(axum::middleware::from_fn(log_responses))
        .layer(axum::middleware::from_fn(set_request_context))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Response {
    match state.repos.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error("infra::http::health", StatusCode::SERVICE_UNAVAILABLE, &err)
                .attach(&mut response);
            response
        }
    }
}

//! Admin mutation surface under `/api/admin`.
//!
//! All mutation endpoints return the full created/updated record so the
//! admin UI can reconcile its list snapshot from the response instead of
//! refetching.

mod careers;
mod categories;
mod inbox;
mod products;
mod statistics;
mod testimonials;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::list).post(products::create),
        )
        .route("/products/reorder", post(products::reorder))
        .route(
            "/products/{id}",
            put(products::update)
                .patch(products::set_active)
                .delete(products::delete),
        )
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route("/categories/reorder", post(categories::reorder))
        .route(
            "/categories/{id}",
            put(categories::update)
                .patch(categories::set_active)
                .delete(categories::delete),
        )
        .route("/jobs", get(careers::list_jobs).post(careers::create_job))
        .route("/jobs/reorder", post(careers::reorder_jobs))
        .route(
            "/jobs/{id}",
            put(careers::update_job)
                .patch(careers::set_job_open)
                .delete(careers::delete_job),
        )
        .route(
            "/testimonials",
            get(testimonials::list).post(testimonials::create),
        )
        .route("/testimonials/reorder", post(testimonials::reorder))
        .route(
            "/testimonials/{id}",
            put(testimonials::update)
                .patch(testimonials::set_published)
                .delete(testimonials::delete),
        )
        .route("/statistics", get(statistics::list))
        .route("/statistics/{id}", put(statistics::update))
        .route("/messages", get(inbox::list))
        .route(
            "/messages/{id}",
            axum::routing::patch(inbox::set_read).delete(inbox::delete),
        )
        .route("/applications", get(careers::list_applications))
        .route(
            "/applications/{id}",
            axum::routing::patch(careers::set_application_status)
                .delete(careers::delete_application),
        )
}

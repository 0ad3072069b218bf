//! OpenAPI specification generation and app factory.

use crate::{
    handlers::{
        announcements, blog_posts, contact, create_portfolio_job, get_metrics, health, members,
        monitoring_status, portfolio_job_download, portfolio_job_status, portfolio_pdf, version,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    state::AppState,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the gateway
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Infra Site Gateway".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Server-side gateway between the study site and its content backend.\n\n\
                ## Response envelope\n\
                JSON routes answer `{ success, data?, message? }`. Backend timeouts map to 504, \
                backend error statuses are propagated with the backend's message, and any other \
                failure maps to 500 with a generic message.\n\
                \n\
                ## Undocumented body routes\n\
                - `POST /api/contact`: `{ name, email, message }`. Limited to 5 submissions per \
                sender email (or client IP) per hour; the limit answers 429 with `Retry-After`.\n\
                - `POST /api/members/{identifier}/portfolio/pdf/jobs`: optional JSON options, \
                relayed to the backend; the job envelope is returned verbatim."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Routes that read a request body. They are mounted on the plain actix
/// app because paperclip needs a schema for every extractor.
fn configure_body_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.route("/api/contact", actix_web::web::post().to(contact))
        .route(
            "/api/members/{identifier}/portfolio/pdf/jobs",
            actix_web::web::post().to(create_portfolio_job),
        );
}

/// Build the gateway application around shared state.
///
/// The state is created once by the caller and cloned into each worker.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let metrics = state.metrics.clone();

    App::new()
        .wrap(MetricsMiddleware::new(metrics))
        .wrap(RequestIdMiddleware)
        .app_data(actix_web::web::Data::new(state))
        .configure(configure_body_routes)
        .wrap_api_with_spec(create_openapi_spec())
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(web::resource("/api/announcements").route(web::get().to(announcements)))
        .service(web::resource("/api/blog/posts").route(web::get().to(blog_posts)))
        .service(web::resource("/api/members").route(web::get().to(members)))
        .service(web::resource("/api/monitoring/status").route(web::get().to(monitoring_status)))
        .service(
            web::resource("/api/members/{identifier}/portfolio/pdf")
                .route(web::get().to(portfolio_pdf)),
        )
        .service(
            web::resource("/api/members/{identifier}/portfolio/pdf/jobs/{job_id}")
                .route(web::get().to(portfolio_job_status)),
        )
        .service(
            web::resource("/api/members/{identifier}/portfolio/pdf/jobs/{job_id}/download")
                .route(web::get().to(portfolio_job_download)),
        )
        .with_json_spec_at("/api/spec/v2")
        .build()
}

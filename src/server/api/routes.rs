//! A central place to register App routes.
use crate::server::api::state::App as AppState;
use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web, App, Error,
};

use super::posts::{action, index, loader, method_not_allowed, not_found, request, view};

/// Central place to register all the App routing.
///
/// `/` serves the page for reads and dispatches every other method to the
/// mutation handler, which rejects the methods it does not know.
///
/// # Errors
/// Errors if the page template cannot be compiled.
#[tracing::instrument(skip(app, state))]
pub fn register_app<
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    app: App<V>,
    state: &AppState,
) -> anyhow::Result<App<V>> {
    let templates = view::templates()?;
    let app = app
        .app_data(web::Data::new(state.clone()))
        .app_data(web::Data::new(templates))
        .app_data(web::FormConfig::default().limit(request::FORM_LIMIT))
        .service(
            web::scope("/_api").service(
                web::resource("/posts")
                    .route(web::get().to(loader))
                    .route(web::head().to(loader))
                    .default_service(web::to(method_not_allowed)),
            ),
        )
        .service(
            web::resource("/")
                .route(web::get().to(index))
                .route(web::head().to(index))
                .route(web::post().to(action))
                .route(web::delete().to(action))
                .default_service(web::to(action)),
        )
        .default_service(web::to(not_found));
    Ok(app)
}

//! Serve the posts page.
#![allow(
    clippy::exit,
    clippy::module_name_repetitions
)]
use crate::config::Env;
use crate::db;
use crate::server::api::state::App as AppState;
use crate::server::tracing::PostboardRootSpanBuilder;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer};

use std::{io, process};

use actix_http::body::MessageBody;
use actix_service::ServiceFactory;
use tracing_actix_web::TracingLogger;

use crate::server::api::routes;

/// Serve the posts page and API.
#[actix_web::main]
pub async fn serve(env: Env, bind: &str, port: u16) -> io::Result<()> {
    tracing::info!("Running postboard on http://{bind}:{port}.");

    let db = match db::init::connect(&env).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(
                "error: could not connect to database. Confirm that DATABASE_URL env var is set correctly."
            );
            tracing::error!("Error: {:?}", err);
            process::exit(1);
        }
    };
    let state = AppState { db, env };

    HttpServer::new(move || {
        init_app(&state).unwrap_or_else(|err| {
            tracing::error!("Unable to initialize app.");
            tracing::error!("Error: {:?}", err);
            process::exit(1);
        })
    })
    .bind((bind, port))?
    .run()
    .await
}

/// Initialize the application and all routing at start-up time.
///
/// # Arguments
/// * `state` - The application state
/// # Errors
/// Will error if unable to initialize the application, e.g. if the page
/// template does not parse.
pub fn init_app(
    state: &AppState,
) -> anyhow::Result<
    App<
        impl ServiceFactory<
            ServiceRequest,
            Response = ServiceResponse<impl MessageBody>,
            Config = (),
            InitError = (),
            Error = Error,
        >,
    >,
> {
    let app = routes::register_app(App::new(), state)?;
    Ok(app.wrap(TracingLogger::<PostboardRootSpanBuilder>::new()))
}

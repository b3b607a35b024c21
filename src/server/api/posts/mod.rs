//! Handlers for the posts page, its JSON loader and its form actions.
use actix_multipart::Multipart;
use actix_web::{
    http::{
        header::{self, Accept, Header as _},
        Method, StatusCode,
    },
    web, HttpRequest, HttpResponse, Responder,
};
use tera::Tera;

use crate::{
    posts::{self, form::PayloadError, ActionData, Error, Intent},
    server::errors::HTTPError,
};

use self::request::UrlencodedForm;
use super::state::{App as AppState, Global as _};

/// Module that reads form bodies.
pub mod request;
/// Module that renders the home page.
pub mod view;

/// Methods accepted on `/`.
const ALLOWED_METHODS: &str = "GET, HEAD, POST, DELETE";
/// Methods accepted on `/_api/posts`.
const LOADER_METHODS: &str = "GET, HEAD";

/// Home page.
#[tracing::instrument(skip(data, templates))]
pub async fn index(data: web::Data<AppState>, templates: web::Data<Tera>) -> impl Responder {
    let loader_data = match posts::list(data.db(), data.env()).await {
        Ok(loader_data) => loader_data,
        Err(err) => {
            tracing::error!("Unable to list posts: {err:?}");
            return HttpResponse::InternalServerError()
                .body(HTTPError::InternalServerError.to_string());
        }
    };
    render_page(&templates, &loader_data, None, StatusCode::OK)
}

/// JSON view of the data behind the home page.
#[tracing::instrument(skip(data))]
pub async fn loader(data: web::Data<AppState>) -> impl Responder {
    match posts::list(data.db(), data.env()).await {
        Ok(loader_data) => HttpResponse::Ok().json(loader_data),
        Err(err) => {
            tracing::error!("Unable to list posts: {err:?}");
            HttpResponse::InternalServerError().body(HTTPError::InternalServerError.to_string())
        }
    }
}

/// Create or delete a post, depending on the request method.
///
/// Browsers (requests preferring `text/html`) are redirected back to the
/// page on success and shown the page with the error otherwise. Everything
/// else gets an [`ActionData`] as JSON.
///
/// `form` has to come before `multipart`: see [`request::read_fields`].
#[tracing::instrument(skip(req, data, templates, form, multipart), fields(method = %req.method()))]
pub async fn action(
    req: HttpRequest,
    data: web::Data<AppState>,
    templates: web::Data<Tera>,
    form: UrlencodedForm,
    multipart: Multipart,
) -> HttpResponse {
    let outcome = match request::read_fields(&req, form, multipart).await {
        Ok(fields) => posts::mutate(data.db(), req.method(), &fields).await,
        Err(payload_err) => rejected_body(req.method(), payload_err),
    };
    let wants_html = prefers_html(&req);

    match outcome {
        Ok(intent) => {
            tracing::debug!(?intent, "Applied mutation");
            if wants_html {
                HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, "/"))
                    .finish()
            } else {
                HttpResponse::Ok().json(ActionData::ok())
            }
        }
        Err(err) => {
            let status = status_for(&err);
            match err {
                Error::Store(ref store_err) => {
                    tracing::error!("Store rejected mutation: {store_err:?}");
                }
                Error::Validation(ref form_err) => tracing::debug!("Rejected form: {form_err}"),
                Error::UnsupportedMethod(_) | Error::Payload(_) => tracing::debug!("{err}"),
            }
            let body = ActionData::from(&err);
            if wants_html {
                action_page(&data, &templates, &body, status).await
            } else {
                let mut response = HttpResponse::build(status);
                if status == StatusCode::METHOD_NOT_ALLOWED {
                    response.insert_header((header::ALLOW, ALLOWED_METHODS));
                }
                response.json(body)
            }
        }
    }
}

/// Outcome of a request whose body could not be read.
///
/// An unsupported method is still reported as such, whatever the body.
fn rejected_body(method: &Method, err: PayloadError) -> Result<Intent, Error> {
    Intent::from_method(method)?;
    Err(Error::Payload(err))
}

/// Fallback for `/_api/posts` hit with anything but a read.
pub async fn method_not_allowed(req: HttpRequest) -> impl Responder {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, LOADER_METHODS))
        .json(ActionData::from(&Error::UnsupportedMethod(
            req.method().to_string(),
        )))
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().body(HTTPError::NotFound.to_string())
}

/// HTTP status matching a failed mutation.
#[must_use]
pub fn status_for(err: &Error) -> StatusCode {
    match *err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
        Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::Payload(PayloadError::TooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
        Error::Payload(PayloadError::UnsupportedType(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Error::Payload(PayloadError::Unreadable) => StatusCode::BAD_REQUEST,
    }
}

/// Whether the client ranks `text/html` first.
fn prefers_html(req: &HttpRequest) -> bool {
    Accept::parse(req).is_ok_and(|accept| {
        let preferred = accept.preference();
        preferred.type_() == mime::TEXT && preferred.subtype() == mime::HTML
    })
}

/// Re-render the page with the error of a failed mutation.
async fn action_page(
    data: &AppState,
    templates: &Tera,
    body: &ActionData,
    status: StatusCode,
) -> HttpResponse {
    match posts::list(data.db(), data.env()).await {
        Ok(loader_data) => render_page(templates, &loader_data, body.error.as_deref(), status),
        Err(err) => {
            tracing::error!("Unable to list posts: {err:?}");
            HttpResponse::InternalServerError().body(HTTPError::InternalServerError.to_string())
        }
    }
}

/// Render the page, falling back to a plain 500 if the template fails.
fn render_page(
    templates: &Tera,
    loader_data: &posts::LoaderData,
    error: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    match view::render_index(templates, loader_data, error) {
        Ok(body) => HttpResponse::build(status)
            .content_type(mime::TEXT_HTML_UTF_8)
            .body(body),
        Err(err) => {
            tracing::error!("Unable to render page: {err:?}");
            HttpResponse::InternalServerError().body(HTTPError::InternalServerError.to_string())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::posts::form::FormError;

    #[test]
    fn test_status_for_expect_status_per_error() {
        assert_eq!(
            status_for(&Error::Validation(FormError::Missing("title"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&Error::UnsupportedMethod("PUT".to_owned())),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            status_for(&Error::Store(anyhow::anyhow!("gone"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&Error::Payload(PayloadError::TooLarge)),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status_for(&Error::Payload(PayloadError::UnsupportedType(
                "application/json".to_owned()
            ))),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            status_for(&Error::Payload(PayloadError::Unreadable)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_rejected_body_when_put_expect_unsupported_method() {
        let actual = rejected_body(&Method::PUT, PayloadError::Unreadable);
        assert!(matches!(actual, Err(Error::UnsupportedMethod(_))));
        let actual = rejected_body(&Method::POST, PayloadError::TooLarge);
        assert!(matches!(
            actual,
            Err(Error::Payload(PayloadError::TooLarge))
        ));
    }

    #[test]
    fn test_prefers_html_when_browser_accept_expect_true() {
        let req = actix_web::test::TestRequest::default()
            .insert_header((
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ))
            .to_http_request();
        assert!(prefers_html(&req));
    }

    #[test]
    fn test_prefers_html_when_json_or_missing_expect_false() {
        let req = actix_web::test::TestRequest::default()
            .insert_header((header::ACCEPT, "application/json"))
            .to_http_request();
        assert!(!prefers_html(&req));
        let req = actix_web::test::TestRequest::default().to_http_request();
        assert!(!prefers_html(&req));
    }
}

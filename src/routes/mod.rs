pub mod admin;
pub mod auth;
pub mod health;
pub mod todos;
pub mod users;

use actix_web::{error, web, HttpRequest};

use crate::error::AppError;

/// Registers every `/api/v1` route. Protected handlers take an `AuthenticatedUser`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::refresh),
    )
    .service(
        web::scope("/todos")
            .service(todos::list_todos)
            .service(todos::create_todo)
            .service(todos::get_todo)
            .service(todos::update_todo)
            .service(todos::delete_todo),
    )
    .service(
        web::scope("/admin")
            .service(admin::list_all_todos)
            .service(admin::list_all_users),
    )
    .service(
        web::scope("/users")
            .service(users::get_me)
            .service(users::update_me)
            .service(users::delete_me),
    );
}

/// Body, query and path extraction failures are reported as `INVALID_REQUEST`
/// envelopes instead of actix's plain-text defaults.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidRequest(err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidRequest(err.to_string()).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected path parameter: {}", err);
    AppError::InvalidRequest("Invalid ID".into()).into()
}

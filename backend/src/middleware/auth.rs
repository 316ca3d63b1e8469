//! Session guard for protected routes.
//!
//! [`RequireSession`] lets a request through when its path is on the public
//! allow-list or its cookie session carries a user id. Anything else is
//! answered with `401` and the standard error body before a handler runs.
//! It must sit inside the session middleware so the cookie is already
//! decoded.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::Error;
use actix_web::ResponseError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::Error as DomainError;
use crate::inbound::http::session::USER_ID_KEY;

/// Paths reachable without signing in.
enum PublicPath {
    Exact(&'static str),
    Prefix(&'static str),
}

const PUBLIC_PATHS: &[PublicPath] = &[
    PublicPath::Exact("/"),
    PublicPath::Prefix("/health/"),
    PublicPath::Prefix("/docs"),
    PublicPath::Prefix("/api-docs/"),
    PublicPath::Exact("/api/v1/auth/sign-in"),
    PublicPath::Exact("/api/v1/auth/sign-up"),
    PublicPath::Exact("/api/v1/webhooks/payments"),
];

/// Whether `path` is on the public allow-list.
///
/// # Examples
/// ```
/// use commons::middleware::auth::is_public_path;
///
/// assert!(is_public_path("/health/ready"));
/// assert!(is_public_path("/api/v1/auth/sign-in"));
/// assert!(!is_public_path("/api/v1/communities"));
/// ```
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| match public {
        PublicPath::Exact(exact) => path == *exact,
        PublicPath::Prefix(prefix) => path.starts_with(prefix),
    })
}

/// Middleware rejecting unauthenticated requests to non-public routes.
///
/// # Examples
/// ```
/// use actix_session::{SessionMiddleware, storage::CookieSessionStore};
/// use actix_web::{App, cookie::Key};
/// use commons::middleware::RequireSession;
///
/// let app = App::new()
///     .wrap(RequireSession)
///     .wrap(SessionMiddleware::new(CookieSessionStore::default(), Key::generate()));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

fn has_user(req: &ServiceRequest) -> bool {
    match req.get_session().get::<String>(USER_ID_KEY) {
        Ok(Some(_)) => true,
        Ok(None) => false,
        Err(error) => {
            debug!(%error, "unreadable session treated as signed out");
            false
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_path(req.path()) || has_user(&req) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        debug!(path = %req.path(), "rejected request without a session");
        let response = DomainError::unauthorized("login required").error_response();
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}

//! Session gate
//!
//! `SessionMiddleware` wraps the whole app and attaches a [`SessionUser`] to
//! any request carrying a valid session token. It never rejects on its own:
//! routes opt into the gate by taking `SessionUser` as an argument, which
//! fails extraction with 401 before the handler body runs.

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::JwtService;
use crate::types::ApiError;

/// Cookie name read when no `Authorization` header is present
pub const SESSION_COOKIE: &str = "session";

/// Identity established by the session gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
}

impl FromRequest for SessionUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.extensions().get::<SessionUser>().copied();
        ready(session.ok_or_else(|| {
            log::debug!("no session on gated route {}", req.path());
            ApiError::Unauthorized
        }))
    }
}

/// Extract the raw session token from a request
fn session_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
}

pub struct SessionMiddleware {
    jwt_service: JwtService,
}

impl SessionMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self {
            jwt_service,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token) = session_token(req.request()) {
            if let Ok(claims) = self.jwt_service.validate(&token) {
                req.extensions_mut().insert(SessionUser {
                    id: claims.sub,
                });
            }
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::Claims;
    use actix_web::cookie::Cookie;
    use actix_web::{test, web, App, HttpResponse};

    async fn whoami(session: SessionUser) -> HttpResponse {
        HttpResponse::Ok().body(session.id.to_string())
    }

    async fn open() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn jwt() -> JwtService {
        JwtService::new("gate_secret")
    }

    #[actix_web::test]
    async fn test_bearer_token_populates_session() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(jwt()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let token = jwt().issue(&Claims::new(12)).unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, web::Bytes::from_static(b"12"));
    }

    #[actix_web::test]
    async fn test_session_cookie_populates_session() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(jwt()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let token = jwt().issue(&Claims::new(5)).unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, web::Bytes::from_static(b"5"));
    }

    #[actix_web::test]
    async fn test_missing_or_invalid_token_is_401_on_gated_route() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(jwt()))
                .route("/whoami", web::get().to(whoami))
                .route("/open", web::get().to(open)),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let req = test::TestRequest::get().uri("/open").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::TokenIssuer;
use crate::error::AppError;
use crate::repo::UserRepo;

/// Middleware guarding protected scopes.
///
/// For every request it extracts the bearer token, verifies signature and
/// expiry, and re-fetches the claimed subject from the store, so a token for a
/// since-deleted account does not authenticate. On success the resolved
/// identity is inserted into request extensions for the handlers; on any
/// failure the request is rejected with 401 before business logic runs.
#[derive(Clone)]
pub struct AuthGuard {
    tokens: TokenIssuer,
    users: Arc<dyn UserRepo>,
}

impl AuthGuard {
    pub fn new(tokens: TokenIssuer, users: Arc<dyn UserRepo>) -> Self {
        Self { tokens, users }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
            users: self.users.clone(),
        }))
    }
}

pub struct AuthGuardService<S> {
    service: Rc<S>,
    tokens: TokenIssuer,
    users: Arc<dyn UserRepo>,
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        let tokens = self.tokens.clone();
        let users = self.users.clone();
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token =
                bearer.ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;
            let claims = tokens.verify(&token)?;

            // Resolve the claimed subject against the store rather than
            // trusting the claims: the account must still exist.
            let user = users
                .find_by_id(claims.sub)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| AppError::Unauthorized("Unknown token subject".into()))?;

            req.extensions_mut().insert(AuthenticatedUser {
                id: user.id,
                email: user.email,
            });
            service.call(req).await
        })
    }
}

use std::future::{ready, Ready};

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};

use crate::error::ApiError;
use crate::middleware::auth::Claims;

/// The admin identified by the token that [`AuthMiddleware`](super::auth::AuthMiddleware)
/// accepted for this request.
#[derive(Clone)]
pub struct AuthenticatedAdmin {
    pub admin_id: String,
}

impl FromRequest for AuthenticatedAdmin {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            ready(Ok(AuthenticatedAdmin {
                admin_id: claims.sub.clone(),
            }))
        } else {
            ready(Err(ApiError::Unauthorized("Admin not authenticated").into()))
        }
    }
}

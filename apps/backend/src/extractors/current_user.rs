//! Typed access to the authenticated identity.
//!
//! Reads the claims the authentication gate stored in request extensions.
//! Handlers take `CurrentUser` as a parameter; requesting it on a route
//! outside the gated scope yields a 401, never a panic.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::auth::claims::Claims;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();

        ready(match claims {
            Some(claims) => Ok(CurrentUser {
                id: claims.uid,
                email: claims.email,
            }),
            None => Err(AppError::unauthorized_missing_bearer()),
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::{FromRequest, HttpMessage};

    use super::CurrentUser;
    use crate::auth::claims::Claims;
    use crate::error::AppError;

    #[actix_web::test]
    async fn reads_claims_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(Claims {
            uid: 42,
            email: "user@example.test".to_string(),
            exp: 0,
        });

        let user = CurrentUser::extract(&req).await.unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.email, "user@example.test");
    }

    #[actix_web::test]
    async fn missing_claims_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = CurrentUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::UnauthorizedMissingBearer)));
    }
}

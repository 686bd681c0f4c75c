use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

use crate::auth::claims::BackendClaims;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::profiles::Profile;
use crate::services::profiles::ensure_profile;
use crate::state::app_state::AppState;

/// The caller's profile, provisioned from the token claims on first sight.
///
/// Requires `JwtExtract` to have stored `BackendClaims` in the request
/// extensions; without them the request is rejected with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Profile);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn into_profile(self) -> Profile {
        self.0
    }
}

impl Deref for CurrentUser {
    type Target = Profile;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<BackendClaims>()
                .cloned()
                .ok_or_else(AppError::unauthorized_missing_bearer)?;

            let app_state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
                AppError::internal(ErrorCode::Internal, "AppState not available")
            })?;

            let profile = with_txn(Some(&req), app_state, |txn| {
                Box::pin(async move { ensure_profile(txn, &claims).await })
            })
            .await?;

            Ok(CurrentUser(profile))
        })
    }
}

use sea_orm::ConnectionTrait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::claims::BackendClaims;
use crate::entities::profiles::UserRole;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::logging::pii::Redacted;
use crate::repos::profiles::{self, Profile, ProfileContactUpdate, ProfileCreate};

const MAX_FULL_NAME_LEN: usize = 120;
const MIN_PHONE_LEN: usize = 7;
const MAX_PHONE_LEN: usize = 20;

/// Find the caller's profile, creating it from the token claims on first use.
///
/// The stored email follows the auth provider: a mismatch overwrites it.
pub async fn ensure_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    claims: &BackendClaims,
) -> Result<Profile, AppError> {
    match profiles::find_by_id(conn, claims.sub).await? {
        Some(profile) if profile.email == claims.email => Ok(profile),
        Some(profile) => {
            info!(
                user_id = %profile.id,
                email = %Redacted(&claims.email),
                "Profile email changed at the auth provider; updating"
            );
            Ok(profiles::update_email(conn, profile.id, &claims.email).await?)
        }
        None => {
            let profile = profiles::create_profile(
                conn,
                ProfileCreate::new(claims.sub, claims.email.clone()).with_role(UserRole::User),
            )
            .await?;
            info!(
                user_id = %profile.id,
                email = %Redacted(&profile.email),
                "Provisioned profile"
            );
            Ok(profile)
        }
    }
}

/// Body of `PATCH /api/me/profile`. `null` clears a field, an absent key keeps it.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub full_name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
}

impl ProfilePatch {
    fn validate(self) -> Result<ProfileContactUpdate, DomainError> {
        let full_name = match self.full_name {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => {
                let name = raw.trim().to_string();
                if name.chars().count() > MAX_FULL_NAME_LEN {
                    return Err(invalid(format!(
                        "full_name must be at most {MAX_FULL_NAME_LEN} characters"
                    )));
                }
                Some(Some(name).filter(|n| !n.is_empty()))
            }
        };

        let phone = match self.phone {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => {
                let phone = raw.trim().to_string();
                if phone.is_empty() {
                    Some(None)
                } else {
                    if !is_phone(&phone) {
                        return Err(invalid(format!(
                            "phone must be {MIN_PHONE_LEN}-{MAX_PHONE_LEN} characters of digits, spaces, '+', '-' or parentheses"
                        )));
                    }
                    Some(Some(phone))
                }
            }
        };

        Ok(ProfileContactUpdate { full_name, phone })
    }
}

fn is_phone(s: &str) -> bool {
    let len = s.chars().count();
    (MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len)
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
        && s.chars().any(|c| c.is_ascii_digit())
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::Profile, detail)
}

pub async fn update_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    profile: &Profile,
    patch: ProfilePatch,
) -> Result<Profile, AppError> {
    let update = patch.validate()?;
    if update.full_name.is_none() && update.phone.is_none() {
        debug!(user_id = %profile.id, "Empty profile patch");
        return Ok(profile.clone());
    }
    Ok(profiles::update_contact(conn, profile.id, update).await?)
}

use crate::server::error::error_response;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::Response;

/// Header carrying the authenticated actor id, set by the external identity
/// collaborator in front of this service.
pub const ACTOR_HEADER: &str = "x-actor-id";

const MAX_ACTOR_ID_LEN: usize = 64;

/// The opaque identity of the caller, taken from [`ACTOR_HEADER`].
///
/// Session issuance and verification happen upstream; this service only
/// requires that some authenticated identity was forwarded. Requests without
/// a plausible actor id are rejected with `401`.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub String);

impl CurrentActor {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

fn plausible_actor_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ACTOR_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '@'))
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentActor {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();

        if !plausible_actor_id(id) {
            return Err(error_response(
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                format!("missing or malformed {ACTOR_HEADER} header"),
            ));
        }

        Ok(Self(id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::plausible_actor_id;

    #[test]
    fn actor_ids_are_validated() {
        assert!(plausible_actor_id("user-42"));
        assert!(plausible_actor_id("idp:user@example.com"));
        assert!(!plausible_actor_id(""));
        assert!(!plausible_actor_id("spaces are bad"));
        assert!(!plausible_actor_id(&"x".repeat(65)));
    }
}

use tide::{Request, Response, StatusCode};

use crate::db::secret_keys::SecretKeyProvider;
use lens_artistry_api_structs::ApiError;

/// `None` when no credentials were sent at all.
pub async fn validate_secret_key(req: &Request<crate::State>) -> Result<Option<bool>, sqlx::Error> {
    let auth = match req.header("Authorization") {
        Some(value) => value,
        None => return Ok(None),
    };

    match auth.last().as_str().split_once(' ') {
        Some(("Bearer", key)) => {
            let mut conn = req.state().db.acquire().await?;
            Ok(Some(conn.valid_secret_key(key).await?))
        },
        _ => Ok(Some(false)),
    }
}

pub fn error_response(status: StatusCode, error: impl ToString) -> tide::Result<Response> {
    Ok(Response::builder(status)
        .body(tide::Body::from_json(&ApiError {
            error: error.to_string(),
        })?)
        .build())
}

macro_rules! require_valid_secret_key {
    ($request:ident) => {
        use tide::Response;
        match validate_secret_key(&$request).await? {
            None => return Ok(Response::builder(tide::http::StatusCode::Unauthorized).build()),
            Some(false) => return Ok(Response::builder(tide::http::StatusCode::Forbidden).build()),
            Some(true) => {},
        }
    };
}

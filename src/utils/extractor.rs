//! Validated path parameters
//!
//! Each extractor reads one named segment from the matched route and rejects
//! the request with a 400 envelope when it is missing or malformed.

use actix_web::{
    Error, FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn reject(message: String) -> Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// Positive integer id from `name`
fn positive_id(req: &HttpRequest, name: &str) -> Result<i64, Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| reject(format!("Missing path parameter: {name}")))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(reject(format!("Invalid {name}: {raw}"))),
    }
}

macro_rules! define_safe_ids {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_ids! {
    SafeIDI64 => "id",
    SafeStudentIdI64 => "student_id",
    SafeQuestionIdI64 => "question_id",
    SafeAttemptIdI64 => "attempt_id",
}

/// Download token: 32 ASCII alphanumerics
#[derive(Debug, Clone)]
pub struct SafeFileToken(pub String);

pub const FILE_TOKEN_LEN: usize = 32;

impl FromRequest for SafeFileToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req.match_info().get("token").unwrap_or_default();
        let valid =
            token.len() == FILE_TOKEN_LEN && token.chars().all(|c| c.is_ascii_alphanumeric());
        ready(if valid {
            Ok(SafeFileToken(token.to_string()))
        } else {
            Err(reject("Invalid file token".to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_positive_id() {
        let req = TestRequest::default()
            .param("id", "42")
            .to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_rejects_zero_and_text() {
        for raw in ["0", "-3", "abc"] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err());
        }
    }

    #[actix_web::test]
    async fn test_file_token() {
        let good = "a".repeat(FILE_TOKEN_LEN);
        let req = TestRequest::default()
            .param("token", good.clone())
            .to_http_request();
        assert_eq!(SafeFileToken::extract(&req).await.unwrap().0, good);

        let req = TestRequest::default()
            .param("token", "../etc/passwd")
            .to_http_request();
        assert!(SafeFileToken::extract(&req).await.is_err());
    }
}

//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 코어를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 서비스 계층의 실패를
//! 일관된 JSON 응답으로 변환합니다.
//!
//! ## 실패 분류
//!
//! | 상황 | 변형 | 호출자에게 보이는 모습 |
//! |------|------|------------------------|
//! | 키/사용자 조회 실패 | `NotFound` | 토큰 검증에서는 익명 처리, 그 외 404 |
//! | 지원하지 않는 키 타입 | `UnsupportedKeyType` | 키 생성 시점의 치명적 오류 |
//! | 세션과 사용자 저장소 불일치 | `InconsistentState` | 권한 검사에서 전파되는 500 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn load_key(store: &dyn KeyStore, id: &str) -> Result<SigningKey, AppError> {
//!     if id.is_empty() {
//!         return Err(AppError::ValidationError("key id is required".to_string()));
//!     }
//!     store.load(id).await
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
/// 단, 토큰 검증 실패는 이 타입으로 노출되지 않고 익명 요청으로 취급됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// EC(P-256), RSA 이외의 키 타입 (500 Internal Server Error)
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// 키 자료 파싱/인코딩 실패 (500 Internal Server Error)
    #[error("Key material error: {0}")]
    KeyMaterialError(String),

    /// 인증된 세션이 가리키는 사용자 레코드가 저장소에 없음 (500 Internal Server Error)
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 서비스 계층 공통 결과 타입
pub type AppResult<T> = Result<T, AppError>;

/// 외부 크레이트 에러에 문맥을 붙여 `InternalError`로 바꾸는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("key id mismatch".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("signing key".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("no signing key".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("not a tenant member".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_key_errors_are_server_errors() {
        for error in [
            AppError::UnsupportedKeyType("oct".to_string()),
            AppError::KeyMaterialError("bad d".to_string()),
            AppError::InconsistentState("user missing".to_string()),
        ] {
            assert_eq!(
                error.error_response().status(),
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}

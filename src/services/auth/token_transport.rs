//! # Cookie Token Transport
//!
//! 토큰 문자열을 단일 HTTP-only 쿠키로 주고받습니다.
//! 쿠키가 없거나 비어 있는 경우와 토큰이 무효한 경우는 호출자 입장에서 구분되지 않습니다.

use actix_web::cookie::{Cookie, time::Duration};
use actix_web::{HttpRequest, HttpResponse};

use crate::config::CookieConfig;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct CookieTokenTransport {
    config: CookieConfig,
}

impl CookieTokenTransport {
    pub fn new(config: CookieConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.name
    }

    /// 설정된 이름을 가진 쿠키 중 받아들일 수 있는 첫 번째 쿠키에서 토큰을 꺼냅니다.
    ///
    /// 요청 쿠키에는 속성이 실려 오지 않으므로 HTTP-only가 명시적으로 꺼진 쿠키만 거부합니다.
    /// 값이 비었거나 즉시 만료(`Max-Age=0`)된 쿠키는 건너뜁니다.
    pub fn extract(&self, req: &HttpRequest) -> Option<String> {
        let cookies = req.cookies().ok()?;
        cookies
            .iter()
            .filter(|c| c.name() == self.config.name)
            .find_map(|c| Self::accept(c))
    }

    fn accept(cookie: &Cookie<'_>) -> Option<String> {
        if cookie.http_only() == Some(false) {
            return None;
        }
        if cookie.max_age() == Some(Duration::ZERO) {
            return None;
        }

        let value = cookie.value();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// 토큰 쿠키를 만듭니다. `None`이면 즉시 만료되는 로그아웃 쿠키입니다.
    pub fn build_cookie(&self, token: Option<&str>) -> Cookie<'static> {
        let mut builder = Cookie::build(self.config.name.clone(), token.unwrap_or_default().to_string())
            .http_only(true)
            .secure(self.config.secure);

        match token {
            None => builder = builder.max_age(Duration::ZERO),
            Some(_) if self.config.max_age > 0 => {
                builder = builder.max_age(Duration::seconds(self.config.max_age));
            }
            Some(_) => {}
        }

        if let Some(path) = &self.config.path {
            builder = builder.path(path.clone());
        }
        if let Some(domain) = &self.config.domain {
            builder = builder.domain(domain.clone());
        }

        builder.finish()
    }

    /// 응답에 토큰 쿠키를 설정합니다.
    pub fn store(&self, response: &mut HttpResponse, token: Option<&str>) -> AppResult<()> {
        response
            .add_cookie(&self.build_cookie(token))
            .map_err(|e| AppError::InternalError(format!("failed to set auth cookie: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn transport() -> CookieTokenTransport {
        CookieTokenTransport::new(CookieConfig::default())
    }

    fn stored_cookie(transport: &CookieTokenTransport, token: Option<&str>) -> Cookie<'static> {
        let mut response = HttpResponse::Ok().finish();
        transport.store(&mut response, token).unwrap();
        response.cookies().next().unwrap().into_owned()
    }

    #[test]
    fn test_round_trip_yields_identical_token() {
        let transport = transport();
        let cookie = stored_cookie(&transport, Some("header.claims.signature"));

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(transport.extract(&req).as_deref(), Some("header.claims.signature"));
    }

    #[test]
    fn test_logout_cookie_extracts_as_none() {
        let transport = transport();
        let cookie = stored_cookie(&transport, None);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.http_only(), Some(true));

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert!(transport.extract(&req).is_none());
    }

    #[test]
    fn test_missing_or_foreign_cookie_is_none() {
        let transport = transport();

        let req = TestRequest::default().to_http_request();
        assert!(transport.extract(&req).is_none());

        let req = TestRequest::default()
            .cookie(Cookie::new("other", "value"))
            .to_http_request();
        assert!(transport.extract(&req).is_none());
    }

    #[test]
    fn test_stale_same_named_cookie_is_skipped() {
        let transport = transport();

        let req = TestRequest::default()
            .insert_header(("Cookie", "mosaic_token=; mosaic_token=good"))
            .to_http_request();
        assert_eq!(transport.extract(&req).as_deref(), Some("good"));
    }

    #[test]
    fn test_cookie_attributes_gate_acceptance() {
        let plain = Cookie::new("mosaic_token", "tok");
        assert_eq!(CookieTokenTransport::accept(&plain).as_deref(), Some("tok"));

        let script_visible = Cookie::build("mosaic_token", "tok").http_only(false).finish();
        assert!(CookieTokenTransport::accept(&script_visible).is_none());

        let expired = Cookie::build("mosaic_token", "tok").max_age(Duration::ZERO).finish();
        assert!(CookieTokenTransport::accept(&expired).is_none());
    }

    #[test]
    fn test_session_cookie_without_scoping_by_default() {
        let cookie = transport().build_cookie(Some("tok"));

        assert_eq!(cookie.http_only(), Some(true));
        assert!(cookie.max_age().is_none());
        assert!(cookie.path().is_none());
        assert!(cookie.domain().is_none());
    }

    #[test]
    fn test_configured_scoping_and_max_age() {
        let transport = CookieTokenTransport::new(CookieConfig {
            name: "sid".to_string(),
            path: Some("/api".to_string()),
            domain: Some("example.com".to_string()),
            max_age: 3600,
            secure: true,
        });
        let cookie = transport.build_cookie(Some("tok"));

        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
        assert_eq!(cookie.path(), Some("/api"));
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.secure(), Some(true));
    }
}

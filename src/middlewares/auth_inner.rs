use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::{AppContext, AppResult};
use crate::domain::models::auth::{AuthMode, AuthenticatedIdentity, RequiredPermission};

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_permission: Option<RequiredPermission>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_permission = self.required_permission.clone();

        Box::pin(async move {
            let Some(context) = req.app_data::<web::Data<AppContext>>().cloned() else {
                log::error!("AppContext가 등록되지 않았습니다");
                let response = HttpResponse::InternalServerError()
                    .json(serde_json::json!({
                        "error": "server_misconfigured",
                        "message": "인증 컨텍스트가 없습니다"
                    }));
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            // 쿠키가 없거나 토큰이 무효하면 익명
            let identity = match context.transport.extract(req.request()) {
                Some(token) => context.auth.validate_token(&token).await,
                None => None,
            };

            match (&mode, identity) {
                (AuthMode::Required, None) => {
                    log::warn!("인증 실패: 유효한 인증 쿠키 없음 ({})", req.path());
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "error": "authentication_required",
                            "message": "유효한 인증 토큰이 필요합니다"
                        }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                },

                (AuthMode::Required, Some(identity)) => {
                    if let Some(ref required) = required_permission {
                        match is_granted(&context, &identity, required).await {
                            Ok(true) => {}
                            Ok(false) => {
                                log::warn!("권한 부족: 사용자 ID {}, 필요 권한: {:?}",
                                    identity.user_id(), required);
                                let response = HttpResponse::Forbidden()
                                    .json(serde_json::json!({
                                        "error": "insufficient_permissions",
                                        "message": "접근 권한이 부족합니다"
                                    }));
                                let (req, _) = req.into_parts();
                                return Ok(ServiceResponse::new(req, response).map_into_right_body());
                            }
                            Err(err) => {
                                let response = err.error_response();
                                let (req, _) = req.into_parts();
                                return Ok(ServiceResponse::new(req, response).map_into_right_body());
                            }
                        }
                    }

                    log::debug!("인증 성공: 사용자 ID {}", identity.user_id());
                    req.extensions_mut().insert(identity);
                },

                (AuthMode::Optional, Some(identity)) => {
                    // 권한이 지정된 경우 충족할 때만 신원을 노출
                    let granted = match required_permission {
                        Some(ref required) => match is_granted(&context, &identity, required).await {
                            Ok(granted) => granted,
                            Err(err) => {
                                let response = err.error_response();
                                let (req, _) = req.into_parts();
                                return Ok(ServiceResponse::new(req, response).map_into_right_body());
                            }
                        },
                        None => true,
                    };
                    if granted {
                        log::debug!("선택적 인증 성공: 사용자 ID {}", identity.user_id());
                        req.extensions_mut().insert(identity);
                    } else {
                        log::debug!("선택적 인증: 권한 부족하지만 익명으로 진행");
                    }
                },

                (AuthMode::Optional, None) => {
                    log::debug!("선택적 인증: 토큰 없음, 요청 진행");
                },
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 나열된 전역 권한 중 하나라도 있으면 허용
async fn is_granted(
    context: &AppContext,
    identity: &AuthenticatedIdentity,
    required: &RequiredPermission,
) -> AppResult<bool> {
    for permission in required.candidates() {
        if context.permissions.check(identity, permission, None).await? {
            return Ok(true);
        }
    }
    Ok(false)
}

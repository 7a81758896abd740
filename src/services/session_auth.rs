//! 登录服务 - 业务能力层
//!
//! 用账号密码换取会话，不重试，不记录密码

use serde_json::Value as JsonValue;
use tracing::debug;
use url::form_urlencoded::byte_serialize;

use crate::error::AuthError;
use crate::infrastructure::{PortalTransport, RawResponse};
use crate::models::Session;
use crate::services::portal_urls;

/// 登录接口返回码
const CODE_SUCCESS: i64 = 0;
const CODE_NOT_FOUND: i64 = 400;
const CODE_LOCKED: i64 = 777;
const CODE_MISMATCH: i64 = 902;

#[derive(Debug, Default, Clone, Copy)]
pub struct SessionAuthenticator;

impl SessionAuthenticator {
    pub fn new() -> Self {
        Self
    }

    /// 登录并返回会话
    pub async fn authenticate(
        &self,
        transport: &dyn PortalTransport,
        host: &str,
        id: &str,
        secret: &str,
    ) -> Result<Session, AuthError> {
        let url = portal_urls::login_url(host)
            .map_err(|e| AuthError::connection_failure(e.to_string()))?;

        let response = transport
            .post_form(&url, login_body(id, secret))
            .await
            .map_err(|e| AuthError::connection_failure(e.to_string()))?;

        classify(host, &response)
    }
}

/// 登录表单
pub fn login_body(id: &str, secret: &str) -> String {
    format!(
        "app=user&mode=login&userType=1&id={}&pw={}&deeplink=&redirect_link=",
        byte_serialize(id.as_bytes()).collect::<String>(),
        byte_serialize(secret.as_bytes()).collect::<String>()
    )
}

/// 根据响应判断登录结果
fn classify(host: &str, response: &RawResponse) -> Result<Session, AuthError> {
    if !response.is_ok() {
        return Err(AuthError::connection_failure(format!(
            "HTTP {}",
            response.status
        )));
    }

    let code = response_code(&response.body).ok_or_else(|| {
        AuthError::connection_failure("登录响应中没有返回码")
    })?;
    debug!("登录返回码: {}", code);

    match code {
        CODE_MISMATCH => Err(AuthError::CredentialMismatch),
        CODE_LOCKED => Err(AuthError::AccountLocked),
        CODE_NOT_FOUND => Err(AuthError::AccountNotFound),
        CODE_SUCCESS => Session::from_cookies(
            host,
            response
                .cookies
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )
        .map_err(|missing| AuthError::IncompleteSession { missing }),
        other => Err(AuthError::connection_failure(format!(
            "未知返回码 {}",
            other
        ))),
    }
}

/// 提取 `{"code": n}`，也接受字符串形式的数字
fn response_code(body: &str) -> Option<i64> {
    let value: JsonValue = serde_json::from_str(body.trim()).ok()?;
    match value.get("code")? {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str, cookies: &[(&str, &str)]) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
            cookies: cookies
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }

    const ALL_COOKIES: [(&str, &str); 3] = [
        ("cookie_token", "token"),
        ("login_chk", "chk"),
        ("device_id", "device"),
    ];

    #[test]
    fn test_login_body_encoding() {
        assert_eq!(
            login_body("stu dent", "p&w=1"),
            "app=user&mode=login&userType=1&id=stu+dent&pw=p%26w%3D1&deeplink=&redirect_link="
        );
    }

    #[test]
    fn test_classify_error_codes() {
        let host = "school.example";
        assert_eq!(
            classify(host, &response(200, r#"{"code":902}"#, &ALL_COOKIES)),
            Err(AuthError::CredentialMismatch)
        );
        assert_eq!(
            classify(host, &response(200, r#"{"code":777}"#, &[])),
            Err(AuthError::AccountLocked)
        );
        assert_eq!(
            classify(host, &response(200, r#"{"code":"400"}"#, &[])),
            Err(AuthError::AccountNotFound)
        );
        assert!(matches!(
            classify(host, &response(200, r#"{"code":500}"#, &[])),
            Err(AuthError::ConnectionFailure { .. })
        ));
        assert!(matches!(
            classify(host, &response(502, r#"{"code":0}"#, &ALL_COOKIES)),
            Err(AuthError::ConnectionFailure { .. })
        ));
        assert!(matches!(
            classify(host, &response(200, "<html>", &ALL_COOKIES)),
            Err(AuthError::ConnectionFailure { .. })
        ));
    }

    #[test]
    fn test_classify_success() {
        let session = classify(
            "school.example",
            &response(200, r#"{"code":0,"msg":"ok"}"#, &ALL_COOKIES),
        )
        .unwrap();
        assert_eq!(
            session.cookie_header(),
            "cookie_token=token; login_chk=chk; device_id=device"
        );
    }

    #[test]
    fn test_incomplete_session_is_an_error() {
        let result = classify(
            "school.example",
            &response(200, r#"{"code":0}"#, &ALL_COOKIES[..2]),
        );
        assert_eq!(
            result,
            Err(AuthError::IncompleteSession {
                missing: vec!["device_id"]
            })
        );

        let result = classify("school.example", &response(200, r#"{"code":0}"#, &[]));
        assert!(matches!(result, Err(AuthError::IncompleteSession { .. })));
    }
}

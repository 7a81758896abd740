use serde::{Deserialize, Serialize};
use std::fmt;

/// 账号凭据
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    /// 显示名称，同时也是报告文件名
    #[serde(alias = "Name")]
    pub name: String,
    /// 学校门户域名，例如 `school.riroschool.kr`
    #[serde(alias = "Link")]
    pub host: String,
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Password")]
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("id", &self.id)
            .field("password", &"***")
            .finish()
    }
}

/// 登录成功后的会话
///
/// 三个 Cookie 必须同时存在才能构造；创建后不再修改，
/// 由同一账号的所有子任务通过 `Arc` 只读共享。
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    host: String,
    cookie_token: String,
    login_chk: String,
    device_id: String,
}

impl Session {
    pub const COOKIE_TOKEN: &'static str = "cookie_token";
    pub const LOGIN_CHK: &'static str = "login_chk";
    pub const DEVICE_ID: &'static str = "device_id";

    /// 会话所需的全部 Cookie 名称
    pub const COOKIE_NAMES: [&'static str; 3] =
        [Self::COOKIE_TOKEN, Self::LOGIN_CHK, Self::DEVICE_ID];

    /// 从响应 Cookie 中组装会话
    ///
    /// # 返回
    /// 缺少任意一个 Cookie 时返回缺失的名称列表
    pub fn from_cookies<'a, I>(host: &str, cookies: I) -> Result<Self, Vec<&'static str>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cookie_token = None;
        let mut login_chk = None;
        let mut device_id = None;

        for (name, value) in cookies {
            match name {
                Self::COOKIE_TOKEN => cookie_token = Some(value.to_string()),
                Self::LOGIN_CHK => login_chk = Some(value.to_string()),
                Self::DEVICE_ID => device_id = Some(value.to_string()),
                _ => {}
            }
        }

        match (cookie_token, login_chk, device_id) {
            (Some(cookie_token), Some(login_chk), Some(device_id)) => Ok(Self {
                host: host.to_string(),
                cookie_token,
                login_chk,
                device_id,
            }),
            (cookie_token, login_chk, device_id) => {
                let mut missing = Vec::new();
                if cookie_token.is_none() {
                    missing.push(Self::COOKIE_TOKEN);
                }
                if login_chk.is_none() {
                    missing.push(Self::LOGIN_CHK);
                }
                if device_id.is_none() {
                    missing.push(Self::DEVICE_ID);
                }
                Err(missing)
            }
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// 构建 `Cookie` 请求头
    pub fn cookie_header(&self) -> String {
        format!(
            "{}={}; {}={}; {}={}",
            Self::COOKIE_TOKEN,
            self.cookie_token,
            Self::LOGIN_CHK,
            self.login_chk,
            Self::DEVICE_ID,
            self.device_id
        )
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("host", &self.host).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_requires_all_cookies() {
        let session = Session::from_cookies(
            "school.example",
            [("device_id", "d"), ("other", "x"), ("cookie_token", "c"), ("login_chk", "l")],
        )
        .unwrap();
        assert_eq!(session.cookie_header(), "cookie_token=c; login_chk=l; device_id=d");
        assert_eq!(session.host(), "school.example");

        let missing =
            Session::from_cookies("school.example", [("cookie_token", "c"), ("login_chk", "l")])
                .unwrap_err();
        assert_eq!(missing, vec!["device_id"]);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let credential = Credential {
            name: "kim".to_string(),
            host: "school.example".to_string(),
            id: "student".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", credential).contains("hunter2"));

        let session = Session::from_cookies(
            "school.example",
            [("cookie_token", "secret-token"), ("login_chk", "l"), ("device_id", "d")],
        )
        .unwrap();
        assert!(!format!("{:?}", session).contains("secret-token"));
    }
}

//! HTTP 执行器 - 基础设施层
//!
//! 只暴露"发请求"的能力，不认识账号 / 年级 / 类别

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::TransportError;

/// 登录请求的 Content-Type
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// 原始响应
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// 响应中 `Set-Cookie` 的 (name, value)
    pub cookies: Vec<(String, String)>,
}

impl RawResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// 门户网络能力
///
/// 职责：
/// - 发送表单 POST（登录）
/// - 发送带 Cookie 的 GET（列表页）
/// - 不重试、不超时
#[async_trait]
pub trait PortalTransport: Send + Sync {
    async fn post_form(&self, url: &Url, body: String) -> Result<RawResponse, TransportError>;

    async fn get(&self, url: &Url, cookie_header: &str) -> Result<RawResponse, TransportError>;
}

/// 基于 reqwest 的实现
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// 创建新的 HTTP 执行器
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("无法创建 HTTP 客户端")?;
        Ok(Self { client })
    }

    async fn read(url: &Url, response: reqwest::Response) -> Result<RawResponse, TransportError> {
        let status = response.status().as_u16();
        let cookies = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::request_failed(url.as_str(), e))?;

        debug!("{} -> {} ({} bytes)", url.path(), status, body.len());

        Ok(RawResponse {
            status,
            body,
            cookies,
        })
    }
}

#[async_trait]
impl PortalTransport for HttpExecutor {
    async fn post_form(&self, url: &Url, body: String) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::request_failed(url.as_str(), e))?;

        Self::read(url, response).await
    }

    async fn get(&self, url: &Url, cookie_header: &str) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .header(COOKIE, cookie_header)
            .send()
            .await
            .map_err(|e| TransportError::request_failed(url.as_str(), e))?;

        Self::read(url, response).await
    }
}

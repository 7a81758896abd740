//! 各阶段的错误类型
//!
//! 每一层只返回自己的错误，隔离策略由上一层决定：
//! - `AuthError`：整个账号终止
//! - `ProbeError`：该类别按 0 页处理
//! - `PageError`：该页按 0 条记录处理
//! - `RowParseError`：丢弃该行

use thiserror::Error;

/// 网络传输错误（基础设施层）
#[derive(Debug, Error)]
pub enum TransportError {
    /// URL 构建失败
    #[error("无效的URL ({url}): {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// 请求发送或响应读取失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 登录错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 账号或密码不匹配 (902)
    #[error("id/pw unmatched")]
    CredentialMismatch,
    /// 账号被锁定 (777)
    #[error("account is locked")]
    AccountLocked,
    /// 账号不存在 (400)
    #[error("id doesn't exist")]
    AccountNotFound,
    /// 登录成功但会话 Cookie 不完整
    #[error("incomplete session: missing {missing:?}")]
    IncompleteSession { missing: Vec<&'static str> },
    /// 其它状态码、非 200 响应或网络错误
    #[error("unable to connect to login API: {reason}")]
    ConnectionFailure { reason: String },
}

/// 分页探测错误
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("分页探测请求失败: {0}")]
    Transport(#[from] TransportError),
    #[error("分页探测返回状态码 {status}")]
    BadStatus { status: u16 },
    /// 页面中找不到总记录数
    #[error("无法提取总记录数: {text:?}")]
    Extraction { text: String },
    #[error("匹配规则无效: {0}")]
    Pattern(String),
}

/// 单页抓取错误
#[derive(Debug, Error)]
pub enum PageError {
    #[error("页面请求失败: {0}")]
    Transport(#[from] TransportError),
    #[error("页面返回状态码 {status}")]
    BadStatus { status: u16 },
    /// 页面中找不到作业列表
    #[error("页面中没有作业列表")]
    MissingTable,
    #[error("选择器无效: {0}")]
    Selector(String),
}

/// 单行解析错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowParseError {
    /// 标题文本缺少 "  - " 分隔符
    #[error("标题格式错误: {text:?}")]
    MalformedTitle { text: String },
    /// 科目字段不足三个
    #[error("科目格式错误: {text:?}")]
    MalformedSubject { text: String },
    /// 登记月份无法解析
    #[error("登记日期格式错误: {text:?}")]
    MalformedRegistration { text: String },
    /// 截止日期无法解析
    #[error("截止日期格式错误: {text:?}")]
    MalformedDueDate { text: String },
}

// ========== 便捷构造函数 ==========

impl TransportError {
    /// 创建请求失败错误
    pub fn request_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TransportError::RequestFailed {
            url: url.into(),
            source: Box::new(source),
        }
    }
}

impl AuthError {
    pub fn connection_failure(reason: impl Into<String>) -> Self {
        AuthError::ConnectionFailure {
            reason: reason.into(),
        }
    }
}

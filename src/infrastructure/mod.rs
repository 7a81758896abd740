//! 基础设施层
//!
//! 持有网络客户端，只暴露请求能力

pub mod http_executor;
pub mod throttle;

pub use http_executor::{HttpExecutor, PortalTransport, RawResponse, FORM_CONTENT_TYPE};
pub use throttle::ThrottledTransport;

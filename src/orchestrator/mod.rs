//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Credential>)
//!     ↓
//! account_processor (登录 → 年级 → 类别)
//!     ↓
//! workflow::CategoryFlow (分页探测 → 页)
//!     ↓
//! services (能力层：auth / probe / extract / write)
//!     ↓
//! infrastructure (基础设施：PortalTransport)
//! ```
//!
//! 只做调度和汇总，隔离策略在这里落地：
//! 登录失败只终止该账号，子任务失败只影响自身的结果。

pub mod account_processor;
pub mod batch_processor;

pub use account_processor::AccountCrawler;
pub use batch_processor::{App, ProcessingStats};

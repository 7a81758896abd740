//! # Portfolio Crawler
//!
//! 从学校作品集门户批量爬取多个学生账号的作业信息（截止时间、科目、是否截止）
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有网络客户端，只暴露能力
//! - `PortalTransport` - 唯一的网络入口；`ThrottledTransport` 限制并发请求数
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `SessionAuthenticator` - 登录
//! - `PaginationProbe` - 分页探测
//! - `RecordExtractor` - 解析一页作业列表
//! - `date_reconstructor` - 截止日期年份推算、学年计算
//! - `ReportWriter` - 写 `{name}.json`
//!
//! ### ③ 流程层（Workflow）
//! - `CrawlCtx` / `CategoryTarget` - 上下文封装
//! - `CategoryFlow` - 一个类别的流程（探测 → 并发抓取每页 → 拼接）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/account_processor` - 单个账号：登录 → 年级 → 类别 → 汇总
//! - `orchestrator/batch_processor` - 多个账号：并发、写报告、统计

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AuthError, PageError, ProbeError, RowParseError, TransportError};
pub use infrastructure::{HttpExecutor, PortalTransport, RawResponse, ThrottledTransport};
pub use models::{AccountReport, AssignmentRecord, Category, Credential, Grade, GradeResult, Session};
pub use orchestrator::{AccountCrawler, App, ProcessingStats};
pub use workflow::{CategoryFlow, CategoryTarget, CrawlCtx};

//! 爬取上下文
//!
//! 封装"我正在爬哪个账号的哪个年级的哪个类别"这一信息

use chrono::{DateTime, FixedOffset};
use std::fmt::Display;
use std::sync::Arc;

use crate::infrastructure::PortalTransport;
use crate::models::{Category, Grade, Session};

/// 账号级上下文
///
/// 登录成功后创建一次，所有子任务通过 `Arc` 只读共享
pub struct CrawlCtx {
    /// 账号显示名称（仅用于日志）
    pub account: String,
    pub session: Session,
    pub transport: Arc<dyn PortalTransport>,
    /// 本次爬取使用的学年
    pub academic_year: i32,
    /// 本次爬取的基准时间
    pub now: DateTime<FixedOffset>,
    pub page_size: usize,
}

/// 类别级目标
#[derive(Debug, Clone)]
pub struct CategoryTarget {
    pub grade: Grade,
    /// 类别序号（从 0 开始）
    pub index: usize,
    pub category: Category,
}

impl CategoryTarget {
    pub fn new(grade: Grade, index: usize, category: Category) -> Self {
        Self {
            grade,
            index,
            category,
        }
    }
}

impl Display for CategoryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.grade, self.category)
    }
}

//! 单个账号处理器 - 编排层
//!
//! ## 状态
//!
//! ```text
//! Idle → Authenticating → Failed
//!                       → Crawling → Aggregating → Done
//! ```
//!
//! ## 并发结构
//!
//! 年级（3 个）→ 类别（每年级 3 个）→ 页（每类别 N 个），
//! 每一层都并发启动并等待全部兄弟任务结束，不提前取消。

use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::infrastructure::PortalTransport;
use crate::models::{AccountReport, Category, Credential, Grade, GradeResult};
use crate::services::date_reconstructor::{academic_year, school_now};
use crate::services::SessionAuthenticator;
use crate::workflow::{CategoryFlow, CategoryTarget, CrawlCtx};

/// 账号爬取器
///
/// 可在多个账号任务间共享（`Clone` 只复制 `Arc`）
#[derive(Clone)]
pub struct AccountCrawler {
    transport: Arc<dyn PortalTransport>,
    categories: Arc<Vec<Category>>,
    page_size: usize,
}

impl AccountCrawler {
    pub fn new(
        transport: Arc<dyn PortalTransport>,
        categories: Vec<Category>,
        page_size: usize,
    ) -> Self {
        Self {
            transport,
            categories: Arc::new(categories),
            page_size,
        }
    }

    /// 爬取一个账号
    pub async fn crawl(&self, credential: &Credential) -> AccountReport {
        self.crawl_at(credential, school_now()).await
    }

    /// 以指定时间为基准爬取一个账号
    ///
    /// `now` 决定学年和截止日期的年份推算；报告的更新时间仍取汇总时刻。
    pub async fn crawl_at(
        &self,
        credential: &Credential,
        now: DateTime<FixedOffset>,
    ) -> AccountReport {
        info!("[{}] 🚀 开始爬取", credential.name);

        // ========== 登录 ==========
        let session = match SessionAuthenticator::new()
            .authenticate(
                self.transport.as_ref(),
                &credential.host,
                &credential.id,
                &credential.password,
            )
            .await
        {
            Ok(session) => session,
            Err(e) => {
                warn!("[{}] ❌ 登录失败: {}", credential.name, e);
                return AccountReport::failed();
            }
        };

        let ctx = Arc::new(CrawlCtx {
            account: credential.name.clone(),
            session,
            transport: self.transport.clone(),
            academic_year: academic_year(&now),
            now,
            page_size: self.page_size,
        });
        info!(
            "[{}] ✓ 登录成功，学年 {}",
            credential.name, ctx.academic_year
        );

        // ========== 年级并发 ==========
        let mut handles = Vec::with_capacity(Grade::ALL.len());
        for grade in Grade::ALL {
            let ctx = ctx.clone();
            let categories = self.categories.clone();
            handles.push((grade, tokio::spawn(crawl_grade(ctx, categories, grade))));
        }

        let mut grades = Vec::with_capacity(handles.len());
        for (grade, handle) in handles {
            match handle.await {
                Ok(result) => grades.push((grade, result)),
                Err(e) => {
                    error!("[{}] {} 任务执行失败: {}", credential.name, grade, e);
                    grades.push((grade, GradeResult::new(self.categories.len())));
                }
            }
        }

        // ========== 汇总 ==========
        let report = AccountReport::from_grades(grades, school_now());
        info!(
            "[{}] ✅ 爬取完成，共 {} 条记录",
            credential.name,
            report.total_records()
        );

        report
    }
}

/// 爬取一个年级的所有类别
async fn crawl_grade(
    ctx: Arc<CrawlCtx>,
    categories: Arc<Vec<Category>>,
    grade: Grade,
) -> GradeResult {
    let mut handles = Vec::with_capacity(categories.len());
    for (index, category) in categories.iter().enumerate() {
        let ctx = ctx.clone();
        let target = CategoryTarget::new(grade, index, category.clone());
        handles.push((
            index,
            tokio::spawn(async move { CategoryFlow::new(ctx).run(target).await }),
        ));
    }

    let mut result = GradeResult::new(categories.len());
    for (index, handle) in handles {
        match handle.await {
            Ok(outcome) => result.insert(index, outcome.records),
            Err(e) => {
                error!(
                    "[{}] {} {} 任务执行失败: {}",
                    ctx.account, grade, categories[index], e
                );
            }
        }
    }

    result
}

//! 类别爬取流程 - 流程层
//!
//! 流程顺序：
//! 1. 分页探测（失败按 0 页处理）
//! 2. 并发抓取每一页（单页失败按 0 条处理）
//! 3. 等待全部页面完成后拼接

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::PageError;
use crate::models::AssignmentRecord;
use crate::services::{portal_urls, ExtractedPage, PaginationProbe, RecordExtractor};
use crate::workflow::crawl_ctx::{CategoryTarget, CrawlCtx};

/// 类别爬取结果
#[derive(Debug, Default)]
pub struct CategoryOutcome {
    pub records: Vec<AssignmentRecord>,
    /// 探测得到的页数
    pub pages: usize,
    pub failed_pages: usize,
    pub dropped_rows: usize,
    pub probe_failed: bool,
}

/// 类别爬取流程
///
/// - 不持有网络资源，只通过上下文使用
/// - 子任务失败不影响兄弟任务
pub struct CategoryFlow {
    ctx: Arc<CrawlCtx>,
    probe: PaginationProbe,
}

impl CategoryFlow {
    pub fn new(ctx: Arc<CrawlCtx>) -> Self {
        let probe = PaginationProbe::new(ctx.page_size);
        Self { ctx, probe }
    }

    pub async fn run(&self, target: CategoryTarget) -> CategoryOutcome {
        let ctx = &self.ctx;

        let pages = match self
            .probe
            .page_count(
                ctx.transport.as_ref(),
                &ctx.session,
                &target.category,
                target.grade,
                ctx.academic_year,
            )
            .await
        {
            Ok(pages) => pages,
            Err(e) => {
                warn!("[{}] {} 无法获取页数，按 0 页处理: {}", ctx.account, target, e);
                return CategoryOutcome {
                    probe_failed: true,
                    ..Default::default()
                };
            }
        };

        let handles = (1..=pages).map(|page| {
            tokio::spawn(fetch_page(self.ctx.clone(), target.clone(), page))
        });
        // 按启动顺序等待全部页面，不因单页失败提前返回
        let results = join_all(handles).await;

        let mut outcome = CategoryOutcome {
            pages,
            ..Default::default()
        };

        for (page, result) in (1..=pages).zip(results) {
            match result {
                Ok(Ok(extracted)) => {
                    outcome.dropped_rows += extracted.dropped.len();
                    outcome.records.extend(extracted.records);
                }
                Ok(Err(e)) => {
                    warn!("[{}] {} p.{} 抓取失败: {}", ctx.account, target, page, e);
                    outcome.failed_pages += 1;
                }
                Err(e) => {
                    error!("[{}] {} p.{} 任务执行失败: {}", ctx.account, target, page, e);
                    outcome.failed_pages += 1;
                }
            }
        }

        info!(
            "[{}] {}: {} 页, {} 条记录 (失败页 {}, 丢弃行 {})",
            ctx.account,
            target,
            pages,
            outcome.records.len(),
            outcome.failed_pages,
            outcome.dropped_rows
        );

        outcome
    }
}

/// 抓取并解析单页
async fn fetch_page(
    ctx: Arc<CrawlCtx>,
    target: CategoryTarget,
    page: usize,
) -> Result<ExtractedPage, PageError> {
    let url = portal_urls::listing_url(
        ctx.session.host(),
        &target.category.code,
        target.grade,
        page,
        ctx.academic_year,
    )?;
    let response = ctx.transport.get(&url, &ctx.session.cookie_header()).await?;

    if !response.is_ok() {
        return Err(PageError::BadStatus {
            status: response.status,
        });
    }

    let extracted = RecordExtractor::new(ctx.now).extract(&response.body, target.index)?;
    for dropped in &extracted.dropped {
        debug!("[{}] {} p.{} 丢弃一行: {}", ctx.account, target, page, dropped);
    }

    Ok(extracted)
}

//! 批量账号处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建 HTTP 执行器和请求限流
//! 2. **加载账号**：读取账号文件（`Vec<Credential>`）
//! 3. **并发控制**：每个账号一个任务，使用 Semaphore 限制并发账号数
//! 4. **报告写入**：每个账号完成后立即写入 `{name}.json`
//! 5. **全局统计**：汇总成功 / 失败账号数和记录数

use crate::config::Config;
use crate::infrastructure::{HttpExecutor, PortalTransport, ThrottledTransport};
use crate::models::{load_credentials, Credential};
use crate::orchestrator::account_processor::AccountCrawler;
use crate::services::ReportWriter;
use crate::utils::logging;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    crawler: AccountCrawler,
    writer: Arc<ReportWriter>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let executor = HttpExecutor::new()?;
        let transport = ThrottledTransport::new(executor, config.max_concurrent_requests);
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// 使用指定的网络实现创建应用
    pub fn with_transport(config: Config, transport: Arc<dyn PortalTransport>) -> Self {
        logging::log_startup(&config);

        let crawler = AccountCrawler::new(transport, config.categories.clone(), config.page_size);
        let writer = Arc::new(ReportWriter::new(&config.output_dir));

        Self {
            config,
            crawler,
            writer,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let credentials = load_credentials(Path::new(&self.config.accounts_file)).await?;

        if credentials.is_empty() {
            warn!("⚠️ 没有找到账号，程序结束");
            return Ok(ProcessingStats::default());
        }

        logging::log_accounts_loaded(credentials.len(), self.config.max_concurrent_accounts);

        let stats = self.process_all_accounts(credentials).await?;

        logging::print_final_stats(&stats, &self.config.output_dir);

        Ok(stats)
    }

    /// 处理所有账号
    async fn process_all_accounts(&self, credentials: Vec<Credential>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_accounts.max(1)));
        let mut handles = Vec::with_capacity(credentials.len());

        for credential in credentials {
            let permit = semaphore.clone().acquire_owned().await?;
            let crawler = self.crawler.clone();
            let writer = self.writer.clone();
            let name = credential.name.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let report = crawler.crawl(&credential).await;

                // 以账号自己的名称保存，与完成顺序无关
                if let Err(e) = writer.write(&credential.name, &report).await {
                    error!("[{}] ❌ 报告写入失败: {:#}", credential.name, e);
                    return AccountResult::WriteFailed;
                }
                info!("[{}] 💾 报告已保存", credential.name);

                if report.success {
                    AccountResult::Success(report.total_records())
                } else {
                    AccountResult::AuthFailed
                }
            });
            handles.push((name, handle));
        }

        let mut stats = ProcessingStats {
            total: handles.len(),
            ..Default::default()
        };

        for (name, handle) in handles {
            match handle.await {
                Ok(AccountResult::Success(records)) => {
                    stats.success += 1;
                    stats.records += records;
                }
                Ok(AccountResult::AuthFailed) | Ok(AccountResult::WriteFailed) => {
                    stats.failed += 1;
                }
                Err(e) => {
                    error!("[{}] 任务执行失败: {}", name, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// 单个账号的处理结果
enum AccountResult {
    Success(usize),
    AuthFailed,
    WriteFailed,
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    /// 成功账号的记录总数
    pub records: usize,
}

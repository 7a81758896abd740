//! 分页探测服务 - 业务能力层
//!
//! 请求第 1 页，读取"总记录数"，换算成页数

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::ProbeError;
use crate::infrastructure::PortalTransport;
use crate::models::{Category, Grade, Session};
use crate::services::portal_urls;

/// 总记录数所在的元素
const TOTAL_SELECTOR: &str = "span > strong";

pub struct PaginationProbe {
    page_size: usize,
}

impl PaginationProbe {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// 获取某个 (类别, 年级) 的页数
    pub async fn page_count(
        &self,
        transport: &dyn PortalTransport,
        session: &Session,
        category: &Category,
        grade: Grade,
        year: i32,
    ) -> Result<usize, ProbeError> {
        let url = portal_urls::listing_url(session.host(), &category.code, grade, 1, year)?;
        let response = transport.get(&url, &session.cookie_header()).await?;

        if !response.is_ok() {
            return Err(ProbeError::BadStatus {
                status: response.status,
            });
        }

        let total = total_records(&response.body)?;
        let pages = pages_for(total, self.page_size);
        debug!("{} {}: 共 {} 条, {} 页", grade, category, total, pages);

        Ok(pages)
    }
}

/// 从页面中提取总记录数（第一段连续数字）
pub fn total_records(html: &str) -> Result<usize, ProbeError> {
    let selector =
        Selector::parse(TOTAL_SELECTOR).map_err(|e| ProbeError::Pattern(format!("{:?}", e)))?;
    let document = Html::parse_document(html);
    let text: String = document
        .select(&selector)
        .flat_map(|element| element.text())
        .collect();

    let re = Regex::new("[0-9]+").map_err(|e| ProbeError::Pattern(e.to_string()))?;
    let digits = re
        .find(&text)
        .map(|m| m.as_str())
        .ok_or_else(|| ProbeError::Extraction { text: text.clone() })?;

    if digits == "0" {
        return Ok(0);
    }

    digits
        .parse()
        .map_err(|_| ProbeError::Extraction { text: text.clone() })
}

/// 向上取整的页数
pub fn pages_for(total: usize, page_size: usize) -> usize {
    if total == 0 {
        return 0;
    }
    total.div_ceil(page_size.max(1))
}

//! 作业列表解析 - 业务能力层
//!
//! 只负责把一页 HTML 变成作业记录，不关心网络和流程。
//! 单行解析失败只丢弃该行；找不到列表时整页失败。

use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Html, Selector};

use crate::error::{PageError, RowParseError};
use crate::models::AssignmentRecord;
use crate::services::date_reconstructor;

/// 已截止状态的文字
pub const ENDED_MARKER: &str = "마감";

/// 科目与标题之间的分隔符
const TITLE_SEPARATOR: &str = "  - ";

const ROW_SELECTOR: &str = "#container > div > div.renewal_wrap.portfolio_wrap > table > tbody > tr";
const NUMBER_SELECTOR: &str = "td:nth-child(1)";
const TEACHER_SELECTOR: &str = "td:nth-child(6)";
const TITLE_SELECTOR: &str = ".txt";
const DATE_CELL_SELECTOR: &str = "td:nth-child(7)";
const DUE_SELECTOR: &str = "td:nth-child(7) > strong";
const STATUS_SELECTOR: &str = ".state > p > span";

struct Selectors {
    row: Selector,
    number: Selector,
    teacher: Selector,
    title: Selector,
    date_cell: Selector,
    due: Selector,
    status: Selector,
}

impl Selectors {
    fn compile() -> Result<Self, PageError> {
        let parse = |s: &str| {
            Selector::parse(s).map_err(|e| PageError::Selector(format!("{}: {:?}", s, e)))
        };
        Ok(Self {
            row: parse(ROW_SELECTOR)?,
            number: parse(NUMBER_SELECTOR)?,
            teacher: parse(TEACHER_SELECTOR)?,
            title: parse(TITLE_SELECTOR)?,
            date_cell: parse(DATE_CELL_SELECTOR)?,
            due: parse(DUE_SELECTOR)?,
            status: parse(STATUS_SELECTOR)?,
        })
    }
}

/// 一页的解析结果
#[derive(Debug, Default)]
pub struct ExtractedPage {
    pub records: Vec<AssignmentRecord>,
    /// 被丢弃的行
    pub dropped: Vec<RowParseError>,
}

/// 作业列表解析器
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    now: DateTime<FixedOffset>,
}

impl RecordExtractor {
    /// `now` 用于推算截止日期的年份
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// 解析一页
    ///
    /// # 参数
    /// - `html`: 页面内容
    /// - `category_index`: 类别序号（从 0 开始），用作编号前缀
    pub fn extract(&self, html: &str, category_index: usize) -> Result<ExtractedPage, PageError> {
        let selectors = Selectors::compile()?;
        let document = Html::parse_document(html);

        let rows: Vec<ElementRef> = document.select(&selectors.row).collect();
        if rows.is_empty() {
            return Err(PageError::MissingTable);
        }

        let mut page = ExtractedPage::default();
        // 第一行是表头
        for row in rows.into_iter().skip(1) {
            match self.extract_row(&row, &selectors, category_index) {
                Ok(record) => page.records.push(record),
                Err(e) => page.dropped.push(e),
            }
        }

        Ok(page)
    }

    fn extract_row(
        &self,
        row: &ElementRef,
        selectors: &Selectors,
        category_index: usize,
    ) -> Result<AssignmentRecord, RowParseError> {
        let number = format!(
            "{}-{}",
            category_index + 1,
            text_of(row, &selectors.number).trim()
        );
        let teacher = text_of(row, &selectors.teacher);
        let (subject, title) = split_title(&text_of(row, &selectors.title))?;

        let date_cell = row
            .select(&selectors.date_cell)
            .next()
            .map(|cell| cell.text().collect::<String>())
            .unwrap_or_default();
        let registered_month = registered_month(&date_cell)?;
        let due = date_reconstructor::reconstruct(
            registered_month,
            &text_of(row, &selectors.due),
            &self.now,
        )?;

        let is_ended = text_of(row, &selectors.status).trim() == ENDED_MARKER;

        Ok(AssignmentRecord {
            number,
            teacher,
            subject,
            title,
            due,
            is_ended,
        })
    }
}

/// 所有匹配元素的文字拼接
fn text_of(row: &ElementRef, selector: &Selector) -> String {
    row.select(selector).flat_map(|e| e.text()).collect()
}

/// `"[1학년] 2반 수학  - 함수 보고서"` -> (`수학`, `함수 보고서`)
fn split_title(text: &str) -> Result<(String, String), RowParseError> {
    let (head, title) = text
        .split_once(TITLE_SEPARATOR)
        .ok_or_else(|| RowParseError::MalformedTitle {
            text: text.to_string(),
        })?;

    let subject = head
        .split_whitespace()
        .nth(2)
        .ok_or_else(|| RowParseError::MalformedSubject {
            text: head.to_string(),
        })?;

    Ok((subject.to_string(), title.trim().to_string()))
}

/// 日期单元格开头的登记月份
fn registered_month(cell_text: &str) -> Result<u32, RowParseError> {
    cell_text
        .trim()
        .split('-')
        .next()
        .and_then(|m| m.trim().parse().ok())
        .ok_or_else(|| RowParseError::MalformedRegistration {
            text: cell_text.trim().to_string(),
        })
}

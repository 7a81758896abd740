//! 日期推算
//!
//! 列表中的截止日期只有 `MM-DD HH:MM:SS`，没有年份。
//! 这里用登记月份与截止月份的先后推断年份：登记月份大于截止月份时
//! 认为截止日期已跨年。这是启发式推断，无法验证：
//! 多年前未关闭的记录，或本机与服务器时钟偏差，都可能推错年份。

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, Utc};

use crate::config::SCHOOL_UTC_OFFSET_SECS;
use crate::error::RowParseError;

const FULL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 学校时区（Asia/Seoul，固定 +09:00）
pub fn school_offset() -> FixedOffset {
    FixedOffset::east_opt(SCHOOL_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// 学校时区的当前时间
pub fn school_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&school_offset())
}

/// 学年：3 月到次年 2 月，以开始的年份标记
pub fn academic_year<D: Datelike>(now: &D) -> i32 {
    if now.month() < 3 {
        now.year() - 1
    } else {
        now.year()
    }
}

/// 由登记月份和截止日期文本推算绝对截止时间
///
/// # 参数
/// - `registered_month`: 登记月份（1-12）
/// - `due_text`: `MM-DD HH:MM:SS`
/// - `now`: 当前时间（只使用年份）
pub fn reconstruct(
    registered_month: u32,
    due_text: &str,
    now: &DateTime<FixedOffset>,
) -> Result<DateTime<FixedOffset>, RowParseError> {
    let due_text = due_text.trim();
    let malformed = || RowParseError::MalformedDueDate {
        text: due_text.to_string(),
    };

    let due_month: u32 = due_text
        .split('-')
        .next()
        .and_then(|m| m.trim().parse().ok())
        .ok_or_else(malformed)?;

    let year = if registered_month > due_month {
        now.year() + 1
    } else {
        now.year()
    };

    NaiveDateTime::parse_from_str(&format!("{}-{}", year, due_text), FULL_DATE_FORMAT)
        .map_err(|_| malformed())?
        .and_local_timezone(school_offset())
        .single()
        .ok_or_else(malformed)
}

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 一条作业记录（列表中的一行）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    /// 类别内编号，形如 `1-23`（类别序号-列表序号）
    pub number: String,
    /// 教师姓名（可能包含多人）
    pub teacher: String,
    pub subject: String,
    pub title: String,
    /// 截止时间，序列化为 Unix 秒
    #[serde(rename = "time", with = "epoch_seconds")]
    pub due: DateTime<FixedOffset>,
    /// 是否已截止
    pub is_ended: bool,
}

/// `DateTime<FixedOffset>` <-> Unix 秒
///
/// 反序列化时恢复为学校时区。
pub(crate) mod epoch_seconds {
    use crate::config::SCHOOL_UTC_OFFSET_SECS;
    use chrono::{DateTime, FixedOffset};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        let offset = FixedOffset::east_opt(SCHOOL_UTC_OFFSET_SECS)
            .ok_or_else(|| de::Error::custom("invalid school offset"))?;
        DateTime::from_timestamp(secs, 0)
            .map(|utc| utc.with_timezone(&offset))
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {}", secs)))
    }
}

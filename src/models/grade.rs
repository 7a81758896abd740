/// 年级枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    /// 一年级
    First = 1,
    /// 二年级
    Second = 2,
    /// 三年级
    Third = 3,
}

impl Grade {
    /// 全部年级（按年级顺序）
    pub const ALL: [Grade; 3] = [Grade::First, Grade::Second, Grade::Third];

    /// 获取年级编号（请求参数 `t_grade`）
    pub fn number(self) -> u8 {
        self as u8
    }

    /// 从编号解析年级
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Grade::First),
            2 => Some(Grade::Second),
            3 => Some(Grade::Third),
            _ => None,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}학년", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_number_round_trip() {
        for grade in Grade::ALL {
            assert_eq!(Grade::from_number(grade.number()), Some(grade));
        }
        assert_eq!(Grade::from_number(0), None);
        assert_eq!(Grade::from_number(4), None);
    }
}

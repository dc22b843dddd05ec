use serde::{Deserialize, Serialize};

/// 作曲家正确得分
pub const COMPOSER_POINTS: u64 = 3;
/// 曲名部分匹配得分
pub const PARTIAL_NAME_POINTS: u64 = 3;
/// 曲名完全匹配得分
pub const EXACT_NAME_POINTS: u64 = 6;
/// 调性正确得分
pub const KEY_POINTS: u64 = 1;

/// 一次提交的猜测
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Guess {
    /// 猜测的曲名
    pub name: String,
    /// 猜测的作曲家
    pub composer: String,
    /// 猜测的调性
    pub key: String,
    /// 被猜测的曲目编号
    pub piece: usize,
}

impl Guess {
    pub fn new(piece: usize, name: &str, composer: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            composer: composer.to_string(),
            key: key.to_string(),
            piece,
        }
    }
}

/// 曲名匹配等级
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameMatch {
    /// 不匹配
    #[default]
    None,
    /// 部分匹配
    Partial,
    /// 完全匹配
    Exact,
}

impl NameMatch {
    /// 数字等级（0、1、2）
    pub fn level(self) -> u8 {
        match self {
            NameMatch::None => 0,
            NameMatch::Partial => 1,
            NameMatch::Exact => 2,
        }
    }

    /// 从数字等级还原，未定义的等级返回 `None`
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(NameMatch::None),
            1 => Some(NameMatch::Partial),
            2 => Some(NameMatch::Exact),
            _ => None,
        }
    }

    pub fn points(self) -> u64 {
        match self {
            NameMatch::None => 0,
            NameMatch::Partial => PARTIAL_NAME_POINTS,
            NameMatch::Exact => EXACT_NAME_POINTS,
        }
    }
}

/// 评判结果
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchOutcome {
    /// 作曲家是否正确
    pub composer: bool,
    /// 曲名匹配等级
    pub name: NameMatch,
    /// 调性是否正确
    pub key: bool,
}

impl MatchOutcome {
    pub fn new(composer: bool, name: NameMatch, key: bool) -> Self {
        Self {
            composer,
            name,
            key,
        }
    }

    /// 本次得分
    pub fn total(&self) -> u64 {
        let mut total = self.name.points();
        if self.composer {
            total += COMPOSER_POINTS;
        }
        if self.key {
            total += KEY_POINTS;
        }
        total
    }

    /// 所有项目均完全正确
    pub fn is_perfect(&self) -> bool {
        self.composer && self.key && self.name == NameMatch::Exact
    }
}

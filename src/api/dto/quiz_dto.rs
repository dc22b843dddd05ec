//! 测验 DTO
//!
//! 定义表单与查询参数的数据结构。

use serde::Deserialize;

use crate::models::Guess;
use crate::security::validation::{ValidationResult, validators};

/// 开始会话表单
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StartForm {
    /// 显示名称
    pub name: String,
}

/// 提交答案表单
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SubmitForm {
    /// 猜测的曲名
    pub name: String,
    /// 猜测的作曲家
    pub composer: String,
    /// 猜测的调性
    pub key: String,
    /// 曲目编号（保持原始文本，便于返回 400）
    pub id: Option<String>,
}

impl SubmitForm {
    /// 校验并转换为猜测
    pub fn into_guess(self) -> ValidationResult<Guess> {
        let piece = validators::piece_id("id", self.id.as_deref())?;
        Ok(Guess {
            name: validators::guess_field("name", &self.name)?,
            composer: validators::guess_field("composer", &self.composer)?,
            key: validators::guess_field("key", &self.key)?,
            piece,
        })
    }
}

/// 结果页查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ResultQuery {
    /// 编码后的评判结果
    pub results: String,
    /// 曲目编号
    pub item: Option<String>,
}

/// 公开档案查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ProfileQuery {
    /// 公开查看令牌
    pub user: Option<String>,
}

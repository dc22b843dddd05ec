use serde::{Deserialize, Serialize};
use std::fmt;

/// 曲目目录条目（乐曲开头片段）
///
/// 启动时加载一次，之后只读。`id` 按加载顺序从 0 开始连续分配。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// 作曲家
    pub composer: String,
    /// 曲名
    pub title: String,
    /// 调性
    pub key: String,
    /// 乐谱图片地址
    pub image: String,
    /// 目录内的位置编号
    pub id: usize,
}

impl CatalogEntry {
    /// 创建新条目
    pub fn new(id: usize, composer: &str, title: &str, key: &str, image: &str) -> Self {
        Self {
            composer: composer.to_string(),
            title: title.to_string(),
            key: key.to_string(),
            image: image.to_string(),
            id,
        }
    }

    /// 本地图片代理路径
    pub fn image_path(&self) -> String {
        format!("/images/{}.png", self.id)
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} by {}", self.title, self.key, self.composer)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 会话记录
///
/// 每位访客一条，保存在进程内的会话存储中，进程退出即丢失。
/// 分数与答题数只增不减，只能通过提交答案的流程修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// 会话令牌（Cookie 值）
    pub token: String,

    /// 显示名称，惰性创建的会话为空
    pub display_name: String,

    /// 累计得分
    pub score: u64,

    /// 已作答曲目数
    pub piece_count: u64,

    /// 下一首要展示的曲目编号
    pub next_piece: usize,

    /// 最近一次作答的曲目编号
    pub last_piece: Option<usize>,

    /// 公开查看令牌
    pub view_token: String,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    /// 最后活跃时间
    pub last_active_at: DateTime<Utc>,
}

impl SessionRecord {
    /// 创建新会话记录
    pub fn new(display_name: &str, view_token: &str, next_piece: usize) -> Self {
        let now = Utc::now();
        Self {
            token: new_session_token(),
            display_name: display_name.to_string(),
            score: 0,
            piece_count: 0,
            next_piece,
            last_piece: None,
            view_token: view_token.to_string(),
            created_at: now,
            last_active_at: now,
        }
    }

    /// 记录一次作答
    pub fn record_attempt(&mut self, piece: usize, points: u64, next_piece: usize) {
        self.score = self.score.saturating_add(points);
        self.piece_count = self.piece_count.saturating_add(1);
        self.last_piece = Some(piece);
        self.next_piece = next_piece;
        self.touch();
    }

    /// 更新最后活跃时间
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// 平均每首得分
    pub fn average_score(&self) -> f64 {
        if self.piece_count == 0 {
            0.0
        } else {
            self.score as f64 / self.piece_count as f64
        }
    }
}

/// 生成会话令牌：UUID v4（122 位随机数）的 32 位十六进制表示
pub fn new_session_token() -> String {
    Uuid::new_v4().simple().to_string()
}

//! 会话服务
//!
//! 提供会话的创建、查询和作答记录。会话只存在于内存中，没有过期或删除。

pub mod store;

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::config::SessionConfig;
use crate::error::{AppError, Result};
use crate::models::SessionRecord;
use crate::services::catalog::Catalog;

pub use store::SessionStore;

const VIEW_CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 会话服务 trait
#[async_trait]
pub trait SessionService: Send + Sync {
    /// 创建会话，返回新记录（含会话令牌与公开查看令牌）
    async fn create(&self, display_name: &str) -> Result<SessionRecord>;

    /// 根据会话令牌获取会话；不存在时返回 `SessionNotStarted`
    async fn lookup(&self, token: &str) -> Result<SessionRecord>;

    /// 根据公开查看令牌获取会话；不存在时返回 `NotFound`
    async fn lookup_by_view_token(&self, view_token: &str) -> Result<SessionRecord>;

    /// 记录一次作答：累加得分与答题数，并挑选下一首曲目。
    /// 仅由提交答案的流程调用。
    async fn record_attempt(&self, token: &str, piece: usize, points: u64)
    -> Result<SessionRecord>;

    /// 会话数量
    async fn count(&self) -> usize;
}

/// 会话服务实现
pub struct SessionServiceImpl {
    store: Arc<SessionStore>,
    catalog: Arc<Catalog>,
    config: SessionConfig,
}

impl SessionServiceImpl {
    /// 创建新的服务实例
    pub fn new(store: Arc<SessionStore>, catalog: Arc<Catalog>, config: SessionConfig) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Short shareable token: base-36 code, then `-<name>` when a name was given.
    fn view_token(&self, display_name: &str) -> String {
        let mut rng = rand::thread_rng();
        let code: String = (0..self.config.view_code_length)
            .map(|_| VIEW_CODE_ALPHABET[rng.gen_range(0..VIEW_CODE_ALPHABET.len())] as char)
            .collect();
        if display_name.is_empty() {
            code
        } else {
            format!("{}-{}", code, display_name)
        }
    }
}

#[async_trait]
impl SessionService for SessionServiceImpl {
    async fn create(&self, display_name: &str) -> Result<SessionRecord> {
        let next_piece = self.catalog.random_id(&mut rand::thread_rng());
        let mut record = SessionRecord::new(display_name, "", next_piece);

        // The code space is small; regenerate on collision instead of
        // silently pointing two visitors at one profile.
        let attempts = self.config.view_code_retries.max(1);
        let view_token = (0..attempts)
            .map(|_| self.view_token(display_name))
            .find(|candidate| self.store.claim_view_token(candidate, &record.token))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "no free view token after {} attempts",
                    attempts
                ))
            })?;

        record.view_token = view_token;
        self.store.insert(record.clone());

        info!("Session created, first piece {}", record.next_piece);
        Ok(record)
    }

    async fn lookup(&self, token: &str) -> Result<SessionRecord> {
        self.store.get(token).ok_or_else(|| {
            debug!("Unknown session token");
            AppError::SessionNotStarted
        })
    }

    async fn lookup_by_view_token(&self, view_token: &str) -> Result<SessionRecord> {
        self.store
            .get_by_view_token(view_token)
            .ok_or_else(|| AppError::NotFound(format!("profile {}", view_token)))
    }

    async fn record_attempt(
        &self,
        token: &str,
        piece: usize,
        points: u64,
    ) -> Result<SessionRecord> {
        let catalog = &self.catalog;
        self.store
            .update(token, |record| {
                let next = catalog.next_after(piece, &mut rand::thread_rng());
                record.record_attempt(piece, points, next);
            })
            .ok_or(AppError::SessionNotStarted)
    }

    async fn count(&self) -> usize {
        self.store.len()
    }
}

/// 创建会话服务
pub fn create_session_service(
    store: Arc<SessionStore>,
    catalog: Arc<Catalog>,
    config: SessionConfig,
) -> Box<dyn SessionService> {
    Box::new(SessionServiceImpl::new(store, catalog, config))
}

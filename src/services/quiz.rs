//! Quiz workflow
//!
//! Submit: catalog lookup -> evaluation -> session update -> result token.
//! Result: token decode -> catalog lookup.

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::models::{CatalogEntry, Guess, MatchOutcome, SessionRecord};
use crate::services::catalog::Catalog;
use crate::services::codec;
use crate::services::evaluator::MatchEvaluator;
use crate::services::session::SessionService;

/// What a submission produced, ready to be put on the redirect URL.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub outcome: MatchOutcome,
    pub points: u64,
    pub piece: usize,
    pub session: SessionRecord,
}

impl Attempt {
    /// Encoded outcome for the `results` query parameter.
    pub fn results_token(&self) -> String {
        codec::encode(&self.outcome)
    }

    /// Redirect target for the result page.
    pub fn result_location(&self) -> String {
        format!(
            "/result?results={}&item={}",
            urlencoding::encode(&self.results_token()),
            self.piece
        )
    }
}

pub struct QuizService {
    catalog: Arc<Catalog>,
    evaluator: MatchEvaluator,
    sessions: Arc<dyn SessionService>,
}

impl QuizService {
    pub fn new(
        catalog: Arc<Catalog>,
        evaluator: MatchEvaluator,
        sessions: Arc<dyn SessionService>,
    ) -> Self {
        Self {
            catalog,
            evaluator,
            sessions,
        }
    }

    /// The piece the session should be shown next.
    pub async fn current_piece(&self, token: &str) -> Result<(SessionRecord, &CatalogEntry)> {
        let session = self.sessions.lookup(token).await?;
        let entry = self.catalog.get(session.next_piece)?;
        Ok((session, entry))
    }

    /// Evaluate a guess and credit the session.
    ///
    /// The session is checked before the piece so a visitor without a
    /// session is redirected rather than shown an error.
    pub async fn submit(&self, token: &str, guess: &Guess) -> Result<Attempt> {
        self.sessions.lookup(token).await?;
        let entry = self.catalog.get(guess.piece)?;

        let outcome = self.evaluator.evaluate(guess, entry);
        let points = outcome.total();
        let session = self
            .sessions
            .record_attempt(token, guess.piece, points)
            .await?;

        debug!(
            piece = guess.piece,
            points,
            score = session.score,
            "Guess evaluated"
        );

        Ok(Attempt {
            outcome,
            points,
            piece: guess.piece,
            session,
        })
    }

    /// Decode a result token and resolve the piece it refers to.
    pub fn result(&self, results: &str, item: usize) -> Result<(MatchOutcome, &CatalogEntry)> {
        let entry = self.catalog.get(item)?;
        Ok((codec::decode(results), entry))
    }
}

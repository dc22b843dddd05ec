//! Page view models
//!
//! One struct per page. Every piece of catalog or visitor text goes through
//! [`RequestValidator::escape_html`] before it reaches the markup.

use crate::models::{CatalogEntry, MatchOutcome, NameMatch, SessionRecord};
use crate::security::RequestValidator;

fn esc(s: &str) -> String {
    RequestValidator::escape_html(s)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/style.css\">\n</head>\n\
         <body>\n{}\n</body>\n</html>\n",
        esc(title),
        body
    )
}

/// Link to the public profile of a session.
pub fn profile_link(view_token: &str) -> String {
    format!("/profile?user={}", urlencoding::encode(view_token))
}

/// Scoreboard line shared by the piece and result pages.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub display_name: String,
    pub score: u64,
    pub piece_count: u64,
    pub profile_link: String,
}

impl From<&SessionRecord> for SessionSummary {
    fn from(record: &SessionRecord) -> Self {
        Self {
            display_name: record.display_name.clone(),
            score: record.score,
            piece_count: record.piece_count,
            profile_link: profile_link(&record.view_token),
        }
    }
}

impl SessionSummary {
    fn render(&self) -> String {
        let who = if self.display_name.is_empty() {
            String::new()
        } else {
            format!("{}: ", esc(&self.display_name))
        };
        format!(
            "<p class=\"score\">{}{} points from {} pieces \
             (<a href=\"{}\">share your profile</a>)</p>",
            who,
            self.score,
            self.piece_count,
            esc(&self.profile_link)
        )
    }
}

/// `GET /` when no session exists.
#[derive(Debug, Clone, Default)]
pub struct StartPage;

impl StartPage {
    pub fn render(&self) -> String {
        layout(
            "Incipit",
            "<h1>Incipit</h1>\n\
             <p>Name the piece, its composer and its key from the opening bars.</p>\n\
             <form method=\"post\" action=\"/start\">\n\
             <label>Your name <input name=\"name\" maxlength=\"64\"></label>\n\
             <button type=\"submit\">Start</button>\n</form>",
        )
    }
}

/// `GET /piece`
#[derive(Debug, Clone)]
pub struct PiecePage {
    pub piece: usize,
    pub image_path: String,
    pub session: SessionSummary,
}

impl PiecePage {
    pub fn new(session: &SessionRecord, entry: &CatalogEntry) -> Self {
        Self {
            piece: entry.id,
            image_path: entry.image_path(),
            session: session.into(),
        }
    }

    pub fn render(&self) -> String {
        let body = format!(
            "<h1>What is this piece?</h1>\n{}\n\
             <img class=\"incipit\" src=\"{}\" alt=\"Opening bars\">\n\
             <form method=\"post\" action=\"/submit\">\n\
             <input type=\"hidden\" name=\"id\" value=\"{}\">\n\
             <label>Title <input name=\"name\" autocomplete=\"off\"></label>\n\
             <label>Composer <input name=\"composer\" autocomplete=\"off\"></label>\n\
             <label>Key <input name=\"key\" autocomplete=\"off\"></label>\n\
             <button type=\"submit\">Guess</button>\n</form>",
            self.session.render(),
            esc(&self.image_path),
            self.piece
        );
        layout("Incipit", &body)
    }
}

/// `GET /result`
#[derive(Debug, Clone)]
pub struct ResultPage {
    pub entry: CatalogEntry,
    pub outcome: MatchOutcome,
    pub points: u64,
    pub session: SessionSummary,
}

impl ResultPage {
    pub fn new(session: &SessionRecord, entry: &CatalogEntry, outcome: MatchOutcome) -> Self {
        Self {
            entry: entry.clone(),
            outcome,
            points: outcome.total(),
            session: session.into(),
        }
    }

    fn verdict(correct: bool) -> &'static str {
        if correct { "correct" } else { "wrong" }
    }

    fn name_verdict(name: NameMatch) -> &'static str {
        match name {
            NameMatch::Exact => "correct",
            NameMatch::Partial => "close",
            NameMatch::None => "wrong",
        }
    }

    pub fn render(&self) -> String {
        let headline = if self.outcome.is_perfect() {
            "Perfect!".to_string()
        } else {
            format!("+{} points", self.points)
        };
        let body = format!(
            "<h1>{}</h1>\n\
             <img class=\"incipit\" src=\"{}\" alt=\"Opening bars\">\n\
             <ul class=\"results\">\n\
             <li class=\"{}\">Title: {}</li>\n\
             <li class=\"{}\">Composer: {}</li>\n\
             <li class=\"{}\">Key: {}</li>\n</ul>\n\
             {}\n<p><a href=\"/piece\">Next piece</a></p>",
            esc(&headline),
            esc(&self.entry.image_path()),
            Self::name_verdict(self.outcome.name),
            esc(&self.entry.title),
            Self::verdict(self.outcome.composer),
            esc(&self.entry.composer),
            Self::verdict(self.outcome.key),
            esc(&self.entry.key),
            self.session.render()
        );
        layout(&self.entry.to_string(), &body)
    }
}

/// `GET /profile`, read-only and shareable.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub display_name: String,
    pub score: u64,
    pub piece_count: u64,
    pub average: f64,
}

impl From<&SessionRecord> for ProfilePage {
    fn from(record: &SessionRecord) -> Self {
        Self {
            display_name: record.display_name.clone(),
            score: record.score,
            piece_count: record.piece_count,
            average: record.average_score(),
        }
    }
}

impl ProfilePage {
    pub fn render(&self) -> String {
        let name = if self.display_name.is_empty() {
            "Anonymous listener"
        } else {
            self.display_name.as_str()
        };
        let body = format!(
            "<h1>{}</h1>\n<dl class=\"profile\">\n\
             <dt>Score</dt><dd>{}</dd>\n\
             <dt>Pieces</dt><dd>{}</dd>\n\
             <dt>Average</dt><dd>{:.1}</dd>\n</dl>\n\
             <p><a href=\"/\">Play Incipit</a></p>",
            esc(name),
            self.score,
            self.piece_count,
            self.average
        );
        layout(name, &body)
    }
}

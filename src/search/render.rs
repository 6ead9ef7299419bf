//! Turns result records into display cards.
//!
//! Every field has its own fallback, so a record missing any subset of fields
//! still yields a complete card and never disturbs its neighbours.

use reqwest::Url;

use crate::search::model::ResultRecord;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const NO_LYRIC: &str = "No lyric preview available";
pub const NO_SCORE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artwork {
    Image(Url),
    Fallback,
}

impl Artwork {
    pub fn from_field(image: Option<&str>) -> Self {
        image
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| Url::parse(raw).ok())
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .map(Artwork::Image)
            .unwrap_or(Artwork::Fallback)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Artwork::Fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub artist: String,
    /// Always wrapped in double quotes.
    pub lyric: String,
    pub artwork: Artwork,
    pub score: String,
}

pub fn render_results(records: &[ResultRecord]) -> Vec<ResultCard> {
    records.iter().map(render_card).collect()
}

pub fn render_card(record: &ResultRecord) -> ResultCard {
    ResultCard {
        title: title_text(record.title.as_deref()),
        artist: artist_text(record.artist.as_deref()),
        lyric: lyric_text(record.lyric.as_deref()),
        artwork: Artwork::from_field(record.image.as_deref()),
        score: score_text(record.score),
    }
}

pub fn title_text(title: Option<&str>) -> String {
    text_or(title, UNKNOWN_TITLE)
}

pub fn artist_text(artist: Option<&str>) -> String {
    text_or(artist, UNKNOWN_ARTIST)
}

pub fn lyric_text(lyric: Option<&str>) -> String {
    format!("\"{}\"", text_or(lyric, NO_LYRIC))
}

pub fn score_text(score: Option<f64>) -> String {
    match score {
        Some(score) if score.is_finite() => format!("{:.1}", round_tie_away(score)),
        _ => NO_SCORE.to_string(),
    }
}

// `{:.1}` breaks exact ties toward even digits; scores break them away from
// zero. A double sits exactly halfway between tenths only when it is an odd
// multiple of 0.25.
fn round_tie_away(score: f64) -> f64 {
    let quarters = score * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        (score * 10.0).round() / 10.0
    } else {
        score
    }
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

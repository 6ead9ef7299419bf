use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    search::render::{Artwork, ResultCard},
    ui::util::truncate,
    util::colors,
};

pub const CARD_HEIGHT: u16 = 8;
const MAX_COLUMNS: u16 = 3;
const MIN_CARD_WIDTH: u16 = 26;
const ARTWORK_ICON: &str = "♪";
const FALLBACK_ARTWORK: &str = "♫ no artwork";
const SCORE_ICON: &str = "◔";

/// Cards laid out in up to three columns, scrolled by whole rows.
pub struct ResultGrid<'a> {
    cards: &'a [ResultCard],
    scroll: usize,
}

impl<'a> ResultGrid<'a> {
    pub fn new(cards: &'a [ResultCard], scroll: usize) -> Self {
        Self { cards, scroll }
    }

    pub fn columns(width: u16) -> u16 {
        (width / MIN_CARD_WIDTH).clamp(1, MAX_COLUMNS)
    }

    pub fn visible_rows(height: u16) -> usize {
        (height / CARD_HEIGHT).max(1) as usize
    }

    pub fn total_rows(count: usize, width: u16) -> usize {
        count.div_ceil(Self::columns(width) as usize)
    }

    /// Largest scroll offset that still fills the area as far as possible.
    pub fn max_scroll(count: usize, area: Rect) -> usize {
        Self::total_rows(count, area.width).saturating_sub(Self::visible_rows(area.height))
    }
}

impl Widget for ResultGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }

        let columns = Self::columns(area.width) as usize;
        let first_row = self.scroll.min(Self::max_scroll(self.cards.len(), area));
        let rows = Self::visible_rows(area.height);

        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); rows]).split(area);

        for (row_index, row_area) in row_areas.iter().enumerate() {
            let start = (first_row + row_index) * columns;
            if start >= self.cards.len() {
                break;
            }
            let end = (start + columns).min(self.cards.len());

            let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
                .spacing(1)
                .split(*row_area);

            for (card, cell) in self.cards[start..end].iter().zip(cells.iter()) {
                CardWidget { card }.render(*cell, buf);
            }
        }
    }
}

struct CardWidget<'a> {
    card: &'a ResultCard,
}

impl CardWidget<'_> {
    fn artwork_line(&self, width: usize) -> Line<'static> {
        let (text, style) = match &self.card.artwork {
            Artwork::Image(url) => (
                format!("{ARTWORK_ICON} {}", url.host_str().unwrap_or(url.as_str())),
                Style::default().fg(colors::ACCENT),
            ),
            Artwork::Fallback => (
                FALLBACK_ARTWORK.to_string(),
                Style::default().fg(colors::PRIMARY),
            ),
        };

        let score = format!("{SCORE_ICON} {}", self.card.score);
        let room = width.saturating_sub(score.width() + 1);
        let text = truncate(&text, room);
        let gap = width.saturating_sub(text.width() + score.width());

        Line::from(vec![
            Span::styled(text, style),
            Span::raw(" ".repeat(gap)),
            Span::styled(
                score,
                Style::default()
                    .fg(colors::SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

impl Widget for CardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::PRIMARY));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let [artwork, title, artist, lyric] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let width = inner.width as usize;

        self.artwork_line(width).render(artwork, buf);

        Line::styled(
            truncate(&self.card.title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )
        .render(title, buf);

        Line::styled(
            truncate(&self.card.artist, width),
            Style::default().fg(colors::PRIMARY),
        )
        .render(artist, buf);

        Paragraph::new(self.card.lyric.as_str())
            .style(
                Style::default()
                    .fg(colors::ACCENT)
                    .add_modifier(Modifier::ITALIC),
            )
            .wrap(Wrap { trim: true })
            .render(lyric, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{model::ResultRecord, render::render_results};

    fn text_of(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.bottom())
            .map(|y| {
                (area.x..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn titled(title: &str) -> ResultRecord {
        ResultRecord {
            title: Some(title.to_string()),
            score: Some(0.5),
            ..Default::default()
        }
    }

    #[test]
    fn column_count_follows_width() {
        assert_eq!(ResultGrid::columns(20), 1);
        assert_eq!(ResultGrid::columns(60), 2);
        assert_eq!(ResultGrid::columns(120), 3);
        assert_eq!(ResultGrid::columns(400), 3);
    }

    #[test]
    fn max_scroll_accounts_for_visible_rows() {
        let area = Rect::new(0, 0, 90, CARD_HEIGHT * 2);
        assert_eq!(ResultGrid::max_scroll(3, area), 0);
        assert_eq!(ResultGrid::max_scroll(6, area), 0);
        assert_eq!(ResultGrid::max_scroll(7, area), 1);
        assert_eq!(ResultGrid::max_scroll(12, area), 2);
    }

    #[test]
    fn renders_fallbacks_for_empty_record() {
        let cards = render_results(&[ResultRecord::default()]);
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        ResultGrid::new(&cards, 0).render(area, &mut buf);

        let text = text_of(&buf);
        assert!(text.contains("Unknown Title"), "{text}");
        assert!(text.contains("Unknown Artist"), "{text}");
        assert!(text.contains("\"No lyric preview"), "{text}");
        assert!(text.contains("N/A"), "{text}");
        assert!(text.contains(FALLBACK_ARTWORK), "{text}");
    }

    #[test]
    fn renders_image_host_and_score() {
        let cards = render_results(&[ResultRecord {
            title: Some("Hallelujah".into()),
            image: Some("https://covers.example.org/h.jpg".into()),
            score: Some(3.14159),
            ..Default::default()
        }]);
        let area = Rect::new(0, 0, 60, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        ResultGrid::new(&cards, 0).render(area, &mut buf);

        let text = text_of(&buf);
        assert!(text.contains("covers.example.org"), "{text}");
        assert!(text.contains("3.1"), "{text}");
        assert!(text.contains("Hallelujah"), "{text}");
    }

    #[test]
    fn keeps_backend_order_across_rows() {
        let records: Vec<_> = ["first", "second", "third", "fourth"]
            .into_iter()
            .map(titled)
            .collect();
        let cards = render_results(&records);
        let area = Rect::new(0, 0, 90, CARD_HEIGHT * 2);
        let mut buf = Buffer::empty(area);
        ResultGrid::new(&cards, 0).render(area, &mut buf);

        let text = text_of(&buf);
        let positions: Vec<_> = ["first", "second", "third", "fourth"]
            .iter()
            .map(|t| text.find(t).unwrap_or_else(|| panic!("{t} missing:\n{text}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn scroll_skips_whole_rows() {
        let records: Vec<_> = ["alpha", "beta", "gamma", "delta"]
            .into_iter()
            .map(titled)
            .collect();
        let cards = render_results(&records);
        let area = Rect::new(0, 0, 30, CARD_HEIGHT * 2);
        let mut buf = Buffer::empty(area);
        ResultGrid::new(&cards, 1).render(area, &mut buf);

        let text = text_of(&buf);
        assert!(!text.contains("alpha"), "{text}");
        assert!(text.contains("beta"), "{text}");
        assert!(text.contains("gamma"), "{text}");
    }

    #[test]
    fn empty_list_draws_nothing() {
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        ResultGrid::new(&[], 0).render(area, &mut buf);
        assert!(buf.content().iter().all(|c| c.symbol() == " "));
    }
}

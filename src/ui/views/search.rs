use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    search::{SearchController, SearchState, render::render_results},
    ui::{
        components::{result_grid::ResultGrid, spinner::Spinner},
        layout::AppLayout,
        util::truncate,
    },
    util::colors,
};

pub const TITLE: &str = "Lyrically";
pub const PLACEHOLDER: &str = "Say something... we'll find the song that says it too.";
pub const TAGLINE: &str = "Say it with music ♪";
const KEY_HINTS: &str = "enter search · ctrl+r reset · ↑↓ scroll · ctrl+c quit";
const GO_LABEL: &str = "GO!";
const BUSY_LABEL: &str = "...";
const ERROR_BANNER_HEIGHT: u16 = 3;

/// The whole screen for one frame of controller state.
pub struct SearchScreen<'a> {
    controller: &'a SearchController,
    layout: AppLayout,
    scroll: usize,
}

impl<'a> SearchScreen<'a> {
    pub fn new(controller: &'a SearchController, layout: AppLayout, scroll: usize) -> Self {
        Self {
            controller,
            layout,
            scroll,
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(vec![
            Span::styled("♫ ", Style::default().fg(colors::SECONDARY)),
            Span::styled(
                TITLE,
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ✦", Style::default().fg(colors::PRIMARY)),
        ]);

        Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
            .render(area, buf);
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let loading = self.controller.state().is_loading();
        let button = if loading { BUSY_LABEL } else { GO_LABEL };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::PRIMARY))
            .title_bottom(Line::from(format!(" {button} ")).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);

        let query = self.controller.query();
        let line = if query.is_empty() {
            Line::styled(
                truncate(PLACEHOLDER, inner.width as usize),
                Style::default().fg(colors::NEUTRAL),
            )
        } else {
            // Keep the end of the query, where the user is typing, in view.
            let width = inner.width as usize;
            let shown = if query.width() + 1 > width {
                tail(query, width.saturating_sub(1))
            } else {
                query
            };
            Line::from(vec![
                Span::styled(shown.to_string(), Style::default().fg(colors::ACCENT)),
                Span::styled("▏", Style::default().fg(colors::PRIMARY)),
            ])
        };
        line.render(inner, buf);
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer) {
        match self.controller.state() {
            SearchState::Idle => {
                Paragraph::new(Line::styled(
                    "Type a line, a feeling, or a memory and press Enter.",
                    Style::default().fg(colors::NEUTRAL),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            }
            SearchState::Loading => {
                Spinner::default()
                    .with_style(Style::default().fg(colors::PRIMARY))
                    .with_label("Searching...")
                    .render(area, buf);
            }
            SearchState::Error(message) => {
                let [banner, _] = Layout::vertical([
                    Constraint::Length(ERROR_BANNER_HEIGHT),
                    Constraint::Min(0),
                ])
                .areas(area);

                Paragraph::new(Line::styled(
                    format!("! {message}"),
                    Style::default()
                        .fg(colors::ERROR)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_set(border::THICK)
                        .border_style(Style::default().fg(colors::ERROR)),
                )
                .render(banner, buf);
            }
            SearchState::Success(results) => {
                let cards = render_results(results);
                ResultGrid::new(&cards, self.scroll).render(area, buf);
            }
        }
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let [hints, tagline] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(TAGLINE.width() as u16 + 1),
        ])
        .areas(area);

        Line::styled(
            truncate(KEY_HINTS, hints.width as usize),
            Style::default().fg(colors::NEUTRAL),
        )
        .render(hints, buf);
        Line::styled(
            TAGLINE,
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::ITALIC),
        )
        .right_aligned()
        .render(tagline, buf);
    }
}

impl Widget for SearchScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        self.render_header(self.layout.header, buf);
        self.render_input(self.layout.input, buf);
        self.render_body(self.layout.body, buf);
        self.render_footer(self.layout.footer, buf);
    }
}

fn tail(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        start = i;
    }
    &text[start..]
}

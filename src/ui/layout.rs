use ratatui::layout::{Constraint, Layout, Position, Rect};

const HEADER_HEIGHT: u16 = 3;
const INPUT_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;
const MAX_CONTENT_WIDTH: u16 = 120;

/// Screen regions, kept after each draw so mouse clicks can be hit-tested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub input: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [main, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)]).areas(area);

        let width = main.width.min(MAX_CONTENT_WIDTH);
        let content = Rect {
            x: main.x + (main.width - width) / 2,
            width,
            ..main
        };

        let [header, input, body] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(content);

        Self {
            header,
            input,
            body,
            footer,
        }
    }

    pub fn is_header(&self, column: u16, row: u16) -> bool {
        self.header.contains(Position::new(column, row))
    }
}

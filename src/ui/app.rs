use std::sync::Arc;

use flume::{Receiver, Sender};

use ratatui::Frame;
use tracing::{debug, info};

use crate::{
    config::ClientConfig,
    event::events::Event,
    http::{ApiService, SearchBackend},
    search::SearchController,
    util::task::TaskManager,
};

use super::{
    components::result_grid::ResultGrid,
    layout::AppLayout,
    message::AppMessage,
    tui,
    util::handler::EventHandler,
    views::SearchScreen,
};

pub const SEARCH_TASK: &str = "search";

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub api: Arc<dyn SearchBackend>,
    pub controller: SearchController,
    pub task_manager: TaskManager,
    pub layout: AppLayout,
    pub scroll: usize,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: ClientConfig) -> color_eyre::Result<Self> {
        info!(api_url = config.api_url.as_str(), "starting");
        let api = Arc::new(ApiService::new(&config)?);
        Ok(Self::with_backend(api))
    }

    pub fn with_backend(api: Arc<dyn SearchBackend>) -> Self {
        let (event_tx, event_rx) = flume::unbounded();

        Self {
            event_rx,
            event_tx,
            api,
            controller: SearchController::new(),
            task_manager: TaskManager::new(),
            layout: AppLayout::default(),
            scroll: 0,
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?.mouse(true).paste(true);
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        self.layout = AppLayout::new(frame.area());
        if self.has_focus {
            frame.render_widget(
                SearchScreen::new(&self.controller, self.layout, self.scroll),
                frame.area(),
            );
        }
    }

    pub fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::Input(c) => {
                let mut query = self.controller.query().to_string();
                query.push(c);
                self.controller.set_query(query);
            }
            AppMessage::Paste(text) => {
                let mut query = self.controller.query().to_string();
                query.extend(text.chars().map(|c| if c.is_control() { ' ' } else { c }));
                self.controller.set_query(query);
            }
            AppMessage::Backspace => {
                let mut query = self.controller.query().to_string();
                query.pop();
                self.controller.set_query(query);
            }
            AppMessage::ClearInput => self.controller.set_query(""),
            AppMessage::Submit => self.submit(),
            AppMessage::Reset => {
                self.task_manager.abort(SEARCH_TASK);
                self.controller.reset();
                self.scroll = 0;
            }
            AppMessage::ScrollUp => self.scroll_by(-1),
            AppMessage::ScrollDown => self.scroll_by(1),
            AppMessage::PageUp => self.scroll_by(-(self.page_rows() as isize)),
            AppMessage::PageDown => self.scroll_by(self.page_rows() as isize),
        }
    }

    fn submit(&mut self) {
        let Some(ticket) = self.controller.submit() else {
            return;
        };
        self.scroll = 0;
        if self.task_manager.is_running(SEARCH_TASK) {
            debug!(seq = ticket.seq, "superseding in-flight search");
        }

        let api = self.api.clone();
        let tx = self.event_tx.clone();
        self.task_manager.spawn(
            SEARCH_TASK,
            tokio::spawn(async move {
                let outcome = api.search(&ticket.query).await;
                let _ = tx.send(Event::SearchResolved {
                    seq: ticket.seq,
                    outcome,
                });
            }),
        );
    }

    fn page_rows(&self) -> usize {
        ResultGrid::visible_rows(self.layout.body.height)
    }

    fn scroll_by(&mut self, delta: isize) {
        let count = self.controller.state().results().len();
        let max = ResultGrid::max_scroll(count, self.layout.body);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}

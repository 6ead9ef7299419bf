use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::{
    event::events::Event,
    search::Resolution,
    ui::{
        app::App,
        input::InputHandler,
        message::AppMessage,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt);
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Tick => return Ok(app.has_focus),
            other => Self::handle_input(app, other),
        }

        Ok(true)
    }

    /// Terminal input that needs no access to the terminal itself.
    pub fn handle_input(app: &mut App, evt: TerminalEvent) {
        match evt {
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::Mouse(mouse) => Self::handle_mouse_event(app, mouse),
            TerminalEvent::Paste(text) => app.update(AppMessage::Paste(text)),
            _ => {}
        }
    }

    pub fn handle_action(app: &mut App, evt: Event) {
        match evt {
            Event::SearchResolved { seq, outcome } => {
                if app.controller.resolve(seq, outcome) == Resolution::Applied {
                    app.scroll = 0;
                } else {
                    debug!(seq, "ignored superseded search result");
                }
            }
        }
    }

    fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if let Some(msg) = InputHandler::handle_key(evt) {
            app.update(msg);
        }
    }

    fn handle_mouse_event(app: &mut App, evt: MouseEvent) {
        match evt.kind {
            MouseEventKind::Down(MouseButton::Left) if app.layout.is_header(evt.column, evt.row) => {
                app.update(AppMessage::Reset)
            }
            MouseEventKind::ScrollUp => app.update(AppMessage::ScrollUp),
            MouseEventKind::ScrollDown => app.update(AppMessage::ScrollDown),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        http::{ApiError, SearchBackend},
        search::{FETCH_ERROR_MESSAGE, ResultRecord, SearchState},
        ui::{app::SEARCH_TASK, layout::AppLayout},
    };
    use async_trait::async_trait;
    use ratatui::{
        crossterm::event::{KeyCode, KeyModifiers},
        layout::Rect,
    };
    use std::{collections::HashMap, sync::Arc, sync::Mutex, time::Duration};
    use tokio::sync::oneshot;

    type Reply = Result<Vec<ResultRecord>, ApiError>;

    /// Each query blocks until the test releases its reply.
    #[derive(Default)]
    struct GatedBackend {
        gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
        calls: Mutex<Vec<String>>,
    }

    impl GatedBackend {
        fn gate(&self, query: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(query.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl SearchBackend for GatedBackend {
        async fn search(&self, query: &str) -> Result<Vec<ResultRecord>, ApiError> {
            self.calls.lock().unwrap().push(query.to_string());
            let gate = self.gates.lock().unwrap().remove(query);
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".into()))),
                None => Ok(Vec::new()),
            }
        }
    }

    fn record(title: &str) -> ResultRecord {
        ResultRecord {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            EventHandler::handle_input(
                app,
                TerminalEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        EventHandler::handle_input(app, TerminalEvent::Key(KeyEvent::new(code, modifiers)));
    }

    async fn next_event(app: &App) -> Event {
        tokio::time::timeout(Duration::from_secs(5), app.event_rx.recv_async())
            .await
            .expect("search task did not report back")
            .expect("event channel closed")
    }

    #[tokio::test]
    async fn typing_and_enter_runs_a_search() {
        let backend = Arc::new(GatedBackend::default());
        let release = backend.gate("let it be");
        let mut app = App::with_backend(backend.clone());

        type_text(&mut app, "  let it be ");
        assert_eq!(app.controller.query(), "  let it be ");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.controller.state().is_loading());

        release.send(Ok(vec![record("Let It Be")])).unwrap();
        let evt = next_event(&app).await;
        EventHandler::handle_action(&mut app, evt);

        assert_eq!(app.controller.state().results(), &[record("Let It Be")]);
        assert_eq!(*backend.calls.lock().unwrap(), vec!["let it be"]);
    }

    #[tokio::test]
    async fn blank_enter_issues_no_request() {
        let backend = Arc::new(GatedBackend::default());
        let mut app = App::with_backend(backend.clone());

        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.controller.state(), &SearchState::Idle);
        tokio::task::yield_now().await;
        assert!(backend.calls.lock().unwrap().is_empty());
        assert!(app.event_rx.is_empty());
    }

    #[tokio::test]
    async fn superseded_result_does_not_overwrite_newer_one() {
        let backend = Arc::new(GatedBackend::default());
        let _release_a = backend.gate("A");
        let release_b = backend.gate("B");
        let mut app = App::with_backend(backend.clone());

        app.controller.set_query("A");
        app.update(AppMessage::Submit);
        let stale_seq = app.controller.pending().unwrap();

        app.controller.set_query("B");
        app.update(AppMessage::Submit);

        release_b.send(Ok(vec![record("from B")])).unwrap();
        let evt = next_event(&app).await;
        EventHandler::handle_action(&mut app, evt);

        // A's task was aborted; feed its late answer in by hand.
        EventHandler::handle_action(
            &mut app,
            Event::SearchResolved {
                seq: stale_seq,
                outcome: Ok(vec![record("from A")]),
            },
        );

        assert_eq!(app.controller.state().results(), &[record("from B")]);
    }

    #[tokio::test]
    async fn server_error_shows_fixed_message() {
        let backend = Arc::new(GatedBackend::default());
        let release = backend.gate("q");
        let mut app = App::with_backend(backend);

        type_text(&mut app, "q");
        app.update(AppMessage::Submit);
        release.send(Err(ApiError::Http { status: 500 })).unwrap();
        let evt = next_event(&app).await;
        EventHandler::handle_action(&mut app, evt);

        assert_eq!(app.controller.state().error(), Some(FETCH_ERROR_MESSAGE));
        assert!(app.controller.state().results().is_empty());
    }

    #[tokio::test]
    async fn clicking_title_resets_everything() {
        let backend = Arc::new(GatedBackend::default());
        let _release = backend.gate("pending");
        let mut app = App::with_backend(backend);
        app.layout = AppLayout::new(Rect::new(0, 0, 80, 30));

        type_text(&mut app, "pending");
        app.update(AppMessage::Submit);
        let seq = app.controller.pending().unwrap();
        assert!(app.task_manager.is_running(SEARCH_TASK));

        EventHandler::handle_input(
            &mut app,
            TerminalEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 10,
                row: 1,
                modifiers: KeyModifiers::NONE,
            }),
        );

        assert_eq!(app.controller.query(), "");
        assert_eq!(app.controller.state(), &SearchState::Idle);
        assert!(!app.task_manager.is_running(SEARCH_TASK));

        EventHandler::handle_action(
            &mut app,
            Event::SearchResolved {
                seq,
                outcome: Ok(vec![record("late")]),
            },
        );
        assert_eq!(app.controller.state(), &SearchState::Idle);
    }

    #[tokio::test]
    async fn clicking_outside_title_keeps_state() {
        let mut app = App::with_backend(Arc::new(GatedBackend::default()));
        app.layout = AppLayout::new(Rect::new(0, 0, 80, 30));
        type_text(&mut app, "keep me");

        EventHandler::handle_input(
            &mut app,
            TerminalEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 10,
                row: 20,
                modifiers: KeyModifiers::NONE,
            }),
        );
        assert_eq!(app.controller.query(), "keep me");
    }

    #[tokio::test]
    async fn editing_keys_and_paste_update_query() {
        let mut app = App::with_backend(Arc::new(GatedBackend::default()));

        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.controller.query(), "ab");

        EventHandler::handle_input(&mut app, TerminalEvent::Paste(" line\none".into()));
        assert_eq!(app.controller.query(), "ab line one");

        press(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(app.controller.query(), "");

        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn scrolling_is_clamped_to_available_rows() {
        let mut app = App::with_backend(Arc::new(GatedBackend::default()));
        app.layout = AppLayout::new(Rect::new(0, 0, 30, 30));

        app.controller.set_query("many");
        let ticket = app.controller.submit().unwrap();
        let records = (0..6).map(|i| record(&format!("song {i}"))).collect();
        EventHandler::handle_action(
            &mut app,
            Event::SearchResolved {
                seq: ticket.seq,
                outcome: Ok(records),
            },
        );

        // 30 columns is a single card column; the body fits 2 cards.
        for _ in 0..10 {
            app.update(AppMessage::ScrollDown);
        }
        assert_eq!(app.scroll, 4);

        app.update(AppMessage::PageUp);
        assert_eq!(app.scroll, 2);
        app.update(AppMessage::ScrollUp);
        app.update(AppMessage::ScrollUp);
        app.update(AppMessage::ScrollUp);
        assert_eq!(app.scroll, 0);
    }
}

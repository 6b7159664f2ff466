//! Application core: event loop, store ownership, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use atlas_core::{Effect, FetchPipeline, Phase, ViewStore};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::fetch_bridge::spawn_fetch;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// The single writer of directory state.
    store: ViewStore,
    pipeline: Arc<FetchPipeline>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancels in-flight fetches on shutdown.
    fetch_cancel: CancellationToken,
}

impl App {
    pub fn new(pipeline: Arc<FetchPipeline>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: ViewStore::new(),
            pipeline,
            screens: create_screens().into_iter().collect(),
            running: true,
            help_visible: false,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            fetch_cancel: CancellationToken::new(),
        }
    }

    /// The screen the current phase calls for.
    fn active_screen(&self) -> ScreenId {
        ScreenId::for_phase(self.store.phase())
    }

    fn start_fetch(&mut self, generation: u64) {
        spawn_fetch(
            Arc::clone(&self.pipeline),
            generation,
            self.action_tx.clone(),
            self.fetch_cancel.child_token(),
        );
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));

        self.start_fetch(self.store.retry_count());

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(
            width = self.terminal_size.0,
            height = self.terminal_size.1,
            "TUI event loop started"
        );

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.fetch_cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        let id = self.active_screen();
        let Some(screen) = self.screens.get_mut(&id) else {
            return Ok(None);
        };

        // Text input owns every key but Ctrl+C.
        if screen.captures_input() {
            return screen.handle_key_event(key, &self.store);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => Ok(Some(Action::Quit)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                Ok(Some(Action::ToggleHelp))
            }
            _ => screen.handle_key_event(key, &self.store),
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        if let Some(screen) = self.screens.get_mut(&ScreenId::Directory) {
            screen.apply_effect(effect);
        }
    }

    /// Process a single action: update the store, then let the active
    /// screen observe it.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
                self.terminal_size = (*w, *h);
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::RequestRetry => {
                if let Some(generation) = self.store.request_retry() {
                    self.start_fetch(generation);
                } else {
                    debug!("retry ignored, fetch already in flight");
                }
            }

            Action::CatalogLoaded { generation, result } => {
                let applied = self.store.apply_fetch_result(*generation, result.clone());
                match (applied, result) {
                    (false, _) => {}
                    (true, Ok(catalog)) => {
                        info!(generation, countries = catalog.len(), "catalog applied");
                    }
                    (true, Err(err)) => {
                        warn!(generation, error = %err.diagnostic(), "fetch failed");
                    }
                }
            }

            Action::SetSearch(term) => self.store.set_search_term(term.clone()),

            Action::ClearSearch => self.store.clear_search(),

            Action::CycleRegion { forward } => {
                self.store.cycle_region(*forward);
                debug!(region = ?self.store.region_filter(), "region filter changed");
            }

            Action::SelectCountry(country) => {
                let effect = self.store.select_country(Arc::clone(country));
                self.apply_effect(effect);
            }

            Action::SelectBorder(code) => {
                if let Some(effect) = self.store.select_by_border_code(code) {
                    self.apply_effect(effect);
                }
            }

            Action::Tick | Action::Render => {}
        }

        let id = self.active_screen();
        if let Some(screen) = self.screens.get_mut(&id) {
            if let Some(follow_up) = screen.update(action, &self.store)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [content_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen()) {
            screen.render(frame, content_area, &self.store);
        }

        self.render_status_bar(frame, status_area);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Phase indicator on the left, key hints for the active screen after it.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let indicator = match self.store.phase() {
            Phase::Loading => Span::styled("◐ loading", Style::default().fg(theme::SAND)),
            Phase::Failed(_) => Span::styled("○ error", Style::default().fg(theme::CORAL)),
            Phase::Ready => Span::styled(
                format!(
                    "● {}/{} countries",
                    self.store.filtered().len(),
                    self.store.countries().len()
                ),
                Style::default().fg(theme::MOSS_GREEN),
            ),
        };

        let hints = match self.active_screen() {
            ScreenId::Loading => " │ q quit",
            ScreenId::Failure => " │ Enter try again  q quit",
            ScreenId::Directory => " │ / search  r region  Enter select  b borders  ? help  q quit",
        };

        let line = Line::from(vec![
            Span::raw(" "),
            indicator,
            Span::styled(hints, theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 24u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };
        let heading = |text: &'static str| {
            Line::from(Span::styled(
                format!("  {text}"),
                Style::default().fg(theme::LAGOON_TEAL),
            ))
        };

        let help_text = vec![
            Line::from(""),
            heading("Search & Filter"),
            entry("/", "Edit search"),
            entry("Esc / Ctrl+u", "Clear search (while editing)"),
            entry("c", "Clear search"),
            entry("r / R", "Next / previous region"),
            Line::from(""),
            heading("Countries"),
            entry("←↓↑→ hjkl", "Move in the grid"),
            entry("g / G", "First / last"),
            entry("Enter", "Show details"),
            entry("Ctrl+d / u", "Scroll details"),
            Line::from(""),
            heading("Borders"),
            entry("b / Tab", "Focus border chips"),
            entry("← / →", "Move between chips"),
            entry("Enter", "Open neighbour"),
            Line::from(""),
            heading("General"),
            entry("t / Enter", "Try again (after an error)"),
            entry("?", "This help"),
            entry("q / Ctrl+c", "Quit"),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use atlas_core::validate::validate_records;
    use atlas_core::{Catalog, CoreError, CountryCode, DirectoryConfig};

    use super::*;

    fn app() -> App {
        let pipeline = FetchPipeline::new(&DirectoryConfig::default()).unwrap();
        App::new(Arc::new(pipeline))
    }

    fn catalog() -> Catalog {
        let countries = validate_records(json!([
            {
                "name": { "common": "France" }, "cca3": "FRA", "region": "Europe",
                "borders": ["DEU"], "flags": { "png": "fra.png" }
            },
            {
                "name": { "common": "Germany" }, "cca3": "DEU", "region": "Europe",
                "borders": ["FRA"], "flags": { "png": "deu.png" }
            },
            {
                "name": { "common": "Japan" }, "cca3": "JPN", "region": "Asia",
                "flags": { "png": "jpn.png" }
            }
        ]))
        .unwrap();
        Catalog::from_countries(countries, "France").unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app() -> App {
        let mut app = app();
        app.process_action(&Action::CatalogLoaded {
            generation: 0,
            result: Ok(catalog()),
        })
        .unwrap();
        app
    }

    #[test]
    fn starts_on_loading_screen() {
        let app = app();
        assert_eq!(app.active_screen(), ScreenId::Loading);
    }

    #[test]
    fn retry_is_refused_while_loading() {
        let mut app = app();
        app.process_action(&Action::RequestRetry).unwrap();
        assert_eq!(app.store.retry_count(), 0);
    }

    #[test]
    fn loaded_catalog_shows_directory() {
        let app = loaded_app();
        assert_eq!(app.active_screen(), ScreenId::Directory);
        assert_eq!(app.store.selected().unwrap().name.common, "France");
    }

    #[test]
    fn failed_fetch_shows_failure_screen() {
        let mut app = app();
        app.process_action(&Action::CatalogLoaded {
            generation: 0,
            result: Err(CoreError::Network {
                reason: "refused".into(),
            }),
        })
        .unwrap();
        assert_eq!(app.active_screen(), ScreenId::Failure);
    }

    #[tokio::test]
    async fn try_again_starts_next_generation() {
        let mut app = app();
        app.process_action(&Action::CatalogLoaded {
            generation: 0,
            result: Err(CoreError::Unknown {
                detail: String::new(),
            }),
        })
        .unwrap();

        let action = app.handle_key_event(key(KeyCode::Char('t'))).unwrap();
        assert!(matches!(action, Some(Action::RequestRetry)));
        app.process_action(&Action::RequestRetry).unwrap();

        assert_eq!(app.store.retry_count(), 1);
        assert_eq!(app.active_screen(), ScreenId::Loading);
        app.fetch_cancel.cancel();

        // A late result from the first attempt is ignored.
        app.process_action(&Action::CatalogLoaded {
            generation: 0,
            result: Ok(catalog()),
        })
        .unwrap();
        assert_eq!(app.active_screen(), ScreenId::Loading);
    }

    #[test]
    fn q_quits_unless_search_is_being_edited() {
        let mut app = loaded_app();
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        ));

        assert!(app.handle_key_event(key(KeyCode::Char('/'))).unwrap().is_none());
        match app.handle_key_event(key(KeyCode::Char('q'))).unwrap() {
            Some(Action::SetSearch(term)) => assert_eq!(term, "q"),
            other => panic!("unexpected {other:?}"),
        }

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            app.handle_key_event(ctrl_c).unwrap(),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = loaded_app();
        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.handle_key_event(key(KeyCode::Char('r'))).unwrap().is_none());
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ToggleHelp)
        ));
    }

    #[test]
    fn filter_actions_reach_the_store() {
        let mut app = loaded_app();
        app.process_action(&Action::SetSearch("an".into())).unwrap();
        app.process_action(&Action::CycleRegion { forward: true }).unwrap();

        assert_eq!(app.store.region_filter(), Some("Asia"));
        let names: Vec<_> = app
            .store
            .filtered()
            .iter()
            .map(|c| c.name.common.clone())
            .collect();
        assert_eq!(names, ["Japan"]);

        app.process_action(&Action::ClearSearch).unwrap();
        assert_eq!(app.store.search_term(), "");
    }

    #[test]
    fn border_selection_moves_detail() {
        let mut app = loaded_app();
        app.process_action(&Action::SelectBorder(CountryCode::new("DEU")))
            .unwrap();
        assert_eq!(app.store.selected().unwrap().name.common, "Germany");

        app.process_action(&Action::SelectBorder(CountryCode::new("ESP")))
            .unwrap();
        assert_eq!(app.store.selected().unwrap().name.common, "Germany");
    }
}

//! Error screen with the classified failure and a single "Try Again" action.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use atlas_core::{Phase, ViewStore};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct FailureScreen;

impl FailureScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Component for FailureScreen {
    fn handle_key_event(&mut self, key: KeyEvent, _store: &ViewStore) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('t') => Ok(Some(Action::RequestRetry)),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, store: &ViewStore) {
        let message = match store.phase() {
            Phase::Failed(err) => err.to_string(),
            Phase::Loading | Phase::Ready => String::new(),
        };

        let [panel] = Layout::vertical([Constraint::Length(9)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::horizontal([Constraint::Max(72)])
            .flex(Flex::Center)
            .areas(panel);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let lines = vec![
            Line::from(Span::styled("Error Loading Data", theme::error_title())),
            Line::from(""),
            Line::from(Span::styled(message, theme::field_value())),
            Line::from(""),
            Line::from(Span::styled(" Try Again ", theme::button())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" retry  ", theme::key_hint()),
                Span::styled("q", theme::key_hint_key()),
                Span::styled(" quit", theme::key_hint()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }

    fn id(&self) -> &'static str {
        "failure"
    }
}

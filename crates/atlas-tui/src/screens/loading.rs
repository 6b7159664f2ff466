//! Loading screen: spinner while a fetch is in flight. No controls.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use throbber_widgets_tui::{Throbber, ThrobberState};

use atlas_core::ViewStore;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub const LOADING_LABEL: &str = "Loading country data...";

pub struct LoadingScreen {
    throbber_state: ThrobberState,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self {
            throbber_state: ThrobberState::default(),
        }
    }
}

impl Component for LoadingScreen {
    fn update(&mut self, action: &Action, _store: &ViewStore) -> Result<Option<Action>> {
        if let Action::Tick = action {
            self.throbber_state.calc_next();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, _store: &ViewStore) {
        let [row] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let label_width = u16::try_from(LOADING_LABEL.len() + 3).unwrap_or(u16::MAX);
        let [cell] = Layout::horizontal([Constraint::Length(label_width)])
            .flex(Flex::Center)
            .areas(row);

        let throbber = Throbber::default()
            .label(LOADING_LABEL)
            .style(Style::default().fg(theme::DIM_WHITE))
            .throbber_style(Style::default().fg(theme::OCEAN_BLUE));

        frame.render_stateful_widget(throbber, cell, &mut self.throbber_state.clone());
    }

    fn id(&self) -> &'static str {
        "loading"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn shows_loading_label() {
        let screen = LoadingScreen::new();
        let store = ViewStore::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area(), &store))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(LOADING_LABEL));
    }
}

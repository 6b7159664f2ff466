//! Component trait: the building block for every screen.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use atlas_core::{Effect, ViewStore};

use crate::action::Action;

/// Every screen implements Component.
///
/// The app owns the [`ViewStore`] and lends it out read-only; components
/// keep only presentation state (cursors, scroll offsets, input mode) and
/// request changes by returning actions.
///
/// Lifecycle: (`handle_key_event` | `update` | `apply_effect` | `render`)*
pub trait Component: Send {
    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent, _store: &ViewStore) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Observe an action after the store has applied it. May return a
    /// follow-up action.
    fn update(&mut self, _action: &Action, _store: &ViewStore) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Apply a side effect requested by a store transition.
    fn apply_effect(&mut self, _effect: Effect) {}

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect, store: &ViewStore);

    /// Whether the component is consuming raw text input, in which case
    /// global single-key shortcuts are suspended.
    fn captures_input(&self) -> bool {
        false
    }

    /// Unique identifier for this component.
    #[allow(dead_code)]
    fn id(&self) -> &'static str;
}

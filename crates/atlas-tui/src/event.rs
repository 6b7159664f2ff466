//! Event source for the app loop: terminal input merged with the tick and
//! render clocks.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::warn;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Spinner animation tick.
    Tick,
    Render,
}

/// Polled directly by the app loop; every call waits for whichever source
/// fires first.
pub struct EventReader {
    input: EventStream,
    tick: Interval,
    render: Interval,
}

impl EventReader {
    /// Must be called inside the tokio runtime.
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        Self {
            input: EventStream::new(),
            tick: clock(tick_rate),
            render: clock(render_rate),
        }
    }

    /// Next event, or `None` once terminal input has ended or failed.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Some(Event::Tick),
                _ = self.render.tick() => return Some(Event::Render),
                input = self.input.next() => match input {
                    Some(Ok(raw)) => {
                        if let Some(event) = translate(raw) {
                            return Some(event);
                        }
                    }
                    Some(Err(err)) => {
                        warn!(error = %err, "terminal input failed");
                        return None;
                    }
                    None => return None,
                },
            }
        }
    }
}

/// Late ticks are dropped rather than replayed in a burst.
fn clock(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Key presses and resizes; releases, repeats, focus and paste are ignored.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    use super::*;

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_presses_and_resizes_pass() {
        assert!(matches!(translate(key(KeyEventKind::Press)), Some(Event::Key(_))));
        assert!(translate(key(KeyEventKind::Release)).is_none());
        assert!(matches!(
            translate(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        ));
        assert!(translate(CrosstermEvent::FocusGained).is_none());
    }
}

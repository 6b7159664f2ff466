//! Inline chips for neighbouring country codes.

use ratatui::text::{Line, Span};

use atlas_core::CountryCode;

use crate::theme;

/// One line of ` CODE ` chips separated by spaces. `active` highlights the
/// chip under the cursor; `None` renders all chips alike.
pub fn render_chips(codes: &[CountryCode], active: Option<usize>) -> Line<'static> {
    let mut spans = Vec::with_capacity(codes.len() * 2);
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if active == Some(i) {
            theme::chip_active()
        } else {
            theme::chip()
        };
        spans.push(Span::styled(format!(" {code} "), style));
    }
    Line::from(spans)
}

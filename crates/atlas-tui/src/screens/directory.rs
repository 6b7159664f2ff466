//! Directory screen: title header, search bar, region selector, detail
//! panel, and the grid of filtered countries.

use std::cell::Cell;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use atlas_core::{ALL_REGIONS, Country, Effect, ViewStore};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::number_fmt::{fmt_area, fmt_coordinates, fmt_list, fmt_thousands};
use crate::widgets::{chips, sub_tabs};

/// Width of one grid cell, padding included.
const CELL_WIDTH: u16 = 24;
/// Lines per grid cell: name, then region.
const CELL_HEIGHT: u16 = 2;
/// Lines moved by Ctrl+d / Ctrl+u in the detail panel.
const DETAIL_SCROLL_STEP: u16 = 5;
pub const EMPTY_MESSAGE: &str = "No countries found matching your criteria";
pub const HEADER_TITLE: &str = "Global Country";

/// Which panel arrow keys drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Grid,
    Borders,
}

pub struct DirectoryScreen {
    focus: Focus,
    editing_search: bool,
    /// Index into the filtered list.
    cursor: usize,
    /// Index into the selected country's sorted borders.
    border_cursor: usize,
    detail_scroll: u16,
    /// Grid columns at the last render; vertical moves step by this much.
    columns: Cell<usize>,
}

impl DirectoryScreen {
    pub fn new() -> Self {
        Self {
            focus: Focus::Grid,
            editing_search: false,
            cursor: 0,
            border_cursor: 0,
            detail_scroll: 0,
            columns: Cell::new(1),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, store: &ViewStore) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.editing_search = false;
                Some(Action::ClearSearch)
            }
            KeyCode::Char('u') if ctrl => Some(Action::ClearSearch),
            KeyCode::Enter => {
                self.editing_search = false;
                None
            }
            KeyCode::Backspace => {
                let mut term = store.search_term().to_owned();
                term.pop()?;
                Some(Action::SetSearch(term))
            }
            KeyCode::Char(c) if !ctrl => {
                let mut term = store.search_term().to_owned();
                term.push(c);
                Some(Action::SetSearch(term))
            }
            _ => None,
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent, store: &ViewStore) -> Option<Action> {
        let filtered = store.filtered();
        let len = filtered.len();
        if len == 0 {
            return None;
        }
        let cols = self.columns.get().max(1);
        let last = len - 1;
        self.cursor = self.cursor.min(last);

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => self.cursor = (self.cursor + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => {
                if self.cursor >= cols {
                    self.cursor -= cols;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + cols <= last {
                    self.cursor += cols;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = last,
            KeyCode::Enter => {
                return filtered
                    .get(self.cursor)
                    .map(|c| Action::SelectCountry(Arc::clone(c)));
            }
            _ => {}
        }
        None
    }

    fn handle_border_key(&mut self, key: KeyEvent, store: &ViewStore) -> Option<Action> {
        let borders = store.selected().map(|c| c.sorted_borders()).unwrap_or_default();
        if borders.is_empty() {
            self.focus = Focus::Grid;
            return None;
        }
        let last = borders.len() - 1;
        self.border_cursor = self.border_cursor.min(last);

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.border_cursor = self.border_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.border_cursor = (self.border_cursor + 1).min(last);
            }
            KeyCode::Home | KeyCode::Char('g') => self.border_cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.border_cursor = last,
            KeyCode::Enter => {
                return borders
                    .into_iter()
                    .nth(self.border_cursor)
                    .map(Action::SelectBorder);
            }
            _ => {}
        }
        None
    }

    fn toggle_focus(&mut self, store: &ViewStore) {
        self.focus = match self.focus {
            Focus::Borders => Focus::Grid,
            Focus::Grid => {
                let has_borders = store.selected().is_some_and(|c| !c.borders.is_empty());
                if has_borders {
                    self.border_cursor = 0;
                    Focus::Borders
                } else {
                    Focus::Grid
                }
            }
        };
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_search(&self, frame: &mut Frame, area: Rect, store: &ViewStore) {
        let block = Block::default()
            .title(" Search ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.editing_search {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let term = store.search_term();
        let line = if term.is_empty() && !self.editing_search {
            Line::from(vec![
                Span::styled("Search for a country...  ", theme::key_hint()),
                Span::styled("/", theme::key_hint_key()),
            ])
        } else if self.editing_search {
            Line::from(vec![
                Span::styled(term.to_owned(), theme::field_value()),
                Span::styled("▏", theme::key_hint_key()),
                Span::styled("   Esc ", theme::key_hint_key()),
                Span::styled("clear  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("done", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled(term.to_owned(), theme::field_value()),
                Span::styled("   c ", theme::key_hint_key()),
                Span::styled("Clear", theme::key_hint()),
            ])
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_regions(frame: &mut Frame, area: Rect, store: &ViewStore) {
        let options = store.region_options();
        let active = options
            .iter()
            .position(|o| o.as_deref() == store.region_filter())
            .unwrap_or(0);
        let labels: Vec<&str> = options
            .iter()
            .map(|o| o.as_deref().unwrap_or(ALL_REGIONS))
            .collect();

        let mut line = sub_tabs::render_sub_tabs(&labels, active);
        line.spans.insert(0, Span::styled(" Region (r/R)  ", theme::key_hint()));
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, store: &ViewStore) {
        let title = store
            .selected()
            .map_or_else(|| " Details ".to_owned(), |c| format!(" {} ", c.name.common));
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focus == Focus::Borders {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let active_chip = (self.focus == Focus::Borders).then_some(self.border_cursor);
        let lines = store.selected().map_or_else(
            || vec![Line::from(Span::styled("No country selected", theme::key_hint()))],
            |country| detail_lines(country, active_chip),
        );

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.detail_scroll, 0)),
            area,
        );
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, store: &ViewStore) {
        let filtered = store.filtered();
        let block = Block::default()
            .title(format!(
                " Countries ({}/{}) ",
                filtered.len(),
                store.countries().len()
            ))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focus == Focus::Grid && !self.editing_search {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = usize::from((inner.width / CELL_WIDTH).max(1));
        self.columns.set(cols);

        if filtered.is_empty() {
            let [row] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(inner);
            frame.render_widget(
                Paragraph::new(Span::styled(EMPTY_MESSAGE, theme::key_hint()))
                    .alignment(Alignment::Center),
                row,
            );
            return;
        }

        let cursor = self.cursor.min(filtered.len() - 1);
        let visible_rows = usize::from(inner.height / CELL_HEIGHT).max(1);
        let first_row = (cursor / cols).saturating_sub(visible_rows - 1);
        let text_width = usize::from(CELL_WIDTH) - 2;
        let selected = store.selected();
        let cell = |text: &str, style| {
            let text: String = text.chars().take(text_width).collect();
            Span::styled(format!(" {text:<text_width$} "), style)
        };

        let lines: Vec<Line> = filtered
            .chunks(cols)
            .enumerate()
            .skip(first_row)
            .take(visible_rows)
            .flat_map(|(row, countries)| {
                let mut names = Vec::with_capacity(countries.len());
                let mut regions = Vec::with_capacity(countries.len());
                for (col, country) in countries.iter().enumerate() {
                    let index = row * cols + col;
                    let (name_style, region_style) = if index == cursor {
                        (theme::grid_cursor(), theme::grid_cursor())
                    } else if selected.is_some_and(|s| Arc::ptr_eq(s, country)) {
                        (theme::grid_selected(), theme::grid_selected())
                    } else {
                        (theme::grid_cell(), theme::key_hint())
                    };
                    names.push(cell(&country.name.common, name_style));
                    regions.push(cell(&country.region, region_style));
                }
                [Line::from(names), Line::from(regions)]
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<13}"), theme::field_label()),
        Span::styled(value, theme::field_value()),
    ])
}

/// Every line of the detail panel for one country.
fn detail_lines(country: &Country, active_chip: Option<usize>) -> Vec<Line<'static>> {
    let svg = if country.flags.svg.is_empty() {
        "N/A".to_owned()
    } else {
        country.flags.svg.clone()
    };
    let borders = country.sorted_borders();

    let mut lines = vec![
        Line::from(Span::styled(country.name.common.clone(), theme::heading())),
        Line::from(Span::styled(country.name.official.clone(), theme::field_value())),
        Line::from(""),
        field("Capital", country.capital_display()),
        field("Region", country.region.clone()),
        field("Subregion", country.subregion_display().to_owned()),
        field("Population", fmt_thousands(country.population)),
        field("Area", fmt_area(country.area)),
        field("Coordinates", fmt_coordinates(country.coordinates)),
        field("Timezones", fmt_list(&country.timezones)),
        field("Languages", fmt_list(&country.language_names())),
        field("Currencies", fmt_list(&country.currency_labels())),
        Line::from(""),
        field("Flag", country.flags.png.clone()),
        field("Flag (SVG)", svg),
        Line::from(""),
        Line::from(Span::styled("Border Countries", theme::field_label())),
    ];

    if borders.is_empty() {
        lines.push(Line::from(Span::styled(
            "No bordering countries",
            theme::key_hint(),
        )));
    } else {
        lines.push(chips::render_chips(&borders, active_chip));
        lines.push(Line::from(vec![
            Span::styled("b", theme::key_hint_key()),
            Span::styled(" focus  ", theme::key_hint()),
            Span::styled("←/→", theme::key_hint_key()),
            Span::styled(" move  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" open", theme::key_hint()),
        ]));
    }
    lines
}

impl Component for DirectoryScreen {
    fn handle_key_event(&mut self, key: KeyEvent, store: &ViewStore) -> Result<Option<Action>> {
        if self.editing_search {
            return Ok(self.handle_search_key(key, store));
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('/') => {
                self.editing_search = true;
                None
            }
            KeyCode::Char('d') if ctrl => {
                self.detail_scroll = self.detail_scroll.saturating_add(DETAIL_SCROLL_STEP);
                None
            }
            KeyCode::Char('u') if ctrl => {
                self.detail_scroll = self.detail_scroll.saturating_sub(DETAIL_SCROLL_STEP);
                None
            }
            KeyCode::Char('r') => Some(Action::CycleRegion { forward: true }),
            KeyCode::Char('R') => Some(Action::CycleRegion { forward: false }),
            KeyCode::Char('b') | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus(store);
                None
            }
            KeyCode::Esc if self.focus == Focus::Borders => {
                self.focus = Focus::Grid;
                None
            }
            KeyCode::Char('c') | KeyCode::Esc => {
                (!store.search_term().is_empty()).then_some(Action::ClearSearch)
            }
            _ => match self.focus {
                Focus::Grid => self.handle_grid_key(key, store),
                Focus::Borders => self.handle_border_key(key, store),
            },
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action, store: &ViewStore) -> Result<Option<Action>> {
        match action {
            Action::SetSearch(_) | Action::ClearSearch | Action::CycleRegion { .. } => {
                self.cursor = 0;
            }
            Action::SelectCountry(_) | Action::SelectBorder(_) => {
                self.border_cursor = 0;
                let Some(selected) = store.selected() else {
                    return Ok(None);
                };
                if selected.borders.is_empty() {
                    self.focus = Focus::Grid;
                }
                if let Some(index) = store.filtered().iter().position(|c| Arc::ptr_eq(c, selected)) {
                    self.cursor = index;
                }
            }
            Action::CatalogLoaded { .. } => {
                self.cursor = 0;
                self.border_cursor = 0;
                self.focus = Focus::Grid;
                self.detail_scroll = 0;
            }
            _ => {}
        }
        Ok(None)
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScrollToTop => self.detail_scroll = 0,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, store: &ViewStore) {
        let [header_area, search_area, region_area, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(HEADER_TITLE, theme::heading()))
                .alignment(Alignment::Center),
            header_area,
        );
        self.render_search(frame, search_area, store);
        Self::render_regions(frame, region_area, store);

        // Nothing to show details for once the filter empties the grid.
        if store.filtered().is_empty() {
            self.render_grid(frame, body, store);
            return;
        }
        let [detail_area, grid_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(body);
        self.render_detail(frame, detail_area, store);
        self.render_grid(frame, grid_area, store);
    }

    fn captures_input(&self) -> bool {
        self.editing_search
    }

    fn id(&self) -> &'static str {
        "directory"
    }
}

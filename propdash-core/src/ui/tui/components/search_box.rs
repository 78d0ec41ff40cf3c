use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::search::{NavKey, SearchView, ViewStatus};
use crate::ui::tui::{action::Action, types::PickerTheme};

const PROMPT_PREFIX: &str = "❯ ";

#[derive(Debug, Default)]
struct InputState {
    value: String,
    cursor: usize,
}

impl InputState {
    fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    fn insert(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(index, _)| index)
            .unwrap_or(0);
        self.value.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        let end = self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(index, _)| self.cursor + index)
            .unwrap_or_else(|| self.value.len());
        self.value.drain(self.cursor..end);
        true
    }

    fn move_left(&mut self) {
        self.cursor = self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(index, _)| index)
            .unwrap_or(0);
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(index, _)| self.cursor + index)
            .unwrap_or_else(|| self.value.len());
    }

    fn prefix(&self) -> &str {
        &self.value[..self.cursor]
    }
}

/// Text input plus dropdown. Remembers where it drew itself so pointer
/// events can be mapped back to rows.
#[derive(Debug, Default)]
pub struct SearchBox {
    input: InputState,
    bounds: Rect,
    rows_area: Rect,
    row_offset: usize,
    row_count: usize,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the controller's text, e.g. after a commit rewrote it.
    pub fn sync(&mut self, text: &str) {
        if self.input.value != text {
            self.input.set(text);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => {
                    self.input.set("");
                    Action::Edit(String::new())
                }
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Up => Action::Navigate(NavKey::ArrowUp),
            KeyCode::Down => Action::Navigate(NavKey::ArrowDown),
            KeyCode::Enter => Action::Navigate(NavKey::Enter),
            KeyCode::Esc => Action::Navigate(NavKey::Escape),
            KeyCode::Char(ch) => {
                self.input.insert(ch);
                Action::Edit(self.input.value.clone())
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    Action::Edit(self.input.value.clone())
                } else {
                    Action::None
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    Action::Edit(self.input.value.clone())
                } else {
                    Action::None
                }
            }
            KeyCode::Left => {
                self.input.move_left();
                Action::Redraw
            }
            KeyCode::Right => {
                self.input.move_right();
                Action::Redraw
            }
            KeyCode::Home => {
                self.input.cursor = 0;
                Action::Redraw
            }
            KeyCode::End => {
                self.input.cursor = self.input.value.len();
                Action::Redraw
            }
            _ => Action::None,
        }
    }

    /// Whether a pointer position lies inside the input or the open dropdown.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.bounds.contains(Position::new(column, row))
    }

    /// Index into the displayed list for a pointer position, if it is on a row.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.rows_area.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.row_offset + usize::from(row - self.rows_area.y);
        (index < self.row_offset + self.row_count).then_some(index)
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect, view: &SearchView<'_>, theme: &PickerTheme) {
        let input_area = Rect { height: area.height.min(3), ..area };
        let block = Block::default().borders(Borders::ALL).title("Player");
        let inner = block.inner(input_area);

        let mut spans = vec![Span::styled(PROMPT_PREFIX, theme.primary())];
        if view.text.is_empty() {
            spans.push(Span::styled(view.placeholder.to_string(), theme.muted()));
        } else {
            spans.push(Span::raw(view.text.to_string()));
        }
        frame.render_widget(Clear, input_area);
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);

        let cursor_x = inner.x
            + UnicodeWidthStr::width(PROMPT_PREFIX) as u16
            + UnicodeWidthStr::width(self.input.prefix()) as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));

        self.bounds = input_area;
        self.rows_area = Rect::default();
        self.row_count = 0;

        if !view.open {
            return;
        }

        let below = area.height.saturating_sub(input_area.height);
        if below < 3 {
            return;
        }
        let body_rows = match view.status {
            ViewStatus::Rows(players) => players.len() as u16,
            _ => 1,
        };
        let dropdown_area = Rect {
            y: input_area.bottom(),
            height: (body_rows + 2).min(below),
            ..area
        };
        let title = if view.showing_recent { "Recent" } else { "Matches" };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(dropdown_area);
        frame.render_widget(Clear, dropdown_area);
        self.bounds = input_area.union(dropdown_area);

        let lines = match view.status {
            ViewStatus::Loading => vec![Line::from(Span::styled("Searching…", theme.muted()))],
            ViewStatus::Error(message) => {
                vec![Line::from(Span::styled(message.to_string(), theme.error()))]
            }
            ViewStatus::NoResults => vec![Line::from(Span::styled("No results", theme.muted()))],
            ViewStatus::Rows(players) => {
                let visible = usize::from(inner.height);
                self.row_offset = visible_offset(view.highlight, self.row_offset, visible, players.len());
                self.row_count = players.len().saturating_sub(self.row_offset).min(visible);
                self.rows_area = Rect { height: self.row_count as u16, ..inner };

                players
                    .iter()
                    .enumerate()
                    .skip(self.row_offset)
                    .take(visible)
                    .map(|(index, player)| {
                        let line = Line::from(vec![
                            Span::raw(player.full_name.clone()),
                            Span::raw("  "),
                            Span::styled(player.caption(), theme.muted()),
                        ]);
                        if view.highlight == Some(index) {
                            line.style(theme.highlighted())
                        } else {
                            line
                        }
                    })
                    .collect()
            }
        };

        frame.render_widget(Paragraph::new(lines).block(block), dropdown_area);
    }
}

/// First visible row so that `highlight` stays on screen.
fn visible_offset(highlight: Option<usize>, current: usize, visible: usize, len: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    let max_offset = len - visible;
    let offset = current.min(max_offset);
    match highlight {
        Some(index) if index < offset => index,
        Some(index) if index >= offset + visible => index + 1 - visible,
        _ => offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_reports_full_text() {
        let mut search_box = SearchBox::new();
        search_box.handle_key(key(KeyCode::Char('t')));
        let action = search_box.handle_key(key(KeyCode::Char('a')));
        assert_eq!(action, Action::Edit("ta".to_string()));

        search_box.handle_key(key(KeyCode::Left));
        let action = search_box.handle_key(key(KeyCode::Backspace));
        assert_eq!(action, Action::Edit("a".to_string()));
    }

    #[test]
    fn backspace_on_empty_input_is_not_an_edit() {
        let mut search_box = SearchBox::new();
        assert_eq!(search_box.handle_key(key(KeyCode::Backspace)), Action::None);
    }

    #[test]
    fn arrows_and_enter_navigate() {
        let mut search_box = SearchBox::new();
        assert_eq!(
            search_box.handle_key(key(KeyCode::Down)),
            Action::Navigate(NavKey::ArrowDown)
        );
        assert_eq!(
            search_box.handle_key(key(KeyCode::Esc)),
            Action::Navigate(NavKey::Escape)
        );
    }

    #[test]
    fn sync_moves_cursor_to_end() {
        let mut search_box = SearchBox::new();
        search_box.sync("Jayson Tatum");
        let action = search_box.handle_key(key(KeyCode::Char('!')));
        assert_eq!(action, Action::Edit("Jayson Tatum!".to_string()));
    }

    #[test]
    fn offset_follows_highlight() {
        assert_eq!(visible_offset(Some(9), 0, 4, 10), 6);
        assert_eq!(visible_offset(Some(1), 6, 4, 10), 1);
        assert_eq!(visible_offset(None, 3, 4, 10), 3);
        assert_eq!(visible_offset(Some(2), 5, 8, 6), 0);
    }
}

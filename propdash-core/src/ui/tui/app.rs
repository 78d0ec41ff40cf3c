use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiError, PricingClient};
use crate::models::{Player, Pricing};
use crate::parlay::ParlaySlip;
use crate::search::{SearchController, SearchEvent};
use crate::ui::tui::{
    action::{Action, SlipAction},
    components::{SearchBox, slip_panel},
    types::PickerTheme,
};

const SLIP_PANEL_ROWS: u16 = 8;

/// Completions from tasks the picker spawned.
#[derive(Debug)]
pub enum Background {
    Search(SearchEvent),
    Priced(Result<Pricing, ApiError>),
}

pub struct App {
    search: SearchController,
    search_box: SearchBox,
    slip: ParlaySlip,
    pricing: PricingClient,
    selections: UnboundedReceiver<Player>,
    priced_tx: UnboundedSender<Result<Pricing, ApiError>>,
    priced_rx: UnboundedReceiver<Result<Pricing, ApiError>>,
    theme: PickerTheme,
    notice: Option<String>,
    needs_redraw: bool,
    should_exit: bool,
}

impl App {
    pub fn new(mut search: SearchController, pricing: PricingClient, theme: PickerTheme) -> Self {
        let (selected_tx, selections) = mpsc::unbounded_channel();
        search.set_on_select(Box::new(move |player: &Player| {
            let _ = selected_tx.send(player.clone());
        }));
        let (priced_tx, priced_rx) = mpsc::unbounded_channel();
        let mut search_box = SearchBox::new();
        search_box.sync(search.text());

        Self {
            search,
            search_box,
            slip: ParlaySlip::new(),
            pricing,
            selections,
            priced_tx,
            priced_rx,
            theme,
            notice: None,
            needs_redraw: true,
            should_exit: false,
        }
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn slip(&self) -> &ParlaySlip {
        &self.slip
    }

    pub fn into_slip(self) -> ParlaySlip {
        self.slip
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn set_should_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn take_redraw(&mut self) -> bool {
        if self.needs_redraw {
            self.needs_redraw = false;
            true
        } else {
            false
        }
    }

    pub fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Wait for the next debounce, lookup or pricing completion.
    pub async fn next_background(&mut self) -> Option<Background> {
        tokio::select! {
            Some(event) = self.search.next_event() => Some(Background::Search(event)),
            Some(outcome) = self.priced_rx.recv() => Some(Background::Priced(outcome)),
            else => None,
        }
    }

    pub fn handle_background(&mut self, background: Background) {
        match background {
            Background::Search(event) => self.search.handle_event(event),
            Background::Priced(outcome) => {
                if let Err(error) = &outcome {
                    tracing::debug!(%error, "pricing failed");
                }
                self.slip.finish_pricing(outcome);
            }
        }
        self.mark_redraw();
    }

    pub fn handle_event(&mut self, event: CrosstermEvent) {
        let action = match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => self.map_key(key),
            CrosstermEvent::Mouse(mouse) => self.map_mouse(mouse),
            CrosstermEvent::FocusLost => Action::Outside,
            CrosstermEvent::FocusGained | CrosstermEvent::Resize(_, _) => Action::Redraw,
            _ => Action::None,
        };
        self.handle_action(action);
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::None => return,
            Action::Redraw => {}
            Action::Edit(text) => {
                self.notice = None;
                self.search.on_input_change(&text);
            }
            Action::Navigate(key) => {
                self.search.on_key(key);
            }
            Action::Focus => self.search.on_focus(),
            Action::Outside => self.search.on_outside_interaction(),
            Action::Hover(index) => self.search.on_hover(index),
            Action::Click(index) => self.search.on_row_click(index),
            Action::Slip(action) => self.apply_slip(action),
            Action::Exit => self.set_should_exit(),
        }

        while let Ok(player) = self.selections.try_recv() {
            tracing::debug!(id = player.id, name = %player.full_name, "player selected");
            self.slip.select(&player);
        }
        self.search_box.sync(self.search.text());
        self.mark_redraw();
    }

    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(SLIP_PANEL_ROWS), Constraint::Min(3)])
            .split(frame.area());
        slip_panel::render(frame, layout[0], &self.slip, self.notice.as_deref(), &self.theme);
        let view = self.search.view();
        self.search_box.render(frame, layout[1], &view, &self.theme);
    }

    fn map_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('d') => return Action::Exit,
                KeyCode::Char('a') => return Action::Slip(SlipAction::AddLeg),
                KeyCode::Char('t') => return Action::Slip(SlipAction::CycleProp),
                KeyCode::Char('r') => return Action::Slip(SlipAction::Reset),
                KeyCode::Char('g') => return Action::Slip(SlipAction::Price),
                KeyCode::Char('x') => return Action::Slip(SlipAction::ChangePlayer),
                _ => {}
            }
        }
        match key.code {
            KeyCode::PageUp => Action::Slip(SlipAction::RaiseThreshold),
            KeyCode::PageDown => Action::Slip(SlipAction::LowerThreshold),
            _ => self.search_box.handle_key(key),
        }
    }

    fn map_mouse(&self, mouse: MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.search_box.row_at(mouse.column, mouse.row) {
                    Action::Click(index)
                } else if self.search_box.contains(mouse.column, mouse.row) {
                    Action::Focus
                } else {
                    Action::Outside
                }
            }
            MouseEventKind::Moved => self
                .search_box
                .row_at(mouse.column, mouse.row)
                .map(Action::Hover)
                .unwrap_or(Action::None),
            _ => Action::None,
        }
    }

    fn apply_slip(&mut self, action: SlipAction) {
        self.notice = None;
        let result = match action {
            SlipAction::AddLeg => self.slip.add_leg().map(|_| ()),
            SlipAction::CycleProp => {
                self.slip.cycle_prop();
                Ok(())
            }
            SlipAction::RaiseThreshold => {
                self.slip.raise_threshold();
                Ok(())
            }
            SlipAction::LowerThreshold => {
                self.slip.lower_threshold();
                Ok(())
            }
            SlipAction::Reset => self.slip.reset(),
            SlipAction::ChangePlayer => {
                self.slip.clear_selection();
                Ok(())
            }
            SlipAction::Price => self.slip.begin_pricing().map(|legs| {
                let pricing = self.pricing.clone();
                let sender = self.priced_tx.clone();
                tokio::spawn(async move {
                    let outcome = pricing.price(&legs).await;
                    let _ = sender.send(outcome);
                });
            }),
        };
        if let Err(error) = result {
            self.notice = Some(error.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, SearchProvider, SearchRequest};
    use crate::search::SearchOptions;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use std::time::Duration;

    struct Roster;

    #[async_trait]
    impl SearchProvider for Roster {
        async fn search(&self, _request: &SearchRequest) -> Result<Vec<Player>, ApiError> {
            Ok(vec![
                Player::new(201, "Jayson Tatum", Some("BOS")),
                Player::new(202, "Jaylen Brown", Some("BOS")),
            ])
        }
    }

    fn app() -> App {
        let search = SearchController::new(
            SearchOptions::default(),
            Arc::new(Roster),
            Box::new(MemoryStore::new()),
        );
        App::new(
            search,
            PricingClient::new(ApiClient::new("http://127.0.0.1:9")),
            PickerTheme::default(),
        )
    }

    fn press(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(ch: char) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    async fn settle(app: &mut App) {
        while let Ok(Some(background)) =
            tokio::time::timeout(Duration::from_secs(1), app.next_background()).await
        {
            app.handle_background(background);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn enter_selects_into_slip() {
        let mut app = app();
        for ch in "tat".chars() {
            app.handle_event(press(KeyCode::Char(ch)));
        }
        settle(&mut app).await;
        assert_eq!(app.search().results().len(), 2);

        app.handle_event(press(KeyCode::Down));
        app.handle_event(press(KeyCode::Enter));

        assert_eq!(app.slip().selected().map(|p| p.id), Some(201));
        assert_eq!(app.search().text(), "Jayson Tatum");
        assert!(!app.search().is_open());

        app.handle_event(ctrl('a'));
        assert_eq!(app.slip().summary(), "201:pts≥25");
    }

    #[tokio::test(start_paused = true)]
    async fn add_leg_without_player_sets_notice() {
        let mut app = app();
        app.handle_event(ctrl('a'));
        assert_eq!(app.notice(), Some("Pick a player first"));
        app.handle_event(ctrl('g'));
        assert_eq!(app.notice(), Some("Add at least one leg first"));
    }

    #[tokio::test(start_paused = true)]
    async fn focus_loss_closes_dropdown() {
        let mut app = app();
        app.handle_event(press(KeyCode::Char('t')));
        assert!(app.search().is_open());
        app.handle_event(CrosstermEvent::FocusLost);
        assert!(!app.search().is_open());
        assert_eq!(app.search().text(), "t");
    }

    #[tokio::test(start_paused = true)]
    async fn clicks_map_to_rows_and_outside() {
        let mut app = app();
        for ch in "ja".chars() {
            app.handle_event(press(KeyCode::Char(ch)));
        }
        settle(&mut app).await;

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        // Slip panel, then the 3-row input box, then the dropdown border.
        let first_row = SLIP_PANEL_ROWS + 3 + 1;
        app.handle_event(mouse(MouseEventKind::Moved, 5, first_row + 1));
        assert_eq!(app.search().highlight(), Some(1));

        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, first_row + 1));
        assert_eq!(app.slip().selected().map(|p| p.id), Some(202));
        assert_eq!(app.search().recent()[0].id, 202);

        app.handle_event(press(KeyCode::Down));
        assert!(app.search().is_open());
        terminal.draw(|frame| app.draw(frame)).unwrap();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 1));
        assert!(!app.search().is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn control_keys_exit() {
        let mut app = app();
        app.handle_event(ctrl('c'));
        assert!(app.should_exit());
    }
}

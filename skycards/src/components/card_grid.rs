//! Grid of weather cards in insertion order

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use skycards_core::location::LocationKey;
use skycards_core::{Component, EventKind};

use super::{WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::AppState;

/// Cards per row
pub const MAX_COLUMNS: usize = 3;

pub struct CardGridProps<'a, K: LocationKey> {
    pub state: &'a AppState<K>,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct CardGrid {
    card: WeatherCard,
}

impl<K: LocationKey> Component<Action<K>> for CardGrid {
    type Props<'a> = CardGridProps<'a, K>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action<K>> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::LocationSelectPrev),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::LocationSelectNext),
            KeyCode::Char('d') | KeyCode::Delete => props
                .state
                .selected_key()
                .cloned()
                .map(Action::LocationRemove),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherRefreshAll),
            KeyCode::Char('u') => Some(Action::UiToggleUnits),
            KeyCode::Char('/') | KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => {
                Some(Action::UiFocusInput)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let count = state.locations.len();

        if count == 0 {
            let hint = Paragraph::new("No locations yet. Press / to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            let [_, middle, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);
            frame.render_widget(hint, middle);
            return;
        }

        let columns = count.min(MAX_COLUMNS);
        let rows = count.div_ceil(columns);
        let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);

        for (index, key) in state.locations.iter().enumerate() {
            let row = row_areas[index / columns];
            let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(row);
            let label = key.to_string();
            let card_props = WeatherCardProps {
                label: &label,
                fetch: state.fetch_state(key),
                units: state.units,
                is_selected: props.is_focused && index == state.selected,
                tick_count: state.tick_count,
            };
            Component::<Action<K>>::render(
                &mut self.card,
                frame,
                cells[index % columns],
                card_props,
            );
        }
    }
}

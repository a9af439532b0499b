//! Top-level view: title bar, location bar, card grid and key hints
//!
//! Routes input to the location bar while it has focus and to the card grid
//! otherwise. Rendering is a pure function of the state passed as props.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders},
    Frame,
};
use skycards_core::location::LocationKey;
use skycards_core::{Component, EventKind};

use super::{
    CardGrid, CardGridProps, HelpBar, HelpBarProps, LocationInput, LocationInputProps,
};
use crate::action::Action;
use crate::state::AppState;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Spinner glyph for an animation tick.
pub fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNERS[(tick_count as usize / 2) % SPINNERS.len()]
}

pub struct DashboardViewProps<'a, K: LocationKey> {
    pub state: &'a AppState<K>,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DashboardView {
    input: LocationInput,
    grid: CardGrid,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_props<K: LocationKey>(
        state: &AppState<K>,
        is_focused: bool,
    ) -> LocationInputProps<'_, Action<K>> {
        LocationInputProps {
            value: &state.input,
            placeholder: K::PLACEHOLDER,
            title: "Add location",
            is_focused,
            max_len: K::MAX_INPUT_LEN,
            error: state.input_error.as_deref(),
            checking: state.pending_add.is_some(),
            on_change: Action::LocationInputChange,
            on_submit: Action::LocationAdd,
        }
    }
}

impl<K: LocationKey> Component<Action<K>> for DashboardView {
    type Props<'a> = DashboardViewProps<'a, K>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action<K>> {
        if let EventKind::Resize(width, height) = event {
            return vec![Action::UiTerminalResize(*width, *height)];
        }
        if !props.is_focused {
            return Vec::new();
        }

        let state = props.state;
        if state.input_focused {
            if let EventKind::Key(key) = event {
                if matches!(key.code, KeyCode::Esc | KeyCode::Tab) {
                    return vec![Action::UiBlurInput];
                }
            }
            let input_props = Self::input_props(state, true);
            return Component::<Action<K>>::handle_event(&mut self.input, event, input_props)
                .into_iter()
                .collect::<Vec<_>>();
        }

        let grid_props = CardGridProps {
            state,
            is_focused: true,
        };
        Component::<Action<K>>::handle_event(&mut self.grid, event, grid_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let loading_indicator = if state.is_loading() {
            format!(" {} ", spinner_frame(state.tick_count))
        } else {
            String::new()
        };

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(
                " ☁ Skycards · {}/{} · {}{}",
                state.locations.len(),
                state.locations.capacity(),
                state.units.temperature_suffix(),
                loading_indicator
            ))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        frame.render_widget(outer_block.clone(), area);
        let inner = outer_block.inner(area);

        let [input_area, grid_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let input_focused = props.is_focused && state.input_focused;
        Component::<Action<K>>::render(
            &mut self.input,
            frame,
            input_area,
            Self::input_props(state, input_focused),
        );

        Component::<Action<K>>::render(
            &mut self.grid,
            frame,
            grid_area,
            CardGridProps {
                state,
                is_focused: props.is_focused && !state.input_focused,
            },
        );

        Component::<Action<K>>::render(
            &mut HelpBar,
            frame,
            help_area,
            HelpBarProps { input_focused },
        );
    }
}

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use skycards_core::Component;

pub struct HelpBar;

pub struct HelpBarProps {
    pub input_focused: bool,
}

const GRID_HINTS: &[(&str, &str)] = &[
    ("←/→", "select"),
    ("/", "add"),
    ("d", "remove"),
    ("r", "refresh"),
    ("u", "units"),
    ("q", "quit"),
];

const INPUT_HINTS: &[(&str, &str)] = &[("enter", "add"), ("ctrl+u", "clear"), ("esc", "back")];

impl<A> Component<A> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let hints = if props.input_focused {
            INPUT_HINTS
        } else {
            GRID_HINTS
        };

        let spans: Vec<Span> = hints
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {}", key), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

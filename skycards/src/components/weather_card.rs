//! One card per tracked location

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use skycards_core::{map_condition_in, Component, SkyTone, Units, WeatherSnapshot};

use super::spinner_frame;
use crate::state::FetchState;

pub const ERROR_ICON: &str = "⚠";

pub struct WeatherCardProps<'a> {
    /// Identifier as the user entered it (ZIP code or city)
    pub label: &'a str,
    /// `None` only for a location that has never been fetched
    pub fetch: Option<&'a FetchState>,
    pub units: Units,
    pub is_selected: bool,
    pub tick_count: u32,
}

#[derive(Default)]
pub struct WeatherCard;

impl WeatherCard {
    /// Provider name, with the identifier alongside when they differ.
    fn title(label: &str, snapshot: &WeatherSnapshot) -> String {
        let name = snapshot.city_name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(label) {
            format!(" {} ", label)
        } else {
            format!(" {} ({}) ", name, label)
        }
    }

    fn ready_lines(snapshot: &WeatherSnapshot, units: Units) -> Vec<Line<'static>> {
        let presentation = map_condition_in(&snapshot.condition, snapshot.temperature, units);

        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("{}  ", presentation.icon.glyph())),
                Span::styled(
                    units.format_temperature(snapshot.temperature),
                    Style::default().fg(Color::Yellow).bold(),
                ),
            ]),
            Line::from(capitalize(&snapshot.description)).fg(Color::White),
            Line::from(presentation.summary).fg(Color::Gray).italic(),
        ];

        let mut details = Vec::new();
        if let Some(feels_like) = snapshot.feels_like {
            details.push(format!("Feels like {}", units.format_temperature(feels_like)));
        }
        if let Some(humidity) = snapshot.humidity {
            details.push(format!("Humidity {}%", humidity));
        }
        if let Some(wind) = snapshot.wind_speed {
            details.push(format!("Wind {} {}", wind, units.speed_suffix()));
        }
        if !details.is_empty() {
            lines.push(Line::default());
            lines.extend(
                details
                    .into_iter()
                    .map(|detail| Line::from(detail).fg(Color::DarkGray)),
            );
        }
        lines
    }
}

impl<A> Component<A> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (title, tint, lines) = match props.fetch {
            Some(FetchState::Ready(snapshot)) => {
                let (r, g, b) = SkyTone::from_description(&snapshot.description).rgb();
                (
                    Self::title(props.label, snapshot),
                    Color::Rgb(r, g, b),
                    Self::ready_lines(snapshot, props.units),
                )
            }
            Some(FetchState::Failed(error)) => (
                format!(" {} ", props.label),
                Color::Red,
                vec![
                    Line::from(format!("{} Error", ERROR_ICON)).fg(Color::Red).bold(),
                    Line::from(error.clone()).fg(Color::Red),
                ],
            ),
            Some(FetchState::Pending) | None => {
                let spinner = spinner_frame(props.tick_count);
                (
                    format!(" {} ", props.label),
                    Color::Rgb(80, 80, 100),
                    vec![Line::from(format!("{} Loading...", spinner)).fg(Color::Cyan)],
                )
            }
        };

        let border_type = if props.is_selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        };
        let mut title_style = Style::default().fg(tint);
        if props.is_selected {
            title_style = title_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(tint))
            .title(Span::styled(title, title_style));

        // Provider artwork can't be drawn here; the selected card links to it
        if props.is_selected {
            if let Some(FetchState::Ready(WeatherSnapshot {
                icon_url: Some(url),
                ..
            })) = props.fetch
            {
                block = block.title_bottom(
                    Line::from(format!(" {} ", url))
                        .fg(Color::DarkGray)
                        .right_aligned(),
                );
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Full-screen render tests for the dashboard view

use skycards::components::{Component, DashboardView, DashboardViewProps};
use skycards::{Action, AppState, FetchState};
use skycards_core::location::{CityName, LocationKey, ZipCode};
use skycards_core::testing::RenderHarness;
use skycards_core::{Units, WeatherSnapshot};

fn render<K: LocationKey>(state: &AppState<K>) -> String {
    let mut harness = RenderHarness::new(120, 30);
    let mut view = DashboardView::new();
    harness.render_to_string_plain(|frame| {
        let area = frame.area();
        let props = DashboardViewProps {
            state,
            is_focused: true,
        };
        Component::<Action<K>>::render(&mut view, frame, area, props);
    })
}

fn zip(code: &str) -> ZipCode {
    ZipCode::parse(code).unwrap()
}

fn rainy(city_name: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: 72,
        condition: "rain".into(),
        description: "light rain".into(),
        city_name: city_name.into(),
        feels_like: Some(70),
        humidity: Some(81),
        wind_speed: Some(9),
        icon_url: None,
    }
}

#[test]
fn test_initial_screen_is_loading() {
    let state = AppState::<ZipCode>::default();
    let output = render(&state);

    assert!(output.contains("Skycards · 3/3 · °F"));
    assert!(output.contains("10001"));
    assert!(output.contains("90210"));
    assert!(output.contains("60601"));
    assert!(output.contains("Loading..."));
    assert!(output.contains("Enter ZIP code"));
}

#[test]
fn test_ready_card() {
    let mut state = AppState::new([zip("10001")], Units::Imperial);
    state
        .fetches
        .insert(zip("10001"), FetchState::Ready(rainy("Testville")));

    let output = render(&state);

    assert!(output.contains("Testville (10001)"));
    assert!(output.contains("72°F"));
    assert!(output.contains("Light rain"));
    assert!(output.contains("Don't forget your umbrella!"));
    assert!(output.contains("Feels like 70°F"));
    assert!(output.contains("Humidity 81%"));
    assert!(output.contains("Wind 9 mph"));
    assert!(!output.contains("Loading"));
}

#[test]
fn test_nameless_snapshot_uses_zip() {
    let mut state = AppState::new([zip("90210")], Units::Imperial);
    state
        .fetches
        .insert(zip("90210"), FetchState::Ready(rainy("")));

    let output = render(&state);

    assert!(output.contains("90210"));
    assert!(!output.contains("()"));
}

#[test]
fn test_failed_card_shows_message() {
    let mut state = AppState::new([zip("10001"), zip("60601")], Units::Imperial);
    state.fetches.insert(
        zip("10001"),
        FetchState::Failed("Weather API error (404): city not found".into()),
    );
    state
        .fetches
        .insert(zip("60601"), FetchState::Ready(rainy("Chicago")));

    let output = render(&state);

    assert!(output.contains("⚠ Error"));
    assert!(output.contains("Weather API error (404)"));
    assert!(output.contains("Chicago (60601)"));
    assert!(!output.contains("Loading"));
}

#[test]
fn test_empty_city_list_shows_hint() {
    let state = AppState::<CityName>::new(Vec::new(), Units::Metric);
    let output = render(&state);

    assert!(output.contains("No locations yet. Press / to add one."));
    assert!(output.contains("0/5"));
    assert!(output.contains("°C"));
    assert!(output.contains("Enter city name"));
}

#[test]
fn test_help_bar_follows_focus() {
    let mut state = AppState::<CityName>::default();
    let output = render(&state);
    assert!(output.contains("refresh"));
    assert!(output.contains("units"));
    assert!(output.contains("quit"));

    state.input_focused = true;
    state.input = "Lima".into();
    let output = render(&state);
    assert!(output.contains("Lima"));
    assert!(output.contains("esc"));
    assert!(!output.contains("quit"));
}

#[test]
fn test_refused_city_message_under_location_bar() {
    let mut state = AppState::<CityName>::default();
    state.input_focused = true;
    state.input = "Atlantis".into();
    state.input_error = Some("Weather API error (404): city not found".into());

    let output = render(&state);

    assert!(output.contains("Atlantis"));
    assert!(output.contains("⚠ Weather API error (404): city not found"));
    assert!(output.contains("3/5"));
}

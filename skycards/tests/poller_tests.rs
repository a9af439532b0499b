//! Runtime tests: the dashboard loop against a scripted weather source,
//! on a paused clock.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use skycards::{Action, AppState, Dashboard, FetchState};
use skycards_core::location::{CityName, LocationKey, ZipCode};
use skycards_core::{ProviderError, Units, WeatherSnapshot, WeatherSource};

/// Answers every request after `delay`; locations in `failing` get a 404.
#[derive(Clone, Default)]
struct ScriptedSource {
    delay: Duration,
    failing: Arc<HashSet<String>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    fn failing(mut self, ids: &[&str]) -> Self {
        self.failing = Arc::new(ids.iter().map(|id| id.to_string()).collect());
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WeatherSource for ScriptedSource {
    fn fetch<K: LocationKey>(
        &self,
        key: &K,
        units: Units,
    ) -> impl Future<Output = Result<WeatherSnapshot, ProviderError>> + Send {
        let id = key.to_string();
        let source = self.clone();
        async move {
            source.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(source.delay).await;
            if source.failing.contains(&id) {
                return Err(ProviderError::Http {
                    status: 404,
                    body: "city not found".into(),
                });
            }
            Ok(WeatherSnapshot {
                temperature: match units {
                    Units::Imperial => 72,
                    Units::Metric => 22,
                },
                condition: "clear".into(),
                description: "clear sky".into(),
                city_name: format!("Town {}", id),
                ..Default::default()
            })
        }
    }
}

fn zip(code: &str) -> ZipCode {
    ZipCode::parse(code).unwrap()
}

fn dashboard(source: ScriptedSource, refresh_every: Duration) -> Dashboard<ZipCode, ScriptedSource> {
    let state = AppState::new(ZipCode::defaults(), Units::Imperial);
    Dashboard::new(state, source, refresh_every)
}

fn city_dashboard(source: ScriptedSource) -> Dashboard<CityName, ScriptedSource> {
    let state = AppState::new(CityName::defaults(), Units::Metric);
    Dashboard::new(state, source, Duration::from_secs(60))
}

fn city(name: &str) -> CityName {
    CityName::parse(name).unwrap()
}

fn temperature(state: &AppState<ZipCode>, code: &str) -> Option<i32> {
    match state.fetch_state(&zip(code)) {
        Some(FetchState::Ready(snapshot)) => Some(snapshot.temperature),
        _ => None,
    }
}

#[tokio::test(start_paused = true)]
async fn test_start_fetches_every_location() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = dashboard(source.clone(), Duration::from_secs(60));

    dashboard.start();
    dashboard.process_pending();
    assert!(dashboard.state().is_loading());

    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    assert_eq!(source.calls(), 3);
    assert!(!dashboard.state().is_loading());
    for code in ["10001", "90210", "60601"] {
        assert_eq!(temperature(dashboard.state(), code), Some(72));
    }
}

#[tokio::test(start_paused = true)]
async fn test_refresh_timer_refetches_all() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = dashboard(source.clone(), Duration::from_secs(1));

    dashboard.start();
    dashboard.process_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();
    assert_eq!(source.calls(), 3);

    tokio::time::sleep(Duration::from_secs(1)).await;
    dashboard.process_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    assert_eq!(source.calls(), 6);
    assert!(!dashboard.state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_one_failure_does_not_block_others() {
    let source = ScriptedSource::new(Duration::from_millis(10)).failing(&["90210"]);
    let mut dashboard = dashboard(source, Duration::from_secs(60));

    dashboard.start();
    dashboard.process_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    let state = dashboard.state();
    assert_eq!(temperature(state, "10001"), Some(72));
    assert_eq!(temperature(state, "60601"), Some(72));
    match state.fetch_state(&zip("90210")) {
        Some(FetchState::Failed(message)) => {
            assert_eq!(message, "Weather API error (404): city not found")
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_removed_location_never_reappears() {
    let source = ScriptedSource::new(Duration::from_millis(500));
    let mut dashboard = dashboard(source, Duration::from_secs(60));

    dashboard.start();
    dashboard.process_pending();
    assert!(dashboard.fetches().is_in_flight(&zip("90210")));

    dashboard.dispatch(Action::LocationRemove(zip("90210")));
    assert!(!dashboard.fetches().is_in_flight(&zip("90210")));

    tokio::time::sleep(Duration::from_secs(1)).await;
    dashboard.process_pending();

    let state = dashboard.state();
    assert!(!state.locations.contains(&zip("90210")));
    assert_eq!(state.fetch_state(&zip("90210")), None);
    assert_eq!(temperature(state, "10001"), Some(72));
    assert_eq!(temperature(state, "60601"), Some(72));
}

#[tokio::test(start_paused = true)]
async fn test_late_result_for_removed_location_is_dropped() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = dashboard(source, Duration::from_secs(60));

    dashboard.dispatch(Action::LocationRemove(zip("60601")));
    let changed = dashboard.dispatch(Action::WeatherDidLoad {
        key: zip("60601"),
        units: Units::Imperial,
        snapshot: WeatherSnapshot::default(),
    });

    assert!(!changed);
    assert_eq!(dashboard.state().fetch_state(&zip("60601")), None);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_units_refetches_in_new_units() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = dashboard(source.clone(), Duration::from_secs(60));

    dashboard.start();
    dashboard.process_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    dashboard.dispatch(Action::UiToggleUnits);
    assert_eq!(dashboard.state().units, Units::Metric);
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    assert_eq!(source.calls(), 6);
    assert_eq!(temperature(dashboard.state(), "10001"), Some(22));
}

#[tokio::test(start_paused = true)]
async fn test_adding_to_full_zip_list_evicts_oldest() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = dashboard(source, Duration::from_secs(60));

    dashboard.start();
    dashboard.process_pending();
    dashboard.dispatch(Action::LocationAdd("94105".into()));
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    let state = dashboard.state();
    let tracked: Vec<_> = state.locations.iter().map(|z| z.as_str()).collect();
    assert_eq!(tracked, ["90210", "60601", "94105"]);
    assert_eq!(state.fetch_state(&zip("10001")), None);
    assert_eq!(temperature(state, "94105"), Some(72));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_timers_and_fetches() {
    let source = ScriptedSource::new(Duration::from_millis(500));
    let mut dashboard = dashboard(source, Duration::from_secs(1));

    dashboard.start();
    dashboard.process_pending();
    assert_eq!(dashboard.fetches().len(), 3);

    dashboard.shutdown();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(dashboard.process_pending(), 0);
    assert!(dashboard.fetches().is_empty());
    assert!(dashboard.state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_process_pending_stops_at_quit() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = dashboard(source, Duration::from_secs(60));

    dashboard.enqueue(Action::UiFocusInput);
    dashboard.enqueue(Action::Quit);
    dashboard.enqueue(Action::UiBlurInput);

    assert_eq!(dashboard.process_pending(), 2);
    assert!(dashboard.state().input_focused);
}

#[tokio::test(start_paused = true)]
async fn test_results_queued_before_units_switch_are_dropped() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = dashboard(source, Duration::from_secs(60));

    dashboard.start();
    dashboard.process_pending();
    // Imperial results are now waiting in the queue
    tokio::time::sleep(Duration::from_millis(50)).await;

    dashboard.dispatch(Action::UiToggleUnits);
    dashboard.process_pending();

    assert_eq!(dashboard.state().units, Units::Metric);
    assert_eq!(temperature(dashboard.state(), "10001"), None);
    assert!(dashboard.state().is_loading());

    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    for code in ["10001", "90210", "60601"] {
        assert_eq!(temperature(dashboard.state(), code), Some(22));
    }
}

#[tokio::test(start_paused = true)]
async fn test_unknown_city_is_not_added() {
    let source = ScriptedSource::new(Duration::from_millis(10)).failing(&["Atlantis"]);
    let mut dashboard = city_dashboard(source.clone());

    dashboard.start();
    dashboard.process_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    dashboard.dispatch(Action::LocationInputChange("Atlantis".into()));
    dashboard.dispatch(Action::LocationAdd("Atlantis".into()));
    assert_eq!(dashboard.state().pending_add, Some(city("Atlantis")));

    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    let state = dashboard.state();
    assert_eq!(source.calls(), 4);
    assert_eq!(state.locations.len(), 3);
    assert!(!state.locations.contains(&city("Atlantis")));
    assert_eq!(state.fetch_state(&city("Atlantis")), None);
    assert_eq!(state.pending_add, None);
    assert_eq!(state.input, "Atlantis");
    assert_eq!(
        state.input_error.as_deref(),
        Some("Weather API error (404): city not found")
    );
}

#[tokio::test(start_paused = true)]
async fn test_known_city_is_added_with_checked_snapshot() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = city_dashboard(source.clone());

    dashboard.start();
    dashboard.process_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    dashboard.dispatch(Action::LocationInputChange("Paris".into()));
    dashboard.dispatch(Action::LocationAdd("Paris".into()));
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    let state = dashboard.state();
    // The check's own response fills the card; no second request
    assert_eq!(source.calls(), 4);
    assert!(state.locations.contains(&city("Paris")));
    assert!(state.input.is_empty());
    assert_eq!(state.input_error, None);
    match state.fetch_state(&city("Paris")) {
        Some(FetchState::Ready(snapshot)) => assert_eq!(snapshot.temperature, 22),
        other => panic!("expected ready card, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_zero_refresh_period_still_refreshes() {
    let source = ScriptedSource::new(Duration::from_millis(10));
    let mut dashboard = dashboard(source.clone(), Duration::ZERO);

    dashboard.start();
    dashboard.process_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.process_pending();

    assert!(source.calls() > 3);
}

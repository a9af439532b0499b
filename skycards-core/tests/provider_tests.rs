//! Integration tests for WeatherClient using wiremock.

use skycards_core::location::{CityName, LocationKey, ZipCode};
use skycards_core::{ProviderConfig, ProviderError, Units, WeatherClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WeatherClient {
    let config = ProviderConfig::new("test-key")
        .unwrap()
        .with_base_url(server.uri())
        .unwrap();
    WeatherClient::new(config).unwrap()
}

fn rain_body() -> serde_json::Value {
    serde_json::json!({
        "main": {"temp": 71.6},
        "weather": [{"main": "Rain", "description": "light rain"}],
        "name": "Testville"
    })
}

#[tokio::test]
async fn test_fetch_zip_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("zip", "10001,us"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rain_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let zip = ZipCode::parse("10001").unwrap();
    let snapshot = client.fetch_snapshot(&zip, Units::Imperial).await.unwrap();

    assert_eq!(snapshot.temperature, 72);
    assert_eq!(snapshot.condition, "rain");
    assert_eq!(snapshot.description, "light rain");
    assert_eq!(snapshot.city_name, "Testville");
}

#[tokio::test]
async fn test_fetch_city_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": 18.2, "feels_like": 17.5, "humidity": 64},
            "weather": [{"main": "Clouds", "description": "broken clouds", "icon": "04d"}],
            "wind": {"speed": 4.1},
            "name": "New York"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let city = CityName::parse("New York").unwrap();
    let snapshot = client.fetch_snapshot(&city, Units::Metric).await.unwrap();

    assert_eq!(snapshot.temperature, 18);
    assert_eq!(snapshot.condition, "clouds");
    assert_eq!(snapshot.feels_like, Some(18));
    assert_eq!(snapshot.humidity, Some(64));
    assert_eq!(snapshot.wind_speed, Some(4));
    assert_eq!(
        snapshot.icon_url.as_deref(),
        Some("https://openweathermap.org/img/wn/04d@2x.png")
    );
}

#[tokio::test]
async fn test_fetch_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"cod":"404","message":"city not found"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let city = CityName::parse("Atlantis").unwrap();
    let err = client
        .fetch_snapshot(&city, Units::Metric)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    let msg = err.to_string();
    assert!(msg.starts_with("Weather API error (404)"), "{msg}");
    assert!(msg.contains("city not found"));
}

#[tokio::test]
async fn test_fetch_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let zip = ZipCode::parse("90210").unwrap();
    let err = client
        .fetch_snapshot(&zip, Units::Imperial)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Http { status: 401, .. }));
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": 50.0},
            "weather": [],
            "name": "Nowhere"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let zip = ZipCode::parse("60601").unwrap();
    let err = client
        .fetch_snapshot(&zip, Units::Imperial)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Malformed));
    assert_eq!(err.to_string(), "Unexpected API response format");
}

#[test]
fn test_missing_api_key_is_rejected_up_front() {
    assert!(ProviderConfig::new("   ").is_err());
}

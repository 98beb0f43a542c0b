use anyhow::{bail, Context, Result};
use reqwest::Client;

use crate::forecast::{ForecastResponse, ForecastTransport};

/// Forecast transport over a shared reqwest client. The client carries the
/// request timeout configured in `main`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl ForecastTransport for HttpTransport {
    async fn get_forecast(&self, url: &str) -> Result<ForecastResponse> {
        let body = fetch_text(&self.http, url).await?;
        serde_json::from_str(&body).with_context(|| format!("Malformed forecast JSON from {url}"))
    }
}

async fn fetch_text(http: &Client, url: &str) -> Result<String> {
    let response = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request failed for {url}"))?;

    if !response.status().is_success() {
        bail!("Request failed ({}) for {url}", response.status());
    }

    response
        .text()
        .await
        .with_context(|| format!("Failed to read text body for {url}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::forecast::fetch_fix_snapshot;
    use crate::types::Fix;

    fn fix() -> Fix {
        Fix {
            name: "TALAL".to_string(),
            lat: 50.0,
            lon: 8.5,
        }
    }

    #[tokio::test]
    async fn fetches_and_extracts_from_the_forecast_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "50"))
            .and(query_param("longitude", "8.5"))
            .and(query_param("windspeed_unit", "kn"))
            .and(query_param("forecast_days", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": 50.0,
                "hourly": {
                    "time": ["2026-10-19T00:00", "2026-10-19T01:00"],
                    "temperature_2m": [10.0, 15.0],
                    "windspeed_850hPa": [22.0, 31.0],
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(Client::new());
        let snapshot = fetch_fix_snapshot(&transport, &server.uri(), &fix(), 1)
            .await
            .unwrap();

        assert_eq!(snapshot.levels["0"].temperature_kelvin, "288.15");
        assert_eq!(snapshot.levels["50"].wind_speed_knots, "31");
        assert_eq!(snapshot.levels["50"].wind_heading_degrees, "undefined");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(Client::new());
        let error = fetch_fix_snapshot(&transport, &server.uri(), &fix(), 0)
            .await
            .unwrap_err();
        assert!(format!("{error:#}").contains("503"));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(Client::new());
        let error = transport
            .get_forecast(&format!("{}/v1/forecast", server.uri()))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("Malformed forecast JSON"));
    }
}

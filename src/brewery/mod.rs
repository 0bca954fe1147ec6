pub mod types;

use std::collections::BTreeMap;

use anyhow::Result;
use reqwest::Client;
use serde_json::json;

pub use types::KettleState;

/// Thin client of the brewery controller's REST API. Stateless, no retries:
/// a failed call fails that one interaction.
#[derive(Clone)]
pub struct BreweryClient {
    client: Client,
    base_url: String,
}

impl BreweryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Where the controller (and its web UI) lives.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Automatic/target-temp state of every kettle, keyed by kettle id.
    pub async fn kettle_states(&self) -> Result<BTreeMap<String, KettleState>> {
        let states = self
            .client
            .get(format!("{}/api/kettle/state", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(states)
    }

    /// Set a kettle's PID target temperature.
    pub async fn set_target_temp(&self, kettle: u8, temp: i64) -> Result<()> {
        self.client
            .post(format!("{}/api/kettle/{}/targettemp", self.base_url, kettle))
            .json(&json!({ "temp": temp }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Flip a kettle's automatic (PID) mode.
    pub async fn toggle_automatic(&self, kettle: u8) -> Result<()> {
        self.client
            .post(format!("{}/api/kettle/{}/automatic", self.base_url, kettle))
            .json(&json!({ "id": kettle.to_string() }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Latest reading of every thermometer, keyed by sensor id.
    pub async fn thermometer_readings(&self) -> Result<BTreeMap<String, f64>> {
        let readings = self
            .client
            .get(format!("{}/api/thermometer/last", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn kettle_states_decode_every_kettle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/kettle/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "1": { "automatic": true, "target_temp": 70 },
                "2": { "automatic": false, "target_temp": 65.5 },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BreweryClient::new(server.uri());
        let states = client.kettle_states().await.unwrap();

        assert_eq!(states.len(), 2);
        assert!(states["1"].automatic);
        assert_eq!(states["1"].target_temp, 70.0);
        assert!(!states["2"].automatic);
        assert_eq!(states["2"].target_temp, 65.5);
    }

    #[tokio::test]
    async fn set_target_temp_posts_an_integer_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/kettle/1/targettemp"))
            .and(body_json(json!({ "temp": 70 })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = BreweryClient::new(server.uri());
        client.set_target_temp(1, 70).await.unwrap();
    }

    #[tokio::test]
    async fn toggle_automatic_posts_the_kettle_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/kettle/1/automatic"))
            .and(body_json(json!({ "id": "1" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = BreweryClient::new(server.uri());
        client.toggle_automatic(1).await.unwrap();
    }

    #[tokio::test]
    async fn thermometer_readings_decode_every_sensor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/thermometer/last"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sensor_1": 66.31,
                "sensor_2": 21.0,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BreweryClient::new(server.uri());
        let readings = client.thermometer_readings().await.unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings["sensor_1"], 66.31);
        assert_eq!(readings["sensor_2"], 21.0);
    }

    #[tokio::test]
    async fn a_non_2xx_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/kettle/state"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = BreweryClient::new(server.uri());
        assert!(client.kettle_states().await.is_err());
    }

    #[test]
    fn trailing_slashes_do_not_double_up_in_urls() {
        let client = BreweryClient::new("http://brewery.local:5001/");
        assert_eq!(client.base_url(), "http://brewery.local:5001");
    }
}

//! Weather tool: geocode a city, fetch the current forecast, and suggest
//! an outfit for the temperature.
//!
//! Two public HTTP APIs: Nominatim for geocoding and Open-Meteo for the
//! current weather. Neither needs credentials; Nominatim requires a
//! User-Agent.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ToolError;

use super::Tool;

const GEOCODE_BASE: &str = "https://nominatim.openstreetmap.org";
const FORECAST_BASE: &str = "https://api.open-meteo.com";
const USER_AGENT: &str = concat!("loci/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

/// Outfit suggestion for a temperature in °C.
fn outfit_for_temperature(celsius: f64) -> &'static str {
    if celsius < 5.0 {
        "Wear a down jacket or thick coat"
    } else if celsius < 15.0 {
        "A coat or jacket is recommended"
    } else if celsius < 25.0 {
        "Long sleeves or a light jacket are recommended"
    } else {
        "Hot weather, short sleeves recommended"
    }
}

/// `smart_weather`: current weather and outfit suggestion for a city.
///
/// **Interaction**: Implements `Tool`; registered in a `ToolRegistry` and
/// called by `ToolCallAgent` when the model asks for it.
pub struct WeatherTool {
    client: reqwest::Client,
    geocode_base: String,
    forecast_base: String,
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherTool {
    /// Builds the tool against the public endpoints.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            geocode_base: GEOCODE_BASE.to_string(),
            forecast_base: FORECAST_BASE.to_string(),
        }
    }

    /// Overrides both endpoints (builder), for tests against local stubs.
    pub fn with_endpoints(
        mut self,
        geocode_base: impl Into<String>,
        forecast_base: impl Into<String>,
    ) -> Self {
        self.geocode_base = geocode_base.into();
        self.forecast_base = forecast_base.into();
        self
    }

    async fn geocode(&self, city: &str) -> Result<(String, String), ToolError> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.geocode_base,
            urlencode(city)
        );
        let hits: Vec<GeocodeHit> = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("geocode request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ToolError::ExecutionFailed(format!("geocode request failed: {e}")))?
            .json()
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("geocode response invalid: {e}")))?;
        let hit = hits.into_iter().next().ok_or_else(|| {
            ToolError::ExecutionFailed(format!("no geographic information for {city}"))
        })?;
        Ok((hit.lat, hit.lon))
    }

    async fn current_temperature(&self, lat: &str, lon: &str) -> Result<f64, ToolError> {
        let url = format!(
            "{}/v1/forecast?latitude={lat}&longitude={lon}&current_weather=true&timezone=auto",
            self.forecast_base
        );
        let forecast: ForecastResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("forecast request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ToolError::ExecutionFailed(format!("forecast request failed: {e}")))?
            .json()
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("forecast response invalid: {e}")))?;
        forecast
            .current_weather
            .map(|w| w.temperature)
            .ok_or_else(|| ToolError::ExecutionFailed("no current weather available".into()))
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "smart_weather"
    }

    fn description(&self) -> &str {
        "Get weather and outfit suggestions for a city."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": {"type": "string", "description": "City name"}
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let city = args
            .get("city")
            .and_then(|c| c.as_str())
            .ok_or_else(|| ToolError::ValidationFailed("missing required field: city".into()))?;
        let (lat, lon) = self.geocode(city).await?;
        let temperature = self.current_temperature(&lat, &lon).await?;
        let outfit = outfit_for_temperature(temperature);
        tracing::debug!(%city, temperature, "weather lookup complete");
        Ok(Value::String(format!(
            "City: {city}\nTemperature: {temperature}°C\nOutfit: {outfit}\n"
        )))
    }
}

/// Percent-encodes a query value (space and the URL-reserved set).
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

//! `weather_tool`: current weather and a short forecast from Open-Meteo.
//!
//! Two requests per call: the geocoding API resolves the location name to
//! coordinates, then the forecast API returns current conditions and, when
//! requested, a 3-day daily forecast. Neither endpoint needs an API key.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `location` | string | Yes | City or place name |
//! | `units` | string | No | `celsius` (default) or `fahrenheit` |
//! | `include_forecast` | boolean | No | Include the 3-day forecast (default: true) |

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use toolcall_domain::agent::rules::WEATHER_TOOL;
use toolcall_domain::{ParamType, ToolArguments, ToolDescriptor, ToolError, ToolHandler, ToolParameter};
use tracing::debug;

use crate::tools::args::{opt_bool, opt_str, require_str};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const FORECAST_DAYS: usize = 3;

pub struct WeatherTool {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherTool {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_endpoints(client, GEOCODING_URL, FORECAST_URL)
    }

    /// Use alternative endpoints (self-hosted Open-Meteo, tests).
    pub fn with_endpoints(
        client: reqwest::Client,
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ToolError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ToolError::timeout("weather request")
                } else {
                    ToolError::execution_failed(format!("Weather request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(ToolError::execution_failed(format!(
                "Weather API returned error: {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            ToolError::execution_failed(format!("Failed to parse weather response: {}", e))
        })
    }

    async fn geocode(&self, location: &str) -> Result<Place, ToolError> {
        let body = self
            .get_json(
                &self.geocoding_url,
                &[
                    ("name", location.to_string()),
                    ("count", "1".to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let response: GeocodingResponse = serde_json::from_value(body).map_err(|e| {
            ToolError::execution_failed(format!("Unexpected geocoding response: {}", e))
        })?;

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::not_found(format!("location '{}'", location)))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Clone, Deserialize)]
struct Place {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

impl Place {
    fn display_name(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

#[async_trait]
impl ToolHandler for WeatherTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            WEATHER_TOOL,
            "Get current weather and a 3-day forecast for a location",
        )
        .with_parameter(ToolParameter::new(
            "location",
            "Location name (city, country) for the weather lookup",
            true,
        ))
        .with_parameter(
            ToolParameter::new("units", "Temperature units", false)
                .with_enum(["celsius", "fahrenheit"])
                .with_default("celsius"),
        )
        .with_parameter(
            ToolParameter::new("include_forecast", "Include the 3-day forecast", false)
                .with_type(ParamType::Boolean)
                .with_default(true),
        )
        .with_output(ToolParameter::new("location", "Resolved location", true))
        .with_output(
            ToolParameter::new("current_weather", "Current conditions", true)
                .with_type(ParamType::Object),
        )
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<Value, ToolError> {
        let location = require_str(arguments, "location")?;
        let units = opt_str(arguments, "units").unwrap_or("celsius");
        let include_forecast = opt_bool(arguments, "include_forecast").unwrap_or(true);

        debug!(location, units, "Looking up weather");
        let place = self.geocode(location).await?;

        let mut query = vec![
            ("latitude", place.latitude.to_string()),
            ("longitude", place.longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("temperature_unit", units.to_string()),
            ("wind_speed_unit", "kmh".to_string()),
            ("timezone", "auto".to_string()),
        ];
        if include_forecast {
            query.push((
                "daily",
                "temperature_2m_max,temperature_2m_min,weathercode".to_string(),
            ));
            query.push(("forecast_days", FORECAST_DAYS.to_string()));
        }

        let data = self.get_json(&self.forecast_url, &query).await?;
        Ok(build_payload(&place, units, include_forecast, &data))
    }
}

fn unit_symbol(units: &str) -> &'static str {
    if units == "fahrenheit" { "°F" } else { "°C" }
}

fn build_payload(place: &Place, units: &str, include_forecast: bool, data: &Value) -> Value {
    let current = &data["current_weather"];
    let temperature = current["temperature"].as_f64();
    let wind_speed = current["windspeed"].as_f64();
    let code = current["weathercode"].as_i64().unwrap_or(0);
    let description = weather_description(code);
    let name = place.display_name();

    let summary = match temperature {
        Some(t) => format!(
            "{}: {}, {:.1}{}, wind {:.1} km/h",
            name,
            description,
            t,
            unit_symbol(units),
            wind_speed.unwrap_or(0.0)
        ),
        None => format!("{}: {}", name, description),
    };

    let mut payload = json!({
        "location": name,
        "coordinates": {
            "latitude": place.latitude,
            "longitude": place.longitude,
        },
        "current_weather": {
            "temperature": temperature,
            "wind_speed": wind_speed,
            "weather_code": code,
            "description": description,
        },
        "units": units,
        "summary": summary,
    });

    if include_forecast {
        payload["forecast"] = Value::Array(parse_forecast(&data["daily"]));
    }
    payload
}

fn parse_forecast(daily: &Value) -> Vec<Value> {
    let column = |key: &str| daily[key].as_array().cloned().unwrap_or_default();
    let dates = column("time");
    let max = column("temperature_2m_max");
    let min = column("temperature_2m_min");
    let codes = column("weathercode");

    dates
        .iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(i, date)| {
            let code = codes.get(i).and_then(Value::as_i64).unwrap_or(0);
            json!({
                "date": date,
                "temperature_max": max.get(i).cloned().unwrap_or(Value::Null),
                "temperature_min": min.get(i).cloned().unwrap_or(Value::Null),
                "weather_code": code,
                "description": weather_description(code),
            })
        })
        .collect()
}

/// WMO weather interpretation code to text.
pub fn weather_description(code: i64) -> String {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        other => return format!("Unknown weather (code: {})", other),
    };
    text.to_string()
}

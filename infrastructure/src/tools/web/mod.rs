//! **Web Tools**: `search_tool` and `weather_tool`
//!
//! Both tools share one `reqwest::Client` (built by
//! [`http_client()`](super::http_client)) and call keyless public APIs.
//!
//! | Tool | Backend |
//! |------|---------|
//! | `search_tool` | DuckDuckGo Instant Answer API |
//! | `weather_tool` | Open-Meteo geocoding + forecast |

pub mod search;
pub mod weather;

pub use search::SearchTool;
pub use weather::WeatherTool;

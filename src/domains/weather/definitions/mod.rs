//! Weather tool definitions.

pub mod get_forecast;
pub mod get_weather;

pub use get_forecast::{GetForecastTool, UNAVAILABLE_MESSAGE, format_forecast};
pub use get_weather::GetWeatherTool;

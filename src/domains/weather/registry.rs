//! The `Weather` group.

use std::sync::Arc;

use crate::core::capability::{CapabilityGroup, ConfigurationError};

use super::client::Fetch;
use super::definitions::{GetForecastTool, GetWeatherTool};

pub const NAMESPACE: &str = "Weather";

/// Build the weather group. `fetcher` serves the forecast tool's upstream calls.
pub fn weather(
    fetcher: Arc<dyn Fetch>,
    api_base: impl Into<String>,
) -> Result<CapabilityGroup, ConfigurationError> {
    CapabilityGroup::new(NAMESPACE)
        .with(GetWeatherTool::descriptor())?
        .with(GetForecastTool::new(fetcher, api_base).descriptor())
}

pub fn tool_names() -> Vec<&'static str> {
    vec![GetWeatherTool::NAME, GetForecastTool::NAME]
}

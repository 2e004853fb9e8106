//! Daily forecast tool backed by the Open-Meteo API.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::capability::{
    Arguments, CapabilityDescriptor, Handler, HandlerError, HandlerResult, ParameterSpec,
    PrimitiveType,
};
use crate::domains::weather::client::Fetch;

/// Returned, not raised, when the upstream gives us nothing.
pub const UNAVAILABLE_MESSAGE: &str = "Unable to fetch forecast data for this location.";

const HOURLY: &str = "temperature_2m,precipitation,weathercode";
const DAILY: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

pub struct GetForecastTool {
    fetcher: Arc<dyn Fetch>,
    api_base: String,
}

impl GetForecastTool {
    pub const NAME: &'static str = "get_forecast";

    pub const DESCRIPTION: &'static str = "Get weather forecast for a location.";

    pub fn new(fetcher: Arc<dyn Fetch>, api_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_base: api_base.into(),
        }
    }

    pub fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("latitude", PrimitiveType::Number)
                .with_description("Latitude of the location"),
            ParameterSpec::required("longitude", PrimitiveType::Number)
                .with_description("Longitude of the location"),
        ]
    }

    /// Forecast request URL for a coordinate.
    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> Result<String, HandlerError> {
        let query = serde_urlencoded::to_string([
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", HOURLY.to_string()),
            ("daily", DAILY.to_string()),
            ("timezone", "auto".to_string()),
        ])
        .map_err(|e| HandlerError::new(format!("Could not encode forecast query: {e}")))?;

        Ok(format!(
            "{}/forecast?{}",
            self.api_base.trim_end_matches('/'),
            query
        ))
    }

    pub fn descriptor(self) -> CapabilityDescriptor {
        CapabilityDescriptor::tool(Self::NAME, Self::parameters(), Arc::new(self))
            .with_description(Self::DESCRIPTION)
    }
}

#[async_trait]
impl Handler for GetForecastTool {
    #[instrument(skip_all)]
    async fn call(&self, arguments: Arguments) -> HandlerResult {
        let latitude = arguments.f64("latitude")?;
        let longitude = arguments.f64("longitude")?;
        let url = self.forecast_url(latitude, longitude)?;
        info!("Fetching forecast for ({}, {})", latitude, longitude);

        let payload = match self.fetcher.fetch(&url).await {
            Ok(payload) if !is_empty(&payload) => payload,
            Ok(_) => return Ok(Value::String(UNAVAILABLE_MESSAGE.to_string())),
            Err(reason) => {
                warn!("Forecast unavailable: {}", reason);
                return Ok(Value::String(UNAVAILABLE_MESSAGE.to_string()));
            }
        };

        format_forecast(&payload).map(Value::String)
    }
}

fn is_empty(payload: &Value) -> bool {
    match payload {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(true) | Value::Number(_) => false,
    }
}

/// Render the `daily` block, one entry per day, separated by `---`.
pub fn format_forecast(payload: &Value) -> Result<String, HandlerError> {
    let daily = payload
        .get("daily")
        .and_then(Value::as_object)
        .ok_or_else(|| HandlerError::new("Forecast response has no daily data"))?;

    let dates = column(daily, "time")?;
    let max = column(daily, "temperature_2m_max")?;
    let min = column(daily, "temperature_2m_min")?;
    let precipitation = column(daily, "precipitation_sum")?;
    let code = column(daily, "weathercode")?;

    let mut entries = Vec::with_capacity(dates.len());
    for i in 0..dates.len() {
        entries.push(format!(
            "\nDate: {}\nMax Temperature: {}°C\nMin Temperature: {}°C\nPrecipitation: {} mm\nWeather Code: {}\n",
            cell(dates, i, "time")?,
            cell(max, i, "temperature_2m_max")?,
            cell(min, i, "temperature_2m_min")?,
            cell(precipitation, i, "precipitation_sum")?,
            cell(code, i, "weathercode")?,
        ));
    }

    Ok(entries.join("\n---\n"))
}

fn column<'a>(daily: &'a Map<String, Value>, name: &str) -> Result<&'a [Value], HandlerError> {
    daily
        .get(name)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| HandlerError::new(format!("Forecast response is missing daily.{name}")))
}

fn cell(values: &[Value], index: usize, name: &str) -> Result<String, HandlerError> {
    match values.get(index) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(HandlerError::new(format!(
            "Forecast response has no daily.{name} for day {index}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::weather::client::Unavailable;
    use serde_json::json;
    use std::sync::Mutex;

    /// Answers every fetch with a canned result and remembers the URL.
    struct StubFetch {
        reply: Result<Value, Unavailable>,
        urls: Mutex<Vec<String>>,
    }

    impl StubFetch {
        fn new(reply: Result<Value, Unavailable>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                urls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Fetch for StubFetch {
        async fn fetch(&self, url: &str) -> Result<Value, Unavailable> {
            self.urls.lock().unwrap().push(url.to_string());
            self.reply.clone()
        }
    }

    fn coords() -> Arguments {
        [
            ("latitude".to_string(), json!(52.52)),
            ("longitude".to_string(), json!(13.41)),
        ]
        .into_iter()
        .collect()
    }

    fn two_days() -> Value {
        json!({
            "daily": {
                "time": ["2025-06-01", "2025-06-02"],
                "temperature_2m_max": [24.1, 19.8],
                "temperature_2m_min": [12.3, 11.0],
                "precipitation_sum": [0.0, 3.2],
                "weathercode": [1, 61]
            }
        })
    }

    #[tokio::test]
    async fn test_formats_daily_entries() {
        let stub = StubFetch::new(Ok(two_days()));
        let tool = GetForecastTool::new(stub.clone(), "https://api.open-meteo.com/v1");

        let Value::String(text) = tool.call(coords()).await.unwrap() else {
            panic!("expected text");
        };
        let entries: Vec<_> = text.split("\n---\n").collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("Date: 2025-06-01"));
        assert!(entries[0].contains("Max Temperature: 24.1°C"));
        assert!(entries[1].contains("Precipitation: 3.2 mm"));
        assert!(entries[1].contains("Weather Code: 61"));

        let urls = stub.urls.lock().unwrap();
        assert!(urls[0].starts_with("https://api.open-meteo.com/v1/forecast?latitude=52.52&longitude=13.41"));
        assert!(urls[0].ends_with("timezone=auto"));
    }

    #[tokio::test]
    async fn test_unavailable_is_a_message() {
        let stub = StubFetch::new(Err(Unavailable::Status(503)));
        let tool = GetForecastTool::new(stub, "http://localhost");
        assert_eq!(tool.call(coords()).await.unwrap(), json!(UNAVAILABLE_MESSAGE));

        for empty in [json!({}), json!([]), json!(null), json!("")] {
            let stub = StubFetch::new(Ok(empty));
            let tool = GetForecastTool::new(stub, "http://localhost");
            assert_eq!(tool.call(coords()).await.unwrap(), json!(UNAVAILABLE_MESSAGE));
        }
    }

    #[tokio::test]
    async fn test_missing_daily_is_handler_error() {
        let stub = StubFetch::new(Ok(json!({ "hourly": {} })));
        let tool = GetForecastTool::new(stub, "http://localhost");
        let err = tool.call(coords()).await.unwrap_err();
        assert_eq!(err.message(), "Forecast response has no daily data");
    }

    #[test]
    fn test_short_column_is_error() {
        let mut payload = two_days();
        payload["daily"]["weathercode"] = json!([1]);
        assert!(format_forecast(&payload).is_err());
    }
}

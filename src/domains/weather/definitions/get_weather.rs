//! Current weather tool (mock).

use serde_json::Value;

use crate::core::capability::{
    Arguments, CapabilityDescriptor, HandlerResult, ParameterSpec, PrimitiveType, handler_fn,
};

pub struct GetWeatherTool;

impl GetWeatherTool {
    pub const NAME: &'static str = "get_weather";

    pub const DESCRIPTION: &'static str = "Gets the current weather for a specified location.";

    pub fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("location", PrimitiveType::String)
                .with_description("The city and state, e.g. San Francisco, CA"),
        ]
    }

    pub fn execute(arguments: &Arguments) -> HandlerResult {
        let location = arguments.str("location")?;
        Ok(Value::String(format!("The weather in {location} is sunny.")))
    }

    pub fn descriptor() -> CapabilityDescriptor {
        CapabilityDescriptor::tool(
            Self::NAME,
            Self::parameters(),
            handler_fn(|arguments: Arguments| async move { Self::execute(&arguments) }),
        )
        .with_description(Self::DESCRIPTION)
    }
}

//! Business capabilities, one bounded context per group.
//!
//! Each subdomain builds a single [`CapabilityGroup`] in isolation. The groups
//! only meet when the server composes them into the root registry, so adding a
//! domain means adding a module here and a branch in [`build_group`].

pub mod prompts;
pub mod resources;
pub mod tools;
pub mod weather;

use std::sync::Arc;

use tracing::debug;

use crate::core::capability::{CapabilityGroup, ConfigurationError};
use crate::core::{Config, Result};
use weather::{Fetch, HttpFetcher};

/// Build the groups named in `config.capabilities.groups`, in that order.
///
/// The forecast HTTP client is only created when the weather group is asked for.
pub fn build_groups(config: &Config) -> Result<Vec<CapabilityGroup>> {
    let wants_weather = config
        .capabilities
        .groups
        .iter()
        .any(|name| name.eq_ignore_ascii_case(weather::NAMESPACE));

    let fetcher: Option<Arc<dyn Fetch>> = if wants_weather {
        Some(Arc::new(HttpFetcher::new(&config.weather)?))
    } else {
        None
    };

    build_groups_with(config, fetcher)
}

/// Like [`build_groups`], with the forecast fetcher supplied by the caller.
pub fn build_groups_with(
    config: &Config,
    fetcher: Option<Arc<dyn Fetch>>,
) -> Result<Vec<CapabilityGroup>> {
    config
        .capabilities
        .groups
        .iter()
        .map(|name| build_group(name, config, fetcher.as_ref()))
        .collect()
}

fn build_group(
    name: &str,
    config: &Config,
    fetcher: Option<&Arc<dyn Fetch>>,
) -> Result<CapabilityGroup> {
    debug!("Building group {}", name);

    let group = if name.eq_ignore_ascii_case(resources::NAMESPACE) {
        resources::corporate_resources()?
    } else if name.eq_ignore_ascii_case(tools::NAMESPACE) {
        tools::corporate_tools()?
    } else if name.eq_ignore_ascii_case(prompts::NAMESPACE) {
        prompts::corporate_prompts()?
    } else if name.eq_ignore_ascii_case(weather::NAMESPACE) {
        let fetcher: Arc<dyn Fetch> = match fetcher {
            Some(fetcher) => fetcher.clone(),
            None => Arc::new(HttpFetcher::new(&config.weather)?),
        };
        weather::weather(fetcher, config.weather.api_base.as_str())?
    } else {
        return Err(ConfigurationError::UnknownGroup(name.to_string()).into());
    };

    Ok(group)
}

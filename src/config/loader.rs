use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::settings::ServiceSettings;

/// Load and validate generator settings from a YAML file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ServiceSettings> {
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("could not read settings file {}", path.as_ref().display()))?;
    let settings: ServiceSettings = serde_yaml::from_str(&raw)?;

    // fail here rather than at first use
    let generator = settings.generator.clone().into_settings()?;
    let context = settings
        .context
        .clone()
        .into_auth_context(generator.token_version);
    if let Err(e) = context.validate() {
        bail!("invalid auth context in settings: {}", e);
    }
    if settings.sealing.endpoint.is_empty() {
        bail!("sealing endpoint must not be empty");
    }

    Ok(settings)
}

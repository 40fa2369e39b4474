use anyhow::Context;
use bevy::prelude::*;
use morph_tree::TreeConfig;
use std::path::Path;

/// Startup parameters handed from the command line to the particle setup.
#[derive(Resource, Debug, Clone)]
pub struct TreeSettings {
	pub config: TreeConfig,
	/// Fixed seed for reproducible datasets; entropy when absent
	pub seed: Option<u64>,
}

/// Parses a TOML override; omitted keys keep their defaults.
pub fn parse_config(text: &str) -> anyhow::Result<TreeConfig> {
	let config: TreeConfig = toml::from_str(text).context("Failed to parse tree config")?;
	config.validate().context("Invalid tree config")?;
	Ok(config)
}

pub fn load_config(path: &Path) -> anyhow::Result<TreeConfig> {
	let text = std::fs::read_to_string(path)
		.with_context(|| format!("Failed to read tree config {}", path.display()))?;
	let config = parse_config(&text)?;
	log::info!("Loaded tree config from {}", path.display());
	Ok(config)
}

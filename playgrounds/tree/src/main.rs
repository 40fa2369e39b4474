use bevy::prelude::*;
use morph_tree::TreeConfig;
use std::path::Path;
use tree_playground::{settings::load_config, MorphTreePlugin};

fn main() -> anyhow::Result<()> {
	// Optional seed and TOML config path from the command line
	let mut args = std::env::args().skip(1);
	let seed = args.next().and_then(|s| s.parse::<u64>().ok());
	let config = match args.next() {
		Some(path) => load_config(Path::new(&path))?,
		None => TreeConfig::default(),
	};

	match seed {
		Some(seed) => println!("Starting tree playground with seed: {}", seed),
		None => println!("Starting tree playground with an entropy seed"),
	}

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Morphing Tree".to_string(),
				resolution: (1280, 720).into(),
				..default()
			}),
			..default()
		}))
		.add_plugins(MorphTreePlugin { config, seed })
		.run();

	Ok(())
}

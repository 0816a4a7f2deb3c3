use anyhow::Result;
use clap::Parser as _;
use meditations_config::{
	AppConfig,
	commands::{Cli, Commands},
	config::mask_secret,
	env, logging,
};
use serde_json::json;

fn main() -> Result<()> {
	logging::init();
	let config = AppConfig::global();

	let cli = Cli::parse();

	match cli.command {
		Commands::Show { json } => show(config, json)?,
		Commands::Get { key } => {
			// absent is not an error
			if let Some(value) = env::get(&key) {
				println!("{value}");
			} else {
				tracing::debug!("{key} is not set");
			}
		}
	}

	Ok(())
}

fn show(config: &AppConfig, as_json: bool) -> Result<()> {
	let qdrant_api_key = config.qdrant.api_key.as_deref().map(mask_secret);
	let openai_api_key = config.openai_api_key.as_deref().map(mask_secret);

	if as_json {
		let value = json!({
			"root_dir": config.root_dir,
			"data_dir": config.data_dir,
			"max_sentence_length": config.max_sentence_length,
			"qdrant": {
				"host": config.qdrant.host,
				"port": config.qdrant.port,
				"api_key": qdrant_api_key,
				"collection_name": config.qdrant.collection_name,
				"url": config.qdrant.url().ok(),
			},
			"openai_api_key": openai_api_key,
		});
		println!("{}", serde_json::to_string_pretty(&value)?);
		return Ok(());
	}

	let or_unset = |v: Option<&str>| v.unwrap_or("<unset>").to_string();

	println!("root_dir:            {}", config.root_dir.display());
	println!("data_dir:            {}", config.data_dir.display());
	println!("max_sentence_length: {}", config.max_sentence_length);
	println!("qdrant.host:         {}", or_unset(config.qdrant.host.as_deref()));
	println!("qdrant.port:         {}", or_unset(config.qdrant.port.as_deref()));
	println!("qdrant.api_key:      {}", or_unset(qdrant_api_key.as_deref()));
	println!("qdrant.collection:   {}", config.qdrant.collection_name);
	println!("openai_api_key:      {}", or_unset(openai_api_key.as_deref()));

	match config.qdrant.url() {
		Ok(url) => println!("qdrant.url:          {url}"),
		Err(e) => tracing::warn!("qdrant url unavailable: {e}"),
	}

	Ok(())
}

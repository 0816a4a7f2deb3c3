use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Inspect the resolved meditations configuration")]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Print every configuration value (API keys are masked)
	Show {
		/// Emit JSON instead of plain text
		#[arg(long)]
		json: bool,
	},
	/// Print a single environment variable after loading .env
	Get {
		/// Exact variable name, e.g. QDRANT_HOST
		key: String,
	},
}

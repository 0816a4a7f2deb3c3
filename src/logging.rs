use colored::Colorize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
	EnvFilter,
	fmt::{self, FmtContext, FormatEvent, FormatFields},
	registry::LookupSpan,
};

const DEFAULT_FILTER: &str = "info";

/// `[LEVEL] [target]: message` with a colored level tag.
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
{
	fn format_event(
		&self,
		ctx: &FmtContext<'_, S, N>,
		mut writer: fmt::format::Writer<'_>,
		event: &Event<'_>,
	) -> std::fmt::Result {
		let meta = event.metadata();

		write!(writer, "[{}] ", level_tag(meta.level()))?;
		write!(writer, "[{}]: ", meta.target())?;
		ctx.field_format().format_fields(writer.by_ref(), event)?;

		writeln!(writer)
	}
}

fn level_tag(level: &Level) -> colored::ColoredString {
	match *level {
		Level::ERROR => "ERROR".red(),
		Level::WARN => "WARN".yellow(),
		Level::INFO => "INFO".green(),
		Level::DEBUG => "DEBUG".blue(),
		Level::TRACE => "TRACE".purple(),
	}
}

/// Installs the stderr subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; only the first call installs anything.
pub fn init() {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	_ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.event_format(CustomFormatter)
		.try_init();
}

use std::fs::File;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "QUOTE_SPARK_LOG";

/// Initialize tracing with file output.
///
/// Logging stays off unless `QUOTE_SPARK_LOG` is set, since anything written
/// to the terminal would tear the TUI. Each run gets its own file,
/// `{path}.{timestamp}.{pid}`.
pub fn init_tracing() {
    let Some(log_path) = std::env::var_os(LOG_ENV) else {
        return;
    };

    let unique_path = log_file_name(&log_path.to_string_lossy());

    let Ok(file) = File::create(&unique_path) else {
        eprintln!("Warning: failed to create log file: {unique_path}");
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn log_file_name(base: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, std::process::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_name_appends_pid() {
        let name = log_file_name("/tmp/quote-spark.log");
        assert!(name.starts_with("/tmp/quote-spark.log."));
        assert!(name.ends_with(&format!(".{}", std::process::id())));
    }
}

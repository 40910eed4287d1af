use crate::errors::{ParleyError, ParleyResult};
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Starts the developer-facing log. It goes to a file because the terminal
/// itself belongs to the UI; `RUST_LOG` overrides the default level.
pub fn init() -> ParleyResult<LoggerHandle> {
    Logger::try_with_env_or_str("info")
        .map_err(|e| ParleyError::config_error(format!("bad log spec: {}", e)))?
        .log_to_file(FileSpec::default().basename("parley").suppress_timestamp())
        .start()
        .map_err(|e| ParleyError::config_error(format!("failed to start logger: {}", e)))
}

// Chat endpoint
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/chat";
pub const ENDPOINT_URL_VAR: &str = "PARLEY_ENDPOINT_URL";

// Fixed UI strings
pub const PENDING_MESSAGE: &str = "Bot is thinking...";
pub const NO_RESPONSE_FALLBACK: &str = "Sorry, I could not get a response.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Sorry, something went wrong. Please check the logs.";

// Session log pane keeps at most this many entries
pub const LOG_CAPACITY: usize = 200;

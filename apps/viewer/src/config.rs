use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: i64 = 60;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// API origin, e.g. `http://localhost:8420`. No trailing slash needed.
    pub base_url: String,
    /// Cards requested per list call.
    pub page_size: i64,
    /// Quiescence delay before a search-text change is sent.
    pub debounce: Duration,
}

impl ViewerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

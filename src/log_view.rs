use crate::constants::LOG_CAPACITY;

/// Capped scrollback of coarse session events shown in the side pane.
/// Diagnostic detail goes to the log file, not here.
#[derive(Clone, Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
    pub scroll_offset: u16,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        if self.entries.len() > LOG_CAPACITY {
            self.entries.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_view_is_capped() {
        let mut logs = LogView::new();
        for i in 0..(LOG_CAPACITY + 10) {
            logs.add(format!("entry {}", i));
        }
        assert_eq!(logs.entries.len(), LOG_CAPACITY);
        assert_eq!(logs.entries[0], "entry 10");
    }
}

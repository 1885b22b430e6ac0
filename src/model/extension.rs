//! Extension Model
//!
//! What the page knows about the host side: the installed extension and the
//! refresh schedule it is shown alongside.

use std::time::{Duration, Instant};

use super::types::ExtensionInfoView;

#[derive(Clone, Debug)]
pub struct ExtensionModel {
    /// Last info received from the host (None until the first answer)
    pub info: Option<ExtensionInfoView>,

    /// Origin the extension is fetched from
    pub server_url: String,

    pub refresh_interval: Duration,

    /// When the periodic refresh is expected to fire next
    pub next_refresh_at: Instant,
}

impl ExtensionModel {
    pub fn new(server_url: impl Into<String>, refresh_interval: Duration) -> Self {
        Self {
            info: None,
            server_url: server_url.into(),
            refresh_interval,
            next_refresh_at: Instant::now() + refresh_interval,
        }
    }

    /// Install path, if one is known and non-empty
    pub fn known_path(&self) -> Option<&str> {
        self.info
            .as_ref()
            .map(|info| info.path.as_str())
            .filter(|path| !path.is_empty())
    }

    /// Seconds until the next periodic refresh (0 once it is due)
    pub fn secs_until_refresh(&self) -> u64 {
        self.next_refresh_at
            .saturating_duration_since(Instant::now())
            .as_secs()
    }

    /// Push the refresh estimate forward past `now`
    pub fn roll_refresh_schedule(&mut self) {
        let now = Instant::now();
        while self.next_refresh_at <= now {
            self.next_refresh_at += self.refresh_interval.max(Duration::from_millis(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_path_ignores_empty() {
        let mut model = ExtensionModel::new("https://arxena.com", Duration::from_secs(600));
        assert!(model.known_path().is_none());

        model.info = Some(ExtensionInfoView::default());
        assert!(model.known_path().is_none());

        model.info = Some(ExtensionInfoView {
            path: "/tmp/arx-crx".to_string(),
            last_updated: 1,
        });
        assert_eq!(model.known_path(), Some("/tmp/arx-crx"));
    }

    #[test]
    fn test_refresh_countdown() {
        let model = ExtensionModel::new("https://arxena.com", Duration::from_secs(600));
        let remaining = model.secs_until_refresh();
        assert!(remaining <= 600 && remaining >= 598);
    }

    #[test]
    fn test_roll_refresh_schedule_moves_past_now() {
        let mut model = ExtensionModel::new("https://arxena.com", Duration::from_secs(60));
        model.next_refresh_at = Instant::now();
        model.roll_refresh_schedule();
        assert!(model.next_refresh_at > Instant::now());
        assert!(model.secs_until_refresh() >= 58);
    }
}

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Transient UI indicators driven by export actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStatus {
    /// An export action is running.
    pub in_progress: bool,
    /// The "copied" cue stays on until this instant.
    pub copied_until: Option<Instant>,
}

impl ExportStatus {
    pub fn is_copied(&self) -> bool {
        self.copied_until
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Triggering controls should be disabled while this is true.
    pub fn is_busy(&self) -> bool {
        self.in_progress || self.is_copied()
    }
}

/// Publishes [`ExportStatus`] changes to any number of subscribers.
#[derive(Debug)]
pub struct StatusBoard {
    tx: watch::Sender<ExportStatus>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self {
            tx: watch::Sender::new(ExportStatus::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ExportStatus> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> ExportStatus {
        *self.tx.borrow()
    }

    /// Mark an action as running until the returned guard is dropped.
    pub fn begin(&self) -> InProgress<'_> {
        self.tx.send_modify(|s| s.in_progress = true);
        InProgress { board: self }
    }

    pub fn mark_copied(&self, window: Duration) {
        let deadline = Instant::now() + window;
        self.tx.send_modify(|s| s.copied_until = Some(deadline));
    }

    pub fn clear_copied(&self) {
        self.tx.send_if_modified(|s| s.copied_until.take().is_some());
    }

    /// Wait for the "copied" window to run out, then reset it.
    pub async fn settle_copied(&self) {
        let deadline = self.current().copied_until;
        if let Some(deadline) = deadline {
            tokio::time::sleep_until(deadline).await;
            // A newer copy may have extended the window meanwhile.
            self.tx.send_if_modified(|s| match s.copied_until {
                Some(d) if d <= Instant::now() => {
                    s.copied_until = None;
                    true
                }
                _ => false,
            });
        }
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears `in_progress` on drop, so every exit path resets the indicator.
#[must_use = "the action is only marked in progress while the guard lives"]
pub struct InProgress<'a> {
    board: &'a StatusBoard,
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.board.tx.send_modify(|s| s.in_progress = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_clears_in_progress_on_drop() {
        let board = StatusBoard::new();
        {
            let _guard = board.begin();
            assert!(board.current().in_progress);
            assert!(board.current().is_busy());
        }
        assert!(!board.current().in_progress);
    }

    #[tokio::test(start_paused = true)]
    async fn copied_expires_after_window() {
        let board = StatusBoard::new();
        board.mark_copied(Duration::from_secs(2));
        assert!(board.current().is_copied());

        tokio::time::advance(Duration::from_millis(1_999)).await;
        assert!(board.current().is_copied());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!board.current().is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn settle_resets_the_deadline() {
        let board = StatusBoard::new();
        let mut rx = board.subscribe();
        board.mark_copied(Duration::from_secs(2));
        let _ = rx.borrow_and_update();

        board.settle_copied().await;
        assert_eq!(board.current().copied_until, None);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn clear_copied_is_immediate() {
        let board = StatusBoard::new();
        board.mark_copied(Duration::from_secs(60));
        board.clear_copied();
        assert!(!board.current().is_copied());
        assert_eq!(board.current().copied_until, None);
    }
}

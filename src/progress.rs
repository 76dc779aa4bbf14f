// src/progress.rs
/// Lightweight progress reporting used by the multi-game batch.
/// Frontends (CLI, tests) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of games.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One game was read and its events extracted.
    fn item_done(&mut self, _game_id: &str) {}

    /// One game was skipped; the batch goes on.
    fn item_failed(&mut self, _game_id: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress sink that forwards to the logger.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        logf!("Processing {total} game file(s)");
    }

    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }

    fn item_done(&mut self, game_id: &str) {
        self.done += 1;
        logd!("[{}/{}] game {game_id} ok", self.done + self.failed, self.total);
    }

    fn item_failed(&mut self, game_id: &str, reason: &str) {
        self.failed += 1;
        loge!("[{}/{}] game {game_id} skipped: {reason}", self.done + self.failed, self.total);
    }

    fn finish(&mut self) {
        logf!("Processing complete: {} successful, {} failed", self.done, self.failed);
    }
}

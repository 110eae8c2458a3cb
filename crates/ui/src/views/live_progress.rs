use chessedu_core::model::ProgressSnapshot;
use dioxus::prelude::*;

/// Latest progress snapshot any view received from the server.
#[derive(Clone, Copy, PartialEq)]
pub struct LiveProgress {
    latest: Signal<Option<ProgressSnapshot>>,
}

pub fn use_live_progress_provider() -> LiveProgress {
    let live = LiveProgress {
        latest: use_signal(|| None),
    };
    use_context_provider(|| live)
}

impl LiveProgress {
    pub fn publish(mut self, snapshot: ProgressSnapshot) {
        self.latest.set(Some(snapshot));
    }

    #[must_use]
    pub fn streak(&self) -> Option<u32> {
        self.latest.read().as_ref().map(|s| s.current_streak)
    }
}

use std::time::Duration;

use chessedu_core::achievement::AchievementDefinition;
use dioxus::prelude::*;

use crate::vm::{
    CelebrationVm, ConfettiPiece, Effect, NOTIFICATION_TTL, Notification, NotificationKind,
    confetti, finished_message,
};

const FLASH_TTL: Duration = Duration::from_millis(600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardFlash {
    Success,
    Shake,
}

impl BoardFlash {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            BoardFlash::Success => "flash-success",
            BoardFlash::Shake => "shake",
        }
    }
}

/// The board flash on screen. Only the timer of the latest flash clears it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FlashSlot {
    shown: Option<BoardFlash>,
    generation: u64,
}

impl FlashSlot {
    fn raise(&mut self, flash: BoardFlash) -> u64 {
        self.generation += 1;
        self.shown = Some(flash);
        self.generation
    }

    fn expire(&mut self, generation: u64) {
        if self.generation == generation {
            self.shown = None;
        }
    }
}

/// Presentation state shared by every view: toasts, the celebration modal
/// with its confetti, and the board flash.
#[derive(Clone, Copy, PartialEq)]
pub struct Effects {
    notifications: Signal<Vec<Notification>>,
    next_id: Signal<u64>,
    celebration: Signal<Option<CelebrationVm>>,
    confetti: Signal<Vec<ConfettiPiece>>,
    flash: Signal<FlashSlot>,
}

pub fn use_effects_provider() -> Effects {
    let effects = Effects {
        notifications: use_signal(Vec::new),
        next_id: use_signal(|| 0),
        celebration: use_signal(|| None),
        confetti: use_signal(Vec::new),
        flash: use_signal(FlashSlot::default),
    };
    use_context_provider(|| effects)
}

impl Effects {
    /// Shows a toast that dismisses itself after `NOTIFICATION_TTL`.
    pub fn notify(mut self, kind: NotificationKind, title: impl Into<String>, text: impl Into<String>) {
        let id = {
            let mut next = self.next_id.write();
            *next += 1;
            *next
        };
        self.notifications.write().push(Notification {
            id,
            kind,
            title: title.into(),
            text: text.into(),
        });
        spawn(async move {
            tokio::time::sleep(NOTIFICATION_TTL).await;
            self.dismiss(id);
        });
    }

    pub fn dismiss(mut self, id: u64) {
        self.notifications.write().retain(|n| n.id != id);
    }

    pub fn celebrate(mut self, definition: &'static AchievementDefinition) {
        self.celebration.set(Some(CelebrationVm::from(definition)));
        self.confetti.set(confetti(&mut rand::rng()));
    }

    pub fn close_celebration(mut self) {
        self.celebration.set(None);
        self.confetti.set(Vec::new());
    }

    pub fn flash(mut self, flash: BoardFlash) {
        let generation = self.flash.write().raise(flash);
        spawn(async move {
            tokio::time::sleep(FLASH_TTL).await;
            self.flash.write().expire(generation);
        });
    }

    #[must_use]
    pub fn board_flash(&self) -> Option<BoardFlash> {
        self.flash.read().shown
    }

    pub fn play(self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StepCompleted { .. } => self.flash(BoardFlash::Success),
                Effect::VerificationFailed => self.flash(BoardFlash::Shake),
                Effect::ExerciseCompleted { title } => self.notify(
                    NotificationKind::Success,
                    "Congratulations!",
                    finished_message(&title),
                ),
                Effect::AchievementUnlocked(definition) => {
                    self.notify(
                        NotificationKind::Success,
                        "Achievement unlocked",
                        definition.title,
                    );
                    self.celebrate(definition);
                }
            }
        }
    }
}

#[component]
pub fn EffectsLayer() -> Element {
    let effects = use_context::<Effects>();
    let notifications = effects.notifications.cloned();
    let celebration = effects.celebration.cloned();
    let pieces = effects.confetti.cloned();

    rsx! {
        div { class: "notifications",
            for notification in notifications {
                div { key: "{notification.id}", class: notification.kind.class(),
                    strong { "{notification.title}" }
                    span { "{notification.text}" }
                    button {
                        class: "notification-close",
                        onclick: move |_| effects.dismiss(notification.id),
                        "×"
                    }
                }
            }
        }
        if !pieces.is_empty() {
            div { class: "confetti",
                for (i, piece) in pieces.into_iter().enumerate() {
                    div { key: "{i}", class: "confetti-piece", style: piece.style() }
                }
            }
        }
        if let Some(celebration) = celebration {
            CelebrationModal { celebration }
        }
    }
}

#[component]
fn CelebrationModal(celebration: CelebrationVm) -> Element {
    let effects = use_context::<Effects>();
    rsx! {
        div { class: "modal-backdrop",
            div { class: "celebration-modal",
                div { class: "celebration-icon", "{celebration.icon}" }
                h2 { "Achievement Unlocked!" }
                h3 { "{celebration.title}" }
                p { "{celebration.description}" }
                button { class: "primary", onclick: move |_| effects.close_celebration(), "Continue" }
            }
        }
    }
}

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chessedu_core::achievement::AchievementDefinition;
use rand::Rng;
use services::Celebrations;

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
pub const CONFETTI_COUNT: usize = 100;
pub const CONFETTI_COLORS: [&str; 7] = [
    "#f44336", "#2196f3", "#ffeb3b", "#4caf50", "#9c27b0", "#ff9800", "#00bcd4",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            NotificationKind::Info => "notification info",
            NotificationKind::Success => "notification success",
            NotificationKind::Warning => "notification warning",
            NotificationKind::Error => "notification error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub text: String,
}

/// Engine outcomes queued for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    StepCompleted { step: usize, title: String },
    VerificationFailed,
    ExerciseCompleted { title: String },
    AchievementUnlocked(&'static AchievementDefinition),
}

/// `Celebrations` sink drained by the view after each interaction.
#[derive(Clone, Default)]
pub struct EffectOutbox {
    queue: Arc<Mutex<Vec<Effect>>>,
}

impl EffectOutbox {
    fn push(&self, effect: Effect) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(effect);
    }

    #[must_use]
    pub fn drain(&self) -> Vec<Effect> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Celebrations for EffectOutbox {
    fn step_completed(&self, step: usize, title: &str) {
        self.push(Effect::StepCompleted {
            step,
            title: title.to_owned(),
        });
    }

    fn verification_failed(&self) {
        self.push(Effect::VerificationFailed);
    }

    fn exercise_completed(&self, title: &str) {
        self.push(Effect::ExerciseCompleted {
            title: title.to_owned(),
        });
    }

    fn achievement_unlocked(&self, definition: &'static AchievementDefinition) {
        self.push(Effect::AchievementUnlocked(definition));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CelebrationVm {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<&'static AchievementDefinition> for CelebrationVm {
    fn from(definition: &'static AchievementDefinition) -> Self {
        Self {
            icon: definition.icon,
            title: definition.title,
            description: definition.description,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub left_pct: f32,
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub opacity: f32,
    pub rotation_deg: u32,
    pub color: &'static str,
}

impl ConfettiPiece {
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "left: {:.1}%; background-color: {}; opacity: {:.2}; transform: rotate({}deg); animation-delay: {}ms; animation-duration: {}ms;",
            self.left_pct, self.color, self.opacity, self.rotation_deg, self.delay_ms, self.duration_ms
        )
    }
}

/// One confetti burst.
pub fn confetti(rng: &mut impl Rng) -> Vec<ConfettiPiece> {
    (0..CONFETTI_COUNT)
        .map(|_| ConfettiPiece {
            left_pct: rng.random_range(0.0..100.0),
            delay_ms: rng.random_range(0..500),
            duration_ms: rng.random_range(2000..4000),
            opacity: rng.random_range(0.5..1.0),
            rotation_deg: rng.random_range(0..360),
            color: CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessedu_core::achievement;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn outbox_drains_in_order() {
        let outbox = EffectOutbox::default();
        outbox.step_completed(0, "Knights First");
        outbox.verification_failed();
        assert_eq!(
            outbox.drain(),
            vec![
                Effect::StepCompleted {
                    step: 0,
                    title: "Knights First".to_owned()
                },
                Effect::VerificationFailed,
            ]
        );
        assert!(outbox.drain().is_empty());
    }

    #[test]
    fn confetti_burst_uses_the_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        let pieces = confetti(&mut rng);
        assert_eq!(pieces.len(), CONFETTI_COUNT);
        assert!(pieces.iter().all(|p| CONFETTI_COLORS.contains(&p.color)));
        assert!(pieces.iter().all(|p| (0.5..1.0).contains(&p.opacity)));
        assert!(pieces[0].style().starts_with("left: "));
    }

    #[test]
    fn celebration_copies_the_definition() {
        let definition = achievement::find("first_pin").unwrap();
        let vm = CelebrationVm::from(definition);
        assert_eq!(vm.title, "Pin Point");
        assert_eq!(vm.icon, "📌");
    }
}

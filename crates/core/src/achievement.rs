//! Achievement catalog and the ordering rules of the achievements board.

use std::collections::BTreeSet;

use crate::model::{LessonId, ProgressSnapshot};

/// Local rule that unlocks an achievement from a progress snapshot, in
/// addition to the server listing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockRule {
    /// Only unlocked when the server lists it.
    Awarded,
    LessonCompleted(LessonId),
    LessonsCompleted(usize),
    StreakAtLeast(u32),
    ObjectiveCompleted { lesson: LessonId, index: usize },
}

impl UnlockRule {
    #[must_use]
    pub fn holds(&self, snapshot: &ProgressSnapshot) -> bool {
        match *self {
            UnlockRule::Awarded => false,
            UnlockRule::LessonCompleted(lesson) => snapshot.has_completed(lesson),
            UnlockRule::LessonsCompleted(count) => snapshot.completed_count() >= count,
            UnlockRule::StreakAtLeast(days) => snapshot.current_streak >= days,
            UnlockRule::ObjectiveCompleted { lesson, index } => {
                snapshot.has_objective(lesson, index)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: UnlockRule,
}

impl AchievementDefinition {
    #[must_use]
    pub fn is_unlocked(&self, snapshot: &ProgressSnapshot) -> bool {
        snapshot.has_achievement(self.id) || self.rule.holds(snapshot)
    }
}

const fn def(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    rule: UnlockRule,
) -> AchievementDefinition {
    AchievementDefinition {
        id,
        title,
        description,
        icon,
        rule,
    }
}

pub static CATALOG: [AchievementDefinition; 13] = [
    def(
        "first_lesson",
        "First Step",
        "Complete your first chess lesson",
        "🏆",
        UnlockRule::LessonsCompleted(1),
    ),
    def(
        "piece_movement_mastery",
        "Piece Movement Master",
        "Complete the piece movement exercise",
        "♘",
        UnlockRule::Awarded,
    ),
    def(
        "board_setup",
        "Ready to Play",
        "Set up the chess board correctly",
        "♜",
        UnlockRule::Awarded,
    ),
    def(
        "chess_pieces",
        "Chess Pieces Master",
        "Learn about all chess pieces",
        "♟️",
        UnlockRule::LessonCompleted(LessonId::new(1)),
    ),
    def(
        "center_control",
        "Center Commander",
        "Master the concept of center control",
        "♙",
        UnlockRule::ObjectiveCompleted {
            lesson: LessonId::new(2),
            index: 0,
        },
    ),
    def(
        "piece_development",
        "Development Director",
        "Learn to develop pieces effectively",
        "♗",
        UnlockRule::ObjectiveCompleted {
            lesson: LessonId::new(2),
            index: 1,
        },
    ),
    def(
        "king_safety",
        "Castle Keeper",
        "Understand the importance of king safety",
        "♚",
        UnlockRule::ObjectiveCompleted {
            lesson: LessonId::new(2),
            index: 2,
        },
    ),
    def(
        "opening_principles",
        "Opening Expert",
        "Complete the opening principles lesson",
        "♖",
        UnlockRule::LessonCompleted(LessonId::new(2)),
    ),
    def(
        "three_day_streak",
        "Consistent Learner",
        "Learn chess three days in a row",
        "🔥",
        UnlockRule::StreakAtLeast(3),
    ),
    def(
        "first_fork",
        "Fork Master",
        "Execute your first fork",
        "🍴",
        UnlockRule::Awarded,
    ),
    def(
        "first_pin",
        "Pin Point",
        "Create your first pin",
        "📌",
        UnlockRule::Awarded,
    ),
    def(
        "tactics_master",
        "Tactics Master",
        "Complete the simple tactics lesson",
        "♖",
        UnlockRule::LessonCompleted(LessonId::new(3)),
    ),
    def(
        "all_lessons",
        "Chess Fundamentals Graduate",
        "Complete all basic chess lessons",
        "🎓",
        UnlockRule::LessonsCompleted(3),
    ),
];

#[must_use]
pub fn find(id: &str) -> Option<&'static AchievementDefinition> {
    CATALOG.iter().find(|d| d.id == id)
}

pub const LOCKED_TITLE: &str = "???";
pub const LOCKED_DESCRIPTION: &str = "Keep practicing to unlock this achievement!";
pub const EMPTY_MESSAGE: &str = "Complete lessons to earn achievements!";
const EMPTY_PREVIEW_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AchievementCard {
    pub definition: &'static AchievementDefinition,
    pub locked: bool,
}

impl AchievementCard {
    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.locked {
            LOCKED_TITLE
        } else {
            self.definition.title
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        if self.locked {
            LOCKED_DESCRIPTION
        } else {
            self.definition.description
        }
    }
}

/// What the achievements screen shows for a given snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementBoard {
    pub cards: Vec<AchievementCard>,
    /// Nothing unlocked yet; `cards` then holds locked previews only.
    pub empty: bool,
}

impl AchievementBoard {
    /// Unlocked entries first, then locked ones; catalog order is kept
    /// inside each group.
    #[must_use]
    pub fn build(catalog: &'static [AchievementDefinition], snapshot: &ProgressSnapshot) -> Self {
        let (unlocked, locked): (Vec<_>, Vec<_>) = catalog
            .iter()
            .map(|definition| AchievementCard {
                definition,
                locked: !definition.is_unlocked(snapshot),
            })
            .partition(|card| !card.locked);

        if unlocked.is_empty() {
            return Self {
                cards: locked.into_iter().take(EMPTY_PREVIEW_COUNT).collect(),
                empty: true,
            };
        }

        let mut cards = unlocked;
        cards.extend(locked);
        Self { cards, empty: false }
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.locked).count()
    }
}

/// Server ids that have no catalog entry.
#[must_use]
pub fn unknown_ids<'a>(
    catalog: &[AchievementDefinition],
    snapshot: &'a ProgressSnapshot,
) -> BTreeSet<&'a str> {
    snapshot
        .achievement_ids()
        .map(|id| id.as_str())
        .filter(|id| !catalog.iter().any(|d| d.id == *id))
        .collect()
}

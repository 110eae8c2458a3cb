use chessedu_core::achievement::{AchievementBoard, AchievementCard, EMPTY_MESSAGE};

const STAGGER_MS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementCardVm {
    pub id: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub locked: bool,
    /// Entrance animation delay, staggered by position.
    pub delay_ms: usize,
}

impl AchievementCardVm {
    fn new(card: &AchievementCard, position: usize) -> Self {
        Self {
            id: card.definition.id,
            icon: if card.locked { "🔒" } else { card.definition.icon },
            title: card.title(),
            description: card.description(),
            locked: card.locked,
            delay_ms: position * STAGGER_MS,
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.locked {
            "achievement-card locked"
        } else {
            "achievement-card unlocked"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementsVm {
    pub cards: Vec<AchievementCardVm>,
    pub empty_message: Option<&'static str>,
    pub unlocked: usize,
}

#[must_use]
pub fn map_achievement_board(board: &AchievementBoard) -> AchievementsVm {
    AchievementsVm {
        cards: board
            .cards
            .iter()
            .enumerate()
            .map(|(position, card)| AchievementCardVm::new(card, position))
            .collect(),
        empty_message: board.empty.then_some(EMPTY_MESSAGE),
        unlocked: board.unlocked_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessedu_core::achievement::{CATALOG, LOCKED_TITLE};
    use chessedu_core::model::{LessonId, ProgressSnapshot};

    #[test]
    fn empty_board_carries_the_prompt() {
        let board = AchievementBoard::build(&CATALOG, &ProgressSnapshot::default());
        let vm = map_achievement_board(&board);
        assert_eq!(vm.empty_message, Some(EMPTY_MESSAGE));
        assert_eq!(vm.cards.len(), 3);
        assert!(vm.cards.iter().all(|c| c.title == LOCKED_TITLE && c.icon == "🔒"));
    }

    #[test]
    fn unlocked_cards_lead_with_staggered_delays() {
        let snapshot = ProgressSnapshot {
            completed_lessons: vec![LessonId::new(1)],
            ..ProgressSnapshot::default()
        };
        let vm = map_achievement_board(&AchievementBoard::build(&CATALOG, &snapshot));
        assert!(vm.empty_message.is_none());
        assert_eq!(vm.unlocked, 2);
        assert_eq!(vm.cards[0].title, "First Step");
        assert_eq!(vm.cards[1].delay_ms, 100);
        assert_eq!(vm.cards[2].class(), "achievement-card locked");
    }
}

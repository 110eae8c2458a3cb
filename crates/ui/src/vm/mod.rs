mod achievement_vm;
mod board_vm;
mod effects_vm;
mod exercise_vm;
mod free_play_vm;
mod lesson_vm;
mod time_fmt;

pub use achievement_vm::{AchievementCardVm, AchievementsVm, map_achievement_board};
pub use board_vm::{
    BoardVm, SquareVm, TrayPieceVm, build_board, build_game_board, glyph, spare_pieces,
};
pub use effects_vm::{
    CONFETTI_COLORS, CONFETTI_COUNT, CelebrationVm, ConfettiPiece, Effect, EffectOutbox,
    NOTIFICATION_TTL, Notification, NotificationKind, confetti,
};
pub use exercise_vm::{
    BoardIntent, ExerciseIntent, ExerciseOutcome, ExerciseVm, Feedback, StepButtonVm,
    StepPanelVm, finished_message, step_intro,
};
pub use free_play_vm::{Announcement, FreePlayIntent, FreePlayVm, MovePairVm};
pub use lesson_vm::{LessonCardVm, ProgressBannerVm, map_lesson_cards};
pub use time_fmt::format_datetime;

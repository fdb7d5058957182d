use crate::catalog::Difficulty;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingIntent {
    /// `None` shows every bite.
    SelectFilter(Option<Difficulty>),
    /// All → beginner → intermediate → advanced → all.
    CycleFilter,
    MoveUp,
    MoveDown,
}

impl Intent for LandingIntent {}

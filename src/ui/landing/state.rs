use crate::catalog::{filter_by_difficulty, Bite, Difficulty, BITES};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LandingState {
    pub filter: Option<Difficulty>,
    /// Index into [`visible_bites`](Self::visible_bites).
    pub selected: usize,
}

impl UiState for LandingState {}

impl LandingState {
    pub fn visible_bites(&self) -> Vec<&'static Bite> {
        filter_by_difficulty(BITES, self.filter)
    }

    pub fn selected_bite(&self) -> Option<&'static Bite> {
        self.visible_bites().get(self.selected).copied()
    }
}

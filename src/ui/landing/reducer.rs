use crate::catalog::Difficulty;
use crate::ui::mvi::Reducer;

use super::intent::LandingIntent;
use super::state::LandingState;

pub struct LandingReducer;

impl Reducer for LandingReducer {
    type State = LandingState;
    type Intent = LandingIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LandingIntent::SelectFilter(filter) => with_filter(state, filter),
            LandingIntent::CycleFilter => {
                let next = match state.filter {
                    None => Some(Difficulty::Beginner),
                    Some(Difficulty::Beginner) => Some(Difficulty::Intermediate),
                    Some(Difficulty::Intermediate) => Some(Difficulty::Advanced),
                    Some(Difficulty::Advanced) => None,
                };
                with_filter(state, next)
            }
            LandingIntent::MoveUp => {
                let len = state.visible_bites().len();
                let selected = if len == 0 {
                    0
                } else if state.selected == 0 {
                    len - 1
                } else {
                    state.selected - 1
                };
                LandingState { selected, ..state }
            }
            LandingIntent::MoveDown => {
                let len = state.visible_bites().len();
                let selected = if state.selected + 1 >= len {
                    0
                } else {
                    state.selected + 1
                };
                LandingState { selected, ..state }
            }
        }
    }
}

fn with_filter(state: LandingState, filter: Option<Difficulty>) -> LandingState {
    let next = LandingState { filter, ..state };
    let len = next.visible_bites().len();
    LandingState {
        selected: state.selected.min(len.saturating_sub(1)),
        ..next
    }
}

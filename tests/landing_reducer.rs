//! Landing page MVI reducer.

use frontend_bites::catalog::{Difficulty, BITES};
use frontend_bites::ui::landing::{LandingIntent, LandingReducer, LandingState};
use frontend_bites::ui::mvi::Reducer;

fn reduce(state: LandingState, intent: LandingIntent) -> LandingState {
    LandingReducer::reduce(state, intent)
}

#[test]
fn move_down_wraps_to_top() {
    let mut state = LandingState::default();
    for _ in 0..BITES.len() {
        state = reduce(state, LandingIntent::MoveDown);
    }
    assert_eq!(state.selected, 0);
}

#[test]
fn move_up_wraps_to_bottom() {
    let state = reduce(LandingState::default(), LandingIntent::MoveUp);
    assert_eq!(state.selected, BITES.len() - 1);
}

#[test]
fn filter_change_clamps_selection() {
    let state = reduce(LandingState::default(), LandingIntent::MoveDown);
    assert_eq!(state.selected, 1);

    let state = reduce(state, LandingIntent::SelectFilter(Some(Difficulty::Beginner)));
    assert_eq!(state.selected, 0);
    assert_eq!(
        state.selected_bite().map(|bite| bite.id),
        Some("debounce-search")
    );
}

#[test]
fn cycle_filter_visits_every_level() {
    let mut state = LandingState::default();
    let mut seen = Vec::new();
    for _ in 0..4 {
        state = reduce(state, LandingIntent::CycleFilter);
        seen.push(state.filter);
    }
    assert_eq!(
        seen,
        [
            Some(Difficulty::Beginner),
            Some(Difficulty::Intermediate),
            Some(Difficulty::Advanced),
            None,
        ]
    );
}

#[test]
fn empty_filter_keeps_selection_at_zero() {
    let state = reduce(
        LandingState::default(),
        LandingIntent::SelectFilter(Some(Difficulty::Advanced)),
    );
    assert!(state.visible_bites().is_empty());
    let state = reduce(state, LandingIntent::MoveDown);
    let state = reduce(state, LandingIntent::MoveUp);
    assert_eq!(state.selected, 0);
    assert!(state.selected_bite().is_none());
}

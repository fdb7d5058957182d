mod intent;
mod reducer;
mod state;

pub use intent::LandingIntent;
pub use reducer::LandingReducer;
pub use state::LandingState;

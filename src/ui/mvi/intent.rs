/// Marker trait for intents: user actions or system events that a reducer
/// turns into a new state.
pub trait Intent: Send + 'static {}

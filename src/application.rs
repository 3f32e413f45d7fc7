//! Application layer - page session state and the search use cases
//!
//! Holds the single shared state container, the client-side filter/sort
//! transform that derives what is shown, and the user actions that drive
//! the access layer.

pub mod result_view;
pub mod state;
pub mod use_cases;

// Re-export commonly used items
pub use result_view::{ResultView, apply_filters_and_sort};
pub use state::{SearchSession, SearchState};
pub use use_cases::{SearchUseCases, messages};

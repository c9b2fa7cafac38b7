//! Chat session state and its controller.

pub mod controller;
pub mod state;

pub use controller::ChatSession;
pub use state::ChatSessionState;

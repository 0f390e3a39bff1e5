pub mod client;
pub mod clock;
pub mod config;
pub mod editor;
pub mod error;
pub mod session;

// Re-exports for convenience
pub use client::ApiClient;
pub use clock::TimeOfDay;
pub use config::ConsoleConfig;
pub use editor::{ActivityEdit, EditError, InterimEdit, WeekEditor, decode_week, default_week};
pub use error::{ApiError, ConfigError};
pub use session::{EditorPhase, EditorSession, SessionError};

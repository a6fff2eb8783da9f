pub mod content;
pub mod preferences;
pub mod progress;

pub use content::{Content, ContentKind, ContentSummary};
pub use preferences::GenrePreference;
pub use progress::{ProgressKey, ProgressUpsert, ResumeItem, ViewEvent, WatchProgress};

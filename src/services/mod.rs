pub mod continue_watching;
pub mod progress;
pub mod recommendations;
pub mod view_events;

pub use continue_watching::ContinueWatchingService;
pub use progress::ProgressTracker;
pub use recommendations::RecommendationService;
pub use view_events::{spawn_view_event_writer, ViewEventSender, ViewEventWriterHandle};

mod error_view;
mod generating_view;
mod player_view;
mod topic_view;

pub use error_view::ErrorView;
pub use generating_view::GeneratingView;
pub use player_view::PlayerView;
pub use topic_view::{TopicFormState, TopicView};

pub mod commands;
pub mod events;
pub mod types;

pub use commands::WidgetCommand;
pub use events::WidgetEvent;
pub use types::{FaqEntry, Message, Origin, Phase, View};

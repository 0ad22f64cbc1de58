pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod state;

pub use config::AppConfig;
pub use error::KanbanError;
pub use logging::{init_tracing, LogEntry, Loggable};
pub use result::KanbanResult;
pub use state::StateCell;

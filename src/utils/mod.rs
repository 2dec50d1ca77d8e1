pub mod error;
pub mod logging;

pub use error::{LeadSyncError, Result};
pub use logging::init_logging;

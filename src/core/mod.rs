pub mod client;
pub mod delivery;
pub mod eligibility;
pub mod extract;
pub mod lead;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod sync;

pub use client::{DeliverySink, SessionSource, VapiClient};
pub use lead::ExtractedLead;
pub use session::Session;
pub use store::{DeliveredStore, InMemoryDeliveredStore};
pub use sync::{SyncEngine, SyncReport};

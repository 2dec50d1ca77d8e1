pub mod config;
pub mod inspect;
pub mod sync;
pub mod watch;

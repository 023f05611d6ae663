//! Process lifecycle: startup is main's job, shutdown lives here.

pub mod shutdown;

pub use shutdown::Shutdown;

//! Process lifecycle: shutdown handling

mod shutdown;

pub use shutdown::ShutdownSignal;

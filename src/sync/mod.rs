mod error;
mod synchronizer;

pub use error::SyncError;
pub use synchronizer::{SyncStats, TreeSynchronizer};

pub mod record;
pub mod snapshot;

pub use record::Record;
pub use snapshot::Snapshot;

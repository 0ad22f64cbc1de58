pub mod memory;

pub use memory::{FailurePlan, InMemoryRemote, RemoteCall};

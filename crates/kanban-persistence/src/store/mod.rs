pub mod atomic_writer;
pub mod json_file_store;
pub mod memory_storage;

pub use atomic_writer::AtomicWriter;
pub use json_file_store::{session_storage_from_config, JsonFileSessionStorage};
pub use memory_storage::{MemorySessionStorage, NoopSessionStorage};

//! Event bus adapters.
//!
//! - `InMemoryEventBus` - in-process bus with bounded history

mod in_memory;

pub use in_memory::{InMemoryEventBus, DEFAULT_RETAINED_EVENTS};

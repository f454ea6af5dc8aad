//! Keyword search over a chat transcript.
//!
//! - [`search`] - Literal substring search with previews, highlighting and a result cap
//! - [`list_messages`] - Unfiltered listing used when no query is active
//! - [`paginate`] - Paging of result lists
//! - [`SearchSession`] - Debounced live search guarded by a generation counter

pub mod debounce;
pub mod engine;
pub mod matcher;
pub mod paging;
pub mod preview;

pub use debounce::{DebouncedSearch, SearchGeneration, SearchSession, SearchTicket};
pub use engine::{list_messages, search};
pub use matcher::Matcher;
pub use paging::{Page, paginate, total_pages};

//! Core types for contentcal.
//!
//! - `post`: post records and the month document normalizer
//! - `source` / `store` / `session`: loading a client's month documents
//! - `month` / `grid`: calendar arithmetic and month grid layout
//! - `platforms`: platform discovery, filtering and counts
//! - `view`: view state and the post detail modal
//! - `feedback`: pre-filled feedback links

pub mod config;
pub mod constants;
pub mod error;
pub mod feedback;
pub mod grid;
pub mod month;
pub mod platforms;
pub mod post;
pub mod session;
pub mod source;
pub mod store;
pub mod view;

pub use error::{ContentCalError, ContentCalResult};
pub use month::CalendarMonth;
pub use post::Post;

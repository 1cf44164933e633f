//! Log tail synchronization engine
//!
//! Follows a build log that keeps growing on the server and keeps an
//! in-memory rendition of it consistent with what the user looks at.
//!
//! # Architecture
//!
//! ```text
//!   CiClient ──► TailFetcher ──TailEvent──► (front end) ──► LogView
//!                 │ ByteCursor                               │ LineLog
//!                 │ fixed-delay poll                         │ Viewport (follow flag)
//!                 └ TaskHandle (stop)                        │ Selection
//!                                                            └ Minimap
//! ```
//!
//! The fetcher owns the byte cursor and the poll timer. The view owns
//! everything the user can see: appended lines, the scroll position, the
//! selected line and the minimap marks. Front ends feed fetched chunks and
//! user input into [`LogView`] and render from its state.
//!
//! [`BuildBoard`] is the independent build list: polled, diffed by build
//! ID, rows created or updated by status.

pub mod cursor;
pub mod dashboard;
pub mod fetcher;
pub mod fragment;
pub mod handle;
pub mod line_log;
pub mod minimap;
pub mod selection;
pub mod view;
pub mod viewport;

pub use cursor::ByteCursor;
pub use dashboard::{BoardDiff, BoardEvent, BoardPoller, BuildBoard, BuildRow, BuildStatus};
pub use fetcher::{FetcherConfig, PollStats, TailEvent, TailFetcher, TailHandle};
pub use fragment::{FragmentError, LineFragment};
pub use handle::TaskHandle;
pub use line_log::{LineLog, LineRecord};
pub use minimap::{Minimap, ScrollerMark};
pub use selection::Selection;
pub use view::{AppendReport, LogView, ScrollOutcome};
pub use viewport::Viewport;

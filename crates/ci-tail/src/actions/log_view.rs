//! Log viewer actions
//!
//! Fetcher results carry the session they belong to, so output of a log
//! that was already closed is dropped by the reducer.

use ci_tail_core::{ByteCursor, LineFragment, TailEvent};

#[derive(Debug, Clone)]
pub enum LogViewAction {
    // === Lifecycle ===
    /// Open a build log (handled by the tail middleware)
    Open {
        build_id: String,
        fragment: Option<LineFragment>,
    },
    /// Fetcher started for a new session
    Opened {
        session: u64,
        build_id: String,
        fragment: Option<LineFragment>,
        share_url: Option<String>,
    },

    // === Fetcher results ===
    ChunkReceived {
        session: u64,
        output: String,
        cursor: ByteCursor,
    },
    NothingNew {
        session: u64,
    },
    FetchFailed {
        session: u64,
        message: String,
        consecutive_failures: u64,
    },

    // === Scrolling ===
    ScrollBy(isize),
    /// Scroll by whole pages (negative is up)
    ScrollPages(isize),
    ScrollToTop,
    ScrollToBottom,
    SetViewportHeight(usize),

    // === Selection ===
    LineClicked(usize),
    MarkClicked(usize),
    NextMark,
    PrevMark,
    FragmentChanged(Option<LineFragment>),

    // === Go-to-line prompt ===
    GotoStart,
    GotoChar(char),
    GotoBackspace,
    GotoConfirm,
    GotoCancel,
}

impl LogViewAction {
    /// Translate a fetcher event into a reducer action
    pub fn from_tail_event(session: u64, event: TailEvent) -> Self {
        match event {
            TailEvent::Chunk { chunk, cursor, .. } => Self::ChunkReceived {
                session,
                output: chunk.output,
                cursor,
            },
            TailEvent::Empty { .. } => Self::NothingNew { session },
            TailEvent::FetchFailed {
                error,
                consecutive_failures,
                ..
            } => Self::FetchFailed {
                session,
                message: error.to_string(),
                consecutive_failures,
            },
        }
    }

    /// Session of a fetcher result, `None` for user actions
    pub fn session(&self) -> Option<u64> {
        match self {
            Self::ChunkReceived { session, .. }
            | Self::NothingNew { session }
            | Self::FetchFailed { session, .. } => Some(*session),
            _ => None,
        }
    }
}

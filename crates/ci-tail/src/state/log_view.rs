use ci_tail_core::{ByteCursor, LogView};

/// One open build log
#[derive(Debug, Clone)]
pub struct LogViewState {
    /// Identifies the fetcher feeding this log
    pub session: u64,
    pub build_id: String,
    /// Page URL that `#line<N>` fragments are appended to
    pub share_url: Option<String>,
    pub view: LogView,
    pub cursor: ByteCursor,
    pub polls: u64,
    pub failures: u64,
    pub consecutive_failures: u64,
    pub last_error: Option<String>,
    /// Digits typed into the go-to-line prompt, while it is open
    pub goto_input: Option<String>,
}

impl LogViewState {
    pub fn new(session: u64, build_id: String, share_url: Option<String>, view: LogView) -> Self {
        Self {
            session,
            build_id,
            share_url,
            view,
            cursor: ByteCursor::default(),
            polls: 0,
            failures: 0,
            consecutive_failures: 0,
            last_error: None,
            goto_input: None,
        }
    }

    /// Full shareable link for the current selection
    pub fn share_link(&self) -> Option<String> {
        let fragment = self.view.fragment()?;
        Some(match &self.share_url {
            Some(url) => format!("{}{}", url, fragment),
            None => fragment.to_string(),
        })
    }
}

//! Clipboard access and transient "copied" feedback.
//!
//! Every copyable field keeps its own deadline. Copying a field again re-arms
//! its deadline instead of stacking a second mark, and marks for different
//! fields never interfere with each other.

use crate::error::{AppError, Result};
use crate::metadata::VideoMetadata;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a field shows as copied.
pub const COPIED_HOLD: Duration = Duration::from_secs(2);

/// A copyable field of the results panel. Indices are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyTarget {
    Title(usize),
    Description,
    Hashtag(usize),
}

impl CopyTarget {
    /// Looks up the text this target refers to.
    pub fn text_in(self, metadata: &VideoMetadata) -> Option<&str> {
        match self {
            CopyTarget::Title(i) => metadata.titles.get(i).map(String::as_str),
            CopyTarget::Description => Some(metadata.description.as_str()),
            CopyTarget::Hashtag(i) => metadata.hashtags.get(i).map(String::as_str),
        }
    }
}

impl fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyTarget::Title(i) => write!(f, "title:{}", i + 1),
            CopyTarget::Description => f.write_str("description"),
            CopyTarget::Hashtag(i) => write!(f, "hashtag:{}", i + 1),
        }
    }
}

/// Parses `title:N`, `hashtag:N` (1-based) or `description`.
impl FromStr for CopyTarget {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "description" {
            return Ok(CopyTarget::Description);
        }

        let invalid = || {
            AppError::Validation(format!(
                "invalid copy target '{}', expected title:N, hashtag:N or description",
                s
            ))
        };

        let (kind, index) = s.split_once(':').ok_or_else(invalid)?;
        let index = index
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(invalid)?;

        match kind {
            "title" => Ok(CopyTarget::Title(index)),
            "hashtag" | "tag" => Ok(CopyTarget::Hashtag(index)),
            _ => Err(invalid()),
        }
    }
}

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| AppError::clipboard(format!("Could not access clipboard: {}", e)))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| AppError::clipboard(format!("Failed to copy to clipboard: {}", e)))
    }
}

/// Per-field "just copied" marks with independent deadlines.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    hold: Duration,
    marks: HashMap<CopyTarget, Instant>,
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(COPIED_HOLD)
    }
}

impl CopyFeedback {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            marks: HashMap::new(),
        }
    }

    /// Places `text` on the clipboard and marks `target` as copied until `now + hold`.
    ///
    /// The mark is only set when the clipboard write succeeds.
    pub fn copy(
        &mut self,
        sink: &mut dyn ClipboardSink,
        target: CopyTarget,
        text: &str,
        now: Instant,
    ) -> Result<()> {
        sink.set_text(text)?;
        self.marks.insert(target, now + self.hold);
        debug!(copy_target = %target, chars = text.len(), "copied to clipboard");
        Ok(())
    }

    pub fn is_copied(&self, target: CopyTarget, now: Instant) -> bool {
        self.marks.get(&target).is_some_and(|deadline| now < *deadline)
    }

    /// Drops every mark whose deadline has passed.
    pub fn prune(&mut self, now: Instant) {
        self.marks.retain(|_, deadline| now < *deadline);
    }

    /// Time until the earliest live mark lapses, if any.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.marks
            .values()
            .filter(|deadline| now < **deadline)
            .map(|deadline| *deadline - now)
            .min()
    }

    /// Forgets all marks, e.g. when a new result replaces the old one.
    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

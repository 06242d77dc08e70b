//! Per-buffer highlight session
//!
//! The stateful object an editor keeps next to each buffer. It remembers
//! the last annotation set and a marker for the text it came from, never
//! the text itself.

use std::sync::Arc;

use crate::highlighter::Highlighter;
use crate::span::AnnotationSet;
use crate::worker::{HighlightRender, HighlightRequest};

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

/// 64-bit FNV-1a hash of the text bytes
pub fn content_hash(text: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in text.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Identifies the text snapshot an annotation set was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotMarker {
    /// Per-session counter, bumped on every update or request
    pub revision: u64,
    /// Hash of the snapshot's content
    pub content_hash: u64,
}

impl SnapshotMarker {
    pub fn new(revision: u64, text: &str) -> Self {
        Self {
            revision,
            content_hash: content_hash(text),
        }
    }

    /// Check whether `text` is the snapshot this marker was taken from
    pub fn matches(&self, text: &str) -> bool {
        self.content_hash == content_hash(text)
    }
}

/// Stateful highlighting façade for one buffer
pub struct HighlightSession {
    highlighter: Arc<Highlighter>,
    /// Last accepted result and its marker
    latest: Option<(SnapshotMarker, AnnotationSet)>,
    /// Newest revision handed out by `update` or `request`
    latest_requested: u64,
}

impl HighlightSession {
    pub fn new(highlighter: impl Into<Arc<Highlighter>>) -> Self {
        Self {
            highlighter: highlighter.into(),
            latest: None,
            latest_requested: 0,
        }
    }

    pub fn highlighter(&self) -> &Arc<Highlighter> {
        &self.highlighter
    }

    fn next_revision(&mut self) -> u64 {
        self.latest_requested += 1;
        self.latest_requested
    }

    /// Rescan `text` synchronously and store the result
    pub fn update(&mut self, text: &str) -> &AnnotationSet {
        let marker = SnapshotMarker::new(self.next_revision(), text);
        let annotations = self.highlighter.highlight(text);
        tracing::debug!(
            revision = marker.revision,
            text_len = text.len(),
            spans = annotations.len(),
            "highlight session updated"
        );
        &self.latest.insert((marker, annotations)).1
    }

    /// Last computed set, without recomputation
    ///
    /// `None` until the first update or accepted render.
    pub fn current(&self) -> Option<&AnnotationSet> {
        self.latest.as_ref().map(|(_, annotations)| annotations)
    }

    /// Marker of the stored result
    pub fn marker(&self) -> Option<SnapshotMarker> {
        self.latest.as_ref().map(|(marker, _)| *marker)
    }

    /// True once a result exists and no newer request is outstanding
    pub fn is_current(&self) -> bool {
        self.marker()
            .is_some_and(|marker| marker.revision == self.latest_requested)
    }

    /// Check whether the stored result was computed from different text
    pub fn is_stale(&self, text: &str) -> bool {
        !self.marker().is_some_and(|marker| marker.matches(text))
    }

    /// Reserve a revision for `text` to be highlighted off this thread
    ///
    /// Any request or update issued afterwards makes this one stale.
    pub fn request(&mut self, text: &str) -> HighlightRequest {
        let marker = SnapshotMarker::new(self.next_revision(), text);
        HighlightRequest {
            marker,
            text: text.to_string(),
        }
    }

    /// Store a worker result if it belongs to the newest request
    ///
    /// Returns false and drops the render when a newer revision has been
    /// requested or stored since.
    pub fn apply(&mut self, render: HighlightRender) -> bool {
        let revision = render.marker.revision;
        let stored = self.marker().map_or(0, |m| m.revision);
        if revision != self.latest_requested || revision <= stored {
            tracing::debug!(
                revision,
                latest_requested = self.latest_requested,
                stored,
                "dropping stale highlight render"
            );
            return false;
        }
        self.latest = Some((render.marker, render.annotations));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::span::Span;

    fn session() -> HighlightSession {
        HighlightSession::new(Highlighter::builtin())
    }

    fn render_for(request: &HighlightRequest, hl: &Highlighter) -> HighlightRender {
        HighlightRender {
            marker: request.marker,
            annotations: hl.highlight(&request.text),
        }
    }

    #[test]
    fn test_current_before_update() {
        let session = session();
        assert!(session.current().is_none());
        assert!(!session.is_current());
        assert!(session.is_stale(""));
    }

    #[test]
    fn test_update_stores_result() {
        let mut session = session();
        let spans = session.update("x = 42").spans().to_vec();
        assert_eq!(spans, vec![Span::new(4, 6, Category::Number)]);
        assert_eq!(session.current().unwrap().spans(), spans.as_slice());
        assert!(session.is_current());
        assert!(!session.is_stale("x = 42"));
        assert!(session.is_stale("x = 43"));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut session = session();
        let first = session.update("for i in range(10):").clone();
        let second = session.update("for i in range(10):").clone();
        assert_eq!(first, second);
        assert_eq!(session.marker().unwrap().revision, 2);
    }

    #[test]
    fn test_apply_latest_request() {
        let mut session = session();
        let hl = Highlighter::builtin();
        let request = session.request("# hi");
        assert!(!session.is_current());
        assert!(session.apply(render_for(&request, &hl)));
        assert!(session.is_current());
        assert_eq!(
            session.current().unwrap().spans(),
            &[Span::new(0, 4, Category::Comment)]
        );
    }

    #[test]
    fn test_apply_rejects_superseded_request() {
        let mut session = session();
        let hl = Highlighter::builtin();
        let old = session.request("x = 1");
        let new = session.request("x = 12");
        assert!(!session.apply(render_for(&old, &hl)));
        assert!(session.current().is_none());
        assert!(session.apply(render_for(&new, &hl)));
        assert!(!session.apply(render_for(&new, &hl)));
        assert!(!session.is_stale("x = 12"));
    }

    #[test]
    fn test_apply_rejects_render_older_than_update() {
        let mut session = session();
        let hl = Highlighter::builtin();
        let request = session.request("x = 1");
        session.update("x = 2");
        assert!(!session.apply(render_for(&request, &hl)));
        assert!(!session.is_stale("x = 2"));
    }

    #[test]
    fn test_content_hash_differs() {
        assert_ne!(content_hash("a"), content_hash("b"));
        assert_eq!(content_hash(""), FNV_OFFSET);
    }
}

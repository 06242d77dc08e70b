//! Background highlighting worker
//!
//! Runs the pure pipeline on its own thread. Bursts of requests are
//! coalesced so only the newest text is scanned; whether a result is still
//! wanted is decided by [`HighlightSession::apply`](crate::HighlightSession::apply).

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use crate::error::Result;
use crate::highlighter::Highlighter;
use crate::session::SnapshotMarker;
use crate::span::AnnotationSet;

/// Text snapshot to highlight, tagged with its session revision
#[derive(Debug, Clone)]
pub struct HighlightRequest {
    pub marker: SnapshotMarker,
    pub text: String,
}

/// Worker output for one request
#[derive(Debug, Clone)]
pub struct HighlightRender {
    pub marker: SnapshotMarker,
    pub annotations: AnnotationSet,
}

/// Handle to a background highlight thread
///
/// Dropping the handle closes the request channel and the thread exits.
pub struct HighlightWorker {
    tx: Sender<HighlightRequest>,
    rx: Receiver<HighlightRender>,
}

impl HighlightWorker {
    /// Queue a request; returns false if the worker thread has exited
    pub fn submit(&self, request: HighlightRequest) -> bool {
        self.tx.send(request).is_ok()
    }

    /// Next finished render, if one is ready
    pub fn try_recv(&self) -> Option<HighlightRender> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next render
    pub fn recv_timeout(&self, timeout: Duration) -> Option<HighlightRender> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Spawn the worker thread and return its channel endpoints
pub fn spawn_worker(highlighter: Arc<Highlighter>) -> Result<HighlightWorker> {
    let (tx, rx_cmd) = crossbeam_channel::unbounded::<HighlightRequest>();
    let (tx_evt, rx_evt) = crossbeam_channel::unbounded();

    thread::Builder::new()
        .name("tinted-highlight".to_string())
        .spawn(move || {
            tracing::info!("highlight worker started");
            for req in rx_cmd.iter() {
                let mut latest = req;
                // Coalesce backlog bursts so stale work is skipped.
                while let Ok(next) = rx_cmd.try_recv() {
                    latest = next;
                }
                let started = Instant::now();
                let annotations = highlighter.highlight(&latest.text);
                tracing::debug!(
                    revision = latest.marker.revision,
                    text_len = latest.text.len(),
                    spans = annotations.len(),
                    elapsed_ms = started.elapsed().as_secs_f32() * 1000.0,
                    "highlight worker pass"
                );
                let render = HighlightRender {
                    marker: latest.marker,
                    annotations,
                };
                if tx_evt.send(render).is_err() {
                    break;
                }
            }
            tracing::info!("highlight worker stopped");
        })?;

    Ok(HighlightWorker { tx, rx: rx_evt })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::session::HighlightSession;
    use crate::span::Span;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_worker_round_trip() {
        let highlighter = Arc::new(Highlighter::builtin());
        let worker = spawn_worker(Arc::clone(&highlighter)).unwrap();
        let mut session = HighlightSession::new(highlighter);

        assert!(worker.submit(session.request("x = 42")));
        let render = worker.recv_timeout(WAIT).expect("render");
        assert!(session.apply(render));
        assert_eq!(
            session.current().unwrap().spans(),
            &[Span::new(4, 6, Category::Number)]
        );
    }

    #[test]
    fn test_worker_results_for_old_text_are_dropped() {
        let highlighter = Arc::new(Highlighter::builtin());
        let worker = spawn_worker(Arc::clone(&highlighter)).unwrap();
        let mut session = HighlightSession::new(highlighter);

        let texts = ["x = 1", "x = 12", "x = 123"];
        for text in texts {
            assert!(worker.submit(session.request(text)));
        }

        // Coalescing may skip intermediate requests; the newest always arrives.
        let mut accepted = 0;
        loop {
            let render = worker.recv_timeout(WAIT).expect("render");
            let newest = render.marker.revision == 3;
            if session.apply(render) {
                accepted += 1;
            }
            if newest {
                break;
            }
        }
        assert_eq!(accepted, 1);
        assert!(session.is_current());
        assert!(!session.is_stale("x = 123"));
        assert_eq!(
            session.current().unwrap().spans(),
            &[Span::new(4, 7, Category::Number)]
        );
    }

    #[test]
    fn test_try_recv_empty() {
        let worker = spawn_worker(Arc::new(Highlighter::builtin())).unwrap();
        assert!(worker.try_recv().is_none());
    }
}

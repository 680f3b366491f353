//! Structured progress events emitted while computing suggestions.
//!
//! Bandits report what they are doing through an injected [`EventSink`] instead
//! of writing to a global logger. The default [`TracingSink`] forwards events to
//! `tracing` when the `tracing` feature is enabled and drops them otherwise.

/// Something a bandit observed or decided during one suggestion call.
#[derive(Clone, Debug, PartialEq)]
pub enum SuggestEvent {
    /// Too few completed trials; suggestions come from the prior.
    WarmingUp {
        /// Completed trials so far.
        n_ok: usize,
        /// Completed trials needed before model-based suggestions.
        n_startup_jobs: usize,
    },
    /// The good/bad boundary chosen for this call.
    Threshold {
        /// The outcome value separating good from bad.
        y_thresh: f64,
        /// Number of outcomes below the threshold.
        n_good: usize,
        /// Number of outcomes at or above the threshold.
        n_bad: usize,
    },
    /// The best outcomes, ascending, that fall in the good set.
    GoodScores(Vec<f64>),
    /// Pending trials that were left out of the good/bad split.
    PendingIgnored {
        /// Number of running or not-yet-started trials.
        n_pending: usize,
    },
    /// Pending trials that were given an imputed outcome.
    PendingImputed {
        /// Number of imputed trials.
        n_pending: usize,
        /// The imputed outcome.
        lie: f64,
    },
    /// Candidates drawn from the good-density model.
    DrawingCandidates {
        /// Number of candidates.
        n_candidates: usize,
    },
    /// Log expected-improvement scores of the kept candidates, best first.
    BestScores(Vec<f64>),
}

/// Receiver of [`SuggestEvent`]s.
///
/// Any `Fn(&SuggestEvent) + Send + Sync` closure is a sink.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use parzen::event::{EventSink, SuggestEvent};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = {
///     let seen = Arc::clone(&seen);
///     move |event: &SuggestEvent| seen.lock().unwrap().push(event.clone())
/// };
/// sink.emit(&SuggestEvent::DrawingCandidates { n_candidates: 8 });
/// assert_eq!(seen.lock().unwrap().len(), 1);
/// ```
pub trait EventSink: Send + Sync {
    /// Handles one event.
    fn emit(&self, event: &SuggestEvent);
}

impl<F> EventSink for F
where
    F: Fn(&SuggestEvent) + Send + Sync,
{
    fn emit(&self, event: &SuggestEvent) {
        self(event);
    }
}

/// Sink forwarding events to `tracing`; a no-op without the `tracing` feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    #[allow(unused_variables)]
    fn emit(&self, event: &SuggestEvent) {
        match event {
            SuggestEvent::WarmingUp {
                n_ok,
                n_startup_jobs,
            } => {
                trace_info!(n_ok, n_startup_jobs, "warming up");
            }
            SuggestEvent::Threshold {
                y_thresh,
                n_good,
                n_bad,
            } => {
                trace_info!(y_thresh, n_good, n_bad, "splitting results at threshold");
            }
            SuggestEvent::GoodScores(scores) => {
                trace_debug!(?scores, "good scores");
            }
            SuggestEvent::PendingIgnored { n_pending } => {
                trace_warn!(n_pending, "ignoring running and new trials");
            }
            SuggestEvent::PendingImputed { n_pending, lie } => {
                trace_info!(n_pending, lie, "imputing outcomes for pending trials");
            }
            SuggestEvent::DrawingCandidates { n_candidates } => {
                trace_info!(n_candidates, "drawing candidates");
            }
            SuggestEvent::BestScores(scores) => {
                trace_debug!(?scores, "best log expected improvement");
            }
        }
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &SuggestEvent) {}
}

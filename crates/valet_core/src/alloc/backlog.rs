//! FIFO backlog of requests that could not be placed on arrival. The queue
//! stores ids only; request state lives in the history, so stale entries are
//! detected and dropped at retry time rather than eagerly.

use std::collections::VecDeque;

use crate::types::RequestId;

/// Waiting line for unplaced requests, oldest first.
#[derive(Debug, Clone, Default)]
pub struct PendingBacklog {
    queue: VecDeque<RequestId>,
}

impl PendingBacklog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly queued request at the back.
    pub fn push(&mut self, request: RequestId) {
        self.queue.push_back(request);
    }

    /// Take the oldest waiting request.
    pub fn pop(&mut self) -> Option<RequestId> {
        self.queue.pop_front()
    }

    /// Put a request back at the end of the line after a failed retry.
    pub fn requeue(&mut self, request: RequestId) {
        self.queue.push_back(request);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Counters over backlog traffic.
#[derive(Debug, Default)]
pub struct BacklogMetrics {
    enqueued_total: u64,
    retried_total: u64,
    reallocated_total: u64,
    dropped_total: u64,
    deferred_total: u64,
}

impl BacklogMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueued_total(&self) -> u64 {
        self.enqueued_total
    }

    pub fn retried_total(&self) -> u64 {
        self.retried_total
    }

    pub fn reallocated_total(&self) -> u64 {
        self.reallocated_total
    }

    pub fn dropped_total(&self) -> u64 {
        self.dropped_total
    }

    pub fn deferred_total(&self) -> u64 {
        self.deferred_total
    }

    pub fn record_enqueued(&mut self) {
        self.enqueued_total += 1;
    }

    pub fn record_retried(&mut self) {
        self.retried_total += 1;
    }

    pub fn record_reallocated(&mut self) {
        self.reallocated_total += 1;
    }

    /// A queued id whose request had already left the Requested state.
    pub fn record_dropped(&mut self) {
        self.dropped_total += 1;
    }

    /// A retry pass stopped with this request back at the end of the line.
    pub fn record_deferred(&mut self) {
        self.deferred_total += 1;
    }
}

//! `SearchScheduler`: bounded, paced driver for concurrent flood-fill
//! searches.
//!
//! # Quantum model
//!
//! The host calls [`tick`](SearchScheduler::tick) once per host quantum.  The
//! scheduler only does work every `interval_quanta` quanta, and only while
//! it has requests; once both the queue and the active set are empty it
//! stops, and `tick` becomes a no-op until the next
//! [`submit`](SearchScheduler::submit).
//!
//! On a working quantum:
//!
//! 1. Promote queued requests (FIFO) while fewer than `max_concurrent` are
//!    active.
//! 2. In admission order, pull exactly one batch from each active search.
//! 3. Keep the batch cells that are valid targets; append them to the
//!    request's results.
//! 4. Resolve a request when its search is exhausted or it has collected
//!    `max_results` matches.
//!
//! Resolved results wait in the scheduler until the caller
//! [`take`](SearchScheduler::take)s them.

use std::collections::VecDeque;

use log::debug;
use rustc_hash::FxHashMap;

use vn_core::{Pacer, Quantum, RequestId, SchedulerConfig};
use vn_grid::{Cell, Grid};

use crate::{FloodFillSearch, SearchError, SearchOptions, SearchResult};

/// Where a request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Queued,
    Active,
    /// Resolved or cancelled; the outcome is waiting to be taken.
    Finished,
}

struct SearchRequest {
    id:          RequestId,
    search:      FloodFillSearch,
    batch_size:  usize,
    max_results: usize,
    found:       Vec<Cell>,
}

impl SearchRequest {
    /// One quantum of work.  Returns `true` when the request is done.
    fn service<G: Grid + ?Sized>(&mut self, grid: &G) -> bool {
        if self.found.len() >= self.max_results {
            return true;
        }
        let batch = self.search.next_batch(grid, self.batch_size);
        if batch.is_empty() {
            return true;
        }
        let classifier = self.search.classifier();
        for cell in batch {
            if cell.is_valid() && classifier.is_included(&cell) {
                self.found.push(cell);
                if self.found.len() >= self.max_results {
                    return true;
                }
            }
        }
        false
    }
}

/// FIFO, concurrency-capped search scheduler.
pub struct SearchScheduler {
    config:    SchedulerConfig,
    pacer:     Pacer,
    next_id:   RequestId,
    queued:    VecDeque<SearchRequest>,
    /// Admission order is servicing order.
    active:    Vec<SearchRequest>,
    /// Outcomes held until [`take`](Self::take); never evicted.
    finished:  FxHashMap<RequestId, SearchResult<Vec<Cell>>>,
    /// Finished since the last `tick`, in completion order.
    completed: Vec<RequestId>,
    running:   bool,
}

impl SearchScheduler {
    /// A scheduler with `config`; `max_concurrent` and `default_batch_size`
    /// are raised to at least 1 so admitted work always progresses.
    pub fn new(mut config: SchedulerConfig) -> Self {
        config.max_concurrent = config.max_concurrent.max(1);
        config.default_batch_size = config.default_batch_size.max(1);
        Self {
            pacer:     Pacer::new(config.interval_quanta),
            config,
            next_id:   RequestId(0),
            queued:    VecDeque::new(),
            active:    Vec::new(),
            finished:  FxHashMap::default(),
            completed: Vec::new(),
            running:   false,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Queue a search.
    ///
    /// The flood is created right away, so an unresolvable start fails here
    /// instead of surfacing later.  Restarts the scheduler if it was idle;
    /// the next `tick` is a working quantum.
    pub fn submit<G: Grid + ?Sized>(&mut self, grid: &G, options: &SearchOptions) -> SearchResult<RequestId> {
        let search = FloodFillSearch::new(grid, options)?;
        let id = self.next_id;
        self.next_id = id.next();

        self.queued.push_back(SearchRequest {
            id,
            search,
            batch_size:  options.batch_size.unwrap_or(self.config.default_batch_size),
            max_results: options.max_results.unwrap_or(usize::MAX),
            found:       Vec::new(),
        });
        debug!("search {id} queued from {} ({} waiting)", options.start, self.queued.len());

        if !self.running {
            self.running = true;
            self.pacer.reset();
        }
        Ok(id)
    }

    /// Advance the scheduler by one host quantum.
    ///
    /// Returns the requests that finished since the previous call (including
    /// cancellations), whose outcomes are ready for [`take`](Self::take).
    pub fn tick<G: Grid + ?Sized>(&mut self, grid: &G, now: Quantum) -> Vec<RequestId> {
        if self.running && self.pacer.ready(now) {
            self.work(grid);
        }
        std::mem::take(&mut self.completed)
    }

    fn work<G: Grid + ?Sized>(&mut self, grid: &G) {
        while self.active.len() < self.config.max_concurrent {
            let Some(request) = self.queued.pop_front() else { break };
            debug!("search {} admitted", request.id);
            self.active.push(request);
        }

        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].service(grid) {
                let request = self.active.remove(i);
                debug!("search {} resolved with {} matches", request.id, request.found.len());
                self.finish(request.id, Ok(request.found));
            } else {
                i += 1;
            }
        }

        if self.queued.is_empty() && self.active.is_empty() {
            debug!("search scheduler idle");
            self.running = false;
        }
    }

    fn finish(&mut self, id: RequestId, outcome: SearchResult<Vec<Cell>>) {
        self.finished.insert(id, outcome);
        self.completed.push(id);
    }

    /// Abandon a queued or active request, freeing its slot.
    ///
    /// Its outcome becomes `Err(SearchError::Cancelled)`.  Cancelling a
    /// request that already finished is a no-op.
    pub fn cancel(&mut self, id: RequestId) -> SearchResult<()> {
        let removed = if let Some(pos) = self.queued.iter().position(|r| r.id == id) {
            self.queued.remove(pos).is_some()
        } else if let Some(pos) = self.active.iter().position(|r| r.id == id) {
            self.active.remove(pos);
            true
        } else {
            false
        };

        if removed {
            debug!("search {id} cancelled");
            self.finish(id, Err(SearchError::Cancelled(id)));
            if self.queued.is_empty() && self.active.is_empty() {
                self.running = false;
            }
            Ok(())
        } else if self.finished.contains_key(&id) {
            Ok(())
        } else {
            Err(SearchError::UnknownRequest(id))
        }
    }

    pub fn status(&self, id: RequestId) -> Option<RequestStatus> {
        if self.finished.contains_key(&id) {
            Some(RequestStatus::Finished)
        } else if self.active.iter().any(|r| r.id == id) {
            Some(RequestStatus::Active)
        } else if self.queued.iter().any(|r| r.id == id) {
            Some(RequestStatus::Queued)
        } else {
            None
        }
    }

    /// Remove and return a finished request's outcome.
    ///
    /// `None` while the request is still queued or active, or once taken.
    /// Outcomes that are never taken stay in the scheduler.
    pub fn take(&mut self, id: RequestId) -> Option<SearchResult<Vec<Cell>>> {
        self.finished.remove(&id)
    }

    /// `false` once there is nothing queued or active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Outcomes waiting for [`take`](Self::take).
    pub fn finished_len(&self) -> usize {
        self.finished.len()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }
}

impl Default for SearchScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

//! Navigator observer trait for completion reporting.

use log::{debug, info, warn};

use vn_core::{AgentId, PlanId, Quantum, RequestId};
use vn_motion::WalkStep;
use vn_path::{Path, PlanResult};

/// Callbacks invoked by [`Navigator::tick`][crate::Navigator::tick] as work
/// completes.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: walk logger
///
/// ```rust,ignore
/// struct Arrivals(Vec<AgentId>);
///
/// impl NavObserver for Arrivals {
///     fn on_walk_done(&mut self, _q: Quantum, agent: AgentId, step: &WalkStep) {
///         if *step == WalkStep::Arrived {
///             self.0.push(agent);
///         }
///     }
/// }
/// ```
pub trait NavObserver {
    /// Called at the very start of each quantum, before any processing.
    fn on_quantum_start(&mut self, _now: Quantum) {}

    /// A search request resolved or was cancelled.
    ///
    /// The outcome waits in the navigator until
    /// [`take_found`][crate::Navigator::take_found] is called.
    fn on_search_done(&mut self, _now: Quantum, _id: RequestId) {}

    /// A planning run finished.  `walker` is the agent that will follow the
    /// path when the plan came from `walk_to`; such results are reported
    /// only here and are not kept for
    /// [`take_plan`][crate::Navigator::take_plan].
    fn on_plan_done(
        &mut self,
        _now:    Quantum,
        _id:     PlanId,
        _walker: Option<AgentId>,
        _result: &PlanResult<Path>,
    ) {}

    /// A walk ended with [`WalkStep::Arrived`] or [`WalkStep::Failed`].
    fn on_walk_done(&mut self, _now: Quantum, _agent: AgentId, _step: &WalkStep) {}

    /// Called at the end of each quantum with the number of completions
    /// reported during it.
    fn on_quantum_end(&mut self, _now: Quantum, _completed: usize) {}
}

/// A [`NavObserver`] that does nothing.
pub struct NoopObserver;

impl NavObserver for NoopObserver {}

/// A [`NavObserver`] that forwards every completion to the `log` facade.
pub struct LogObserver;

impl NavObserver for LogObserver {
    fn on_search_done(&mut self, now: Quantum, id: RequestId) {
        debug!("{now}: search {id} done");
    }

    fn on_plan_done(&mut self, now: Quantum, id: PlanId, walker: Option<AgentId>, result: &PlanResult<Path>) {
        match (result, walker) {
            (Ok(path), Some(agent)) => info!("{now}: plan {id} for {agent}: {} cells", path.len()),
            (Ok(path), None) => info!("{now}: plan {id}: {} cells", path.len()),
            (Err(e), _) => warn!("{now}: plan {id} failed: {e}"),
        }
    }

    fn on_walk_done(&mut self, now: Quantum, agent: AgentId, step: &WalkStep) {
        match step {
            WalkStep::Failed(e) => warn!("{now}: {agent} walk failed: {e}"),
            _ => info!("{now}: {agent} arrived"),
        }
    }
}

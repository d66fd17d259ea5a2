//! The `Navigator` struct and its quantum loop.

use std::collections::BTreeMap;

use log::debug;
use rustc_hash::FxHashMap;

use vn_core::{AgentId, Coord, NavConfig, PlanId, Quantum, RequestId};
use vn_grid::{Cell, Grid};
use vn_motion::{AgentHost, MotionEngine, MotionError, WalkStep};
use vn_path::{AStarSearch, Path, PlanConstraints, PlanResult, PlanStep};
use vn_search::{SearchOptions, SearchResult, SearchScheduler};

use crate::{NavError, NavObserver, NavResult};

// ── Pending plans ─────────────────────────────────────────────────────────────

struct PendingPlan {
    search: AStarSearch,
    /// Agent that starts walking the path once it is found.
    walker: Option<AgentId>,
}

// ── Navigator ─────────────────────────────────────────────────────────────────

/// The navigation runner.
///
/// `Navigator` owns every long-lived piece of navigation state and drives the
/// three-phase quantum loop:
///
/// 1. **Search**: one quantum of the [`SearchScheduler`] (paced, capped).
/// 2. **Plan**: one A* expansion per in-flight plan, ascending `PlanId`.
///    Plans started by [`walk_to`](Self::walk_to) hand their path to the
///    agent's walker as soon as it is found.
/// 3. **Walk**: one step per walking agent, ascending `AgentId`.
///
/// The grid and the agents belong to the host and are passed into every
/// call; nothing here holds on to them between quanta.
///
/// Create via [`NavigatorBuilder`][crate::NavigatorBuilder] or
/// [`Navigator::new`].
pub struct Navigator {
    config:    NavConfig,
    now:       Quantum,
    scheduler: SearchScheduler,
    plans:     BTreeMap<PlanId, PendingPlan>,
    /// Finished `plan` outcomes awaiting `take_plan`.
    outcomes:  FxHashMap<PlanId, PlanResult<Path>>,
    next_plan: PlanId,
    motion:    MotionEngine,
}

impl Navigator {
    /// Validate `config` and build an idle navigator at quantum zero.
    pub fn new(config: NavConfig) -> NavResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, Quantum::ZERO))
    }

    pub(crate) fn from_parts(config: NavConfig, now: Quantum) -> Self {
        Self {
            scheduler: SearchScheduler::new(config.scheduler.clone()),
            motion:    MotionEngine::new(config.walk.clone()),
            config,
            now,
            plans:     BTreeMap::new(),
            outcomes:  FxHashMap::default(),
            next_plan: PlanId(0),
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// The quantum the next `tick` will process.
    pub fn now(&self) -> Quantum {
        self.now
    }

    pub fn scheduler(&self) -> &SearchScheduler {
        &self.scheduler
    }

    pub fn motion(&self) -> &MotionEngine {
        &self.motion
    }

    /// Planner constraints built from the configured planner section.
    pub fn default_constraints(&self) -> PlanConstraints {
        PlanConstraints::new(&self.config.planner)
    }

    // ── Searches ──────────────────────────────────────────────────────────

    /// Submit a flood-fill search to the scheduler.
    pub fn find<G: Grid + ?Sized>(&mut self, grid: &G, options: &SearchOptions) -> NavResult<RequestId> {
        Ok(self.scheduler.submit(grid, options)?)
    }

    /// Remove and return a finished search's matches.
    pub fn take_found(&mut self, id: RequestId) -> Option<SearchResult<Vec<Cell>>> {
        self.scheduler.take(id)
    }

    pub fn cancel_find(&mut self, id: RequestId) -> NavResult<()> {
        Ok(self.scheduler.cancel(id)?)
    }

    // ── Plans ─────────────────────────────────────────────────────────────

    /// Start planning a path from `start` to `goal`.
    ///
    /// Unresolvable endpoints fail here; everything else is reported when the
    /// plan finishes.
    pub fn plan<G: Grid + ?Sized>(
        &mut self,
        grid:        &G,
        start:       Coord,
        goal:        Coord,
        constraints: PlanConstraints,
    ) -> NavResult<PlanId> {
        let search = AStarSearch::new(grid, start, goal, constraints)?;
        Ok(self.insert_plan(search, None))
    }

    /// Plan from `agent`'s current cell to `goal`, then walk the result.
    ///
    /// Fails with [`MotionError::AlreadyWalking`] while the agent is walking
    /// or waiting on an earlier `walk_to` plan, and with
    /// [`MotionError::AgentInvalidated`] when the host does not know it.
    pub fn walk_to<G, H>(&mut self, grid: &G, host: &H, agent: AgentId, goal: Coord) -> NavResult<PlanId>
    where
        G: Grid + ?Sized,
        H: AgentHost + ?Sized,
    {
        if self.motion.is_walking(agent) || self.plans.values().any(|p| p.walker == Some(agent)) {
            return Err(MotionError::AlreadyWalking.into());
        }
        let pos = host.position(agent).ok_or(MotionError::AgentInvalidated)?;
        let start = Coord::containing(pos);
        let search = AStarSearch::new(grid, start, goal, self.default_constraints())?;
        self.motion.register(agent);
        let id = self.insert_plan(search, Some(agent));
        debug!("plan {id}: {agent} {start} -> {goal}");
        Ok(id)
    }

    /// Walk an already-planned path.
    pub fn walk_path(&mut self, agent: AgentId, path: &Path) -> NavResult<()> {
        self.motion.register(agent);
        Ok(self.motion.begin_walk(agent, path)?)
    }

    fn insert_plan(&mut self, search: AStarSearch, walker: Option<AgentId>) -> PlanId {
        let id = self.next_plan;
        self.next_plan = id.next();
        self.plans.insert(id, PendingPlan { search, walker });
        id
    }

    /// Remove and return a finished `plan` outcome.
    ///
    /// Outcomes wait here until taken.  `walk_to` plans are never kept: their
    /// result goes only to [`NavObserver::on_plan_done`], so `take_plan`
    /// returns `None` for them.
    pub fn take_plan(&mut self, id: PlanId) -> Option<PlanResult<Path>> {
        self.outcomes.remove(&id)
    }

    /// Abandon an in-flight plan.  Its outcome is discarded and a pending
    /// walk never starts.
    pub fn cancel_plan(&mut self, id: PlanId) -> NavResult<()> {
        match self.plans.remove(&id) {
            Some(_) => {
                debug!("plan {id} cancelled");
                Ok(())
            }
            None => Err(NavError::UnknownPlan(id)),
        }
    }

    // ── Walks ─────────────────────────────────────────────────────────────

    /// Give `agent` a walker.  Returns `false` if it already had one.
    pub fn register(&mut self, agent: AgentId) -> bool {
        self.motion.register(agent)
    }

    /// Stop `agent`: abort its walk and drop any `walk_to` plan still
    /// running for it.  Returns `true` if anything was in flight.
    pub fn stop(&mut self, agent: AgentId) -> bool {
        let before = self.plans.len();
        self.plans.retain(|_, p| p.walker != Some(agent));
        let dropped = self.plans.len() != before;
        let walking = self.motion.stop(agent).unwrap_or(false);
        dropped || walking
    }

    pub fn is_walking(&self, agent: AgentId) -> bool {
        self.motion.is_walking(agent)
    }

    // ── Quantum loop ──────────────────────────────────────────────────────

    /// `true` once there is no search, plan or walk in flight.
    pub fn is_idle(&self) -> bool {
        !self.scheduler.is_running() && self.plans.is_empty() && self.motion.walking_len() == 0
    }

    /// Process one quantum.  Returns the number of completions reported to
    /// `observer`.
    pub fn tick<G, H, O>(&mut self, grid: &G, host: &mut H, observer: &mut O) -> usize
    where
        G: Grid + ?Sized,
        H: AgentHost + ?Sized,
        O: NavObserver + ?Sized,
    {
        let now = self.now;
        observer.on_quantum_start(now);
        let mut completed = 0;

        // ── Phase 1: search scheduler quantum ─────────────────────────────
        for id in self.scheduler.tick(grid, now) {
            observer.on_search_done(now, id);
            completed += 1;
        }

        // ── Phase 2: one expansion per plan ───────────────────────────────
        let mut finished = Vec::new();
        for (&id, pending) in self.plans.iter_mut() {
            match pending.search.step(grid) {
                PlanStep::Pending => {}
                PlanStep::Found(path) => finished.push((id, Ok(path))),
                PlanStep::Failed(e) => finished.push((id, Err(e))),
            }
        }
        for (id, result) in finished {
            let Some(pending) = self.plans.remove(&id) else { continue };
            if let (Some(agent), Ok(path)) = (pending.walker, &result) {
                if let Err(e) = self.motion.begin_walk(agent, path) {
                    observer.on_walk_done(now, agent, &WalkStep::Failed(e));
                    completed += 1;
                }
            }
            observer.on_plan_done(now, id, pending.walker, &result);
            if pending.walker.is_none() {
                self.outcomes.insert(id, result);
            }
            completed += 1;
        }

        // ── Phase 3: walkers ──────────────────────────────────────────────
        for (agent, step) in self.motion.tick(host) {
            observer.on_walk_done(now, agent, &step);
            completed += 1;
        }

        observer.on_quantum_end(now, completed);
        self.now = now + 1;
        completed
    }

    /// Tick until idle, giving up after `max_quanta`.
    ///
    /// Returns the number of quanta processed.
    pub fn run_until_idle<G, H, O>(
        &mut self,
        grid:       &G,
        host:       &mut H,
        observer:   &mut O,
        max_quanta: u64,
    ) -> NavResult<u64>
    where
        G: Grid + ?Sized,
        H: AgentHost + ?Sized,
        O: NavObserver + ?Sized,
    {
        let mut quanta = 0;
        while !self.is_idle() {
            if quanta >= max_quanta {
                return Err(NavError::Stalled { quanta });
            }
            self.tick(grid, host, observer);
            quanta += 1;
        }
        Ok(quanta)
    }
}

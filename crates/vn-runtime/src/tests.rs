//! Integration tests for vn-runtime.

use vn_core::{AgentId, Coord, NavConfig, PlanId, Quantum, RequestId, SchedulerConfig};
use vn_grid::{ChunkPos, MemoryGrid};
use vn_motion::{MemoryHost, MotionError, WalkStep};
use vn_path::{Path, PlanError, PlanResult};
use vn_search::{SearchError, SearchOptions};

use crate::{NavError, NavObserver, Navigator, NavigatorBuilder, NoopObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn at(x: i32, y: i32, z: i32) -> Coord {
    Coord::new(x, y, z)
}

/// Stone floor at y = 63 over x, z ∈ [-12, 12]; agents stand at y = 64.
fn floor() -> MemoryGrid {
    let mut g = MemoryGrid::default();
    g.fill(at(-12, 63, -12), at(12, 63, 12), "stone");
    g
}

fn nav() -> Navigator {
    Navigator::new(NavConfig::default()).unwrap()
}

fn host_with(agent: AgentId, cell: Coord) -> MemoryHost {
    let mut host = MemoryHost::new();
    host.spawn(agent, cell.footing());
    host
}

/// Records every completion in the order reported.
#[derive(Default)]
struct Recorder {
    searches: Vec<RequestId>,
    plans:    Vec<(PlanId, Option<AgentId>, bool)>,
    goals:    Vec<Option<Coord>>,
    walks:    Vec<(AgentId, WalkStep)>,
    quanta:   Vec<Quantum>,
}

impl NavObserver for Recorder {
    fn on_search_done(&mut self, _now: Quantum, id: RequestId) {
        self.searches.push(id);
    }

    fn on_plan_done(&mut self, _now: Quantum, id: PlanId, walker: Option<AgentId>, result: &PlanResult<Path>) {
        self.plans.push((id, walker, result.is_ok()));
        self.goals.push(result.as_ref().ok().and_then(|p| p.goal()).map(|c| c.coord));
    }

    fn on_walk_done(&mut self, _now: Quantum, agent: AgentId, step: &WalkStep) {
        self.walks.push((agent, step.clone()));
    }

    fn on_quantum_end(&mut self, now: Quantum, _completed: usize) {
        self.quanta.push(now);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let result = NavigatorBuilder::new()
            .scheduler(SchedulerConfig { max_concurrent: 0, ..SchedulerConfig::default() })
            .build();
        assert!(matches!(result, Err(NavError::Config(_))));
    }

    #[test]
    fn registers_agents_and_start_quantum() {
        let nav = NavigatorBuilder::new()
            .agents([AgentId(0), AgentId(1)])
            .start_at(Quantum(10))
            .build()
            .unwrap();
        assert_eq!(nav.motion().len(), 2);
        assert_eq!(nav.now(), Quantum(10));
        assert!(nav.is_idle());
    }
}

// ── Quantum loop ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod quantum_loop {
    use super::*;

    #[test]
    fn find_reports_and_keeps_matches() {
        let mut g = floor();
        g.set(at(3, 64, 0), "chest");
        let mut nav = nav();
        let mut host = MemoryHost::new();
        let mut rec = Recorder::default();

        let id = nav
            .find(&g, &SearchOptions::new(at(0, 64, 0)).max_distance(5.0).target_type("chest"))
            .unwrap();
        assert!(!nav.is_idle());
        let quanta = nav.run_until_idle(&g, &mut host, &mut rec, 1_000).unwrap();

        assert_eq!(rec.searches, vec![id]);
        assert_eq!(rec.quanta.len() as u64, quanta);
        let found = nav.take_found(id).unwrap().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].coord, at(3, 64, 0));
    }

    #[test]
    fn plan_advances_one_node_per_quantum() {
        let g = floor();
        let mut nav = nav();
        let mut host = MemoryHost::new();
        let mut rec = Recorder::default();

        let id = nav.plan(&g, at(0, 64, 0), at(10, 64, 0), nav.default_constraints()).unwrap();
        nav.tick(&g, &mut host, &mut rec);
        assert!(rec.plans.is_empty());
        assert!(!nav.is_idle());

        nav.run_until_idle(&g, &mut host, &mut rec, 1_000).unwrap();
        assert_eq!(rec.plans, vec![(id, None, true)]);
        let path = nav.take_plan(id).unwrap().unwrap();
        assert_eq!(path.len(), 11);
        assert!(nav.take_plan(id).is_none());
    }

    #[test]
    fn unresolvable_endpoint_fails_on_submit() {
        let mut g = floor();
        g.unload_chunk(ChunkPos::of(at(40, 64, 0)));
        let mut nav = nav();
        let err = nav.plan(&g, at(0, 64, 0), at(40, 64, 0), nav.default_constraints()).unwrap_err();
        assert!(matches!(err, NavError::Plan(PlanError::UnresolvableEndpoint { .. })));
        assert!(nav.is_idle());
    }

    #[test]
    fn run_until_idle_gives_up() {
        let g = floor();
        let agent = AgentId(0);
        let mut host = host_with(agent, at(0, 64, 0));
        let mut nav = nav();
        nav.walk_to(&g, &host, agent, at(10, 64, 0)).unwrap();
        let err = nav.run_until_idle(&g, &mut host, &mut NoopObserver, 3).unwrap_err();
        assert!(matches!(err, NavError::Stalled { quanta: 3 }));
        assert_eq!(nav.now(), Quantum(3));
    }
}

// ── walk_to ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod walk_to {
    use super::*;

    #[test]
    fn plans_then_walks_to_goal() {
        let g = floor();
        let agent = AgentId(0);
        let mut host = host_with(agent, at(0, 64, 0));
        let mut nav = nav();
        let mut rec = Recorder::default();

        let id = nav.walk_to(&g, &host, agent, at(6, 64, 0)).unwrap();
        nav.run_until_idle(&g, &mut host, &mut rec, 1_000).unwrap();

        assert_eq!(rec.plans, vec![(id, Some(agent), true)]);
        assert_eq!(rec.walks, vec![(agent, WalkStep::Arrived)]);
        let goal = at(6, 64, 0).footing();
        let stop = nav.config().walk.stop_distance;
        assert!(host.pose(agent).unwrap().position.distance(goal) < stop);
        assert_eq!(rec.goals, vec![Some(at(6, 64, 0))]);
        assert!(nav.take_plan(id).is_none());
    }

    #[test]
    fn repeated_walks_leave_no_outcomes_behind() {
        let g = floor();
        let agent = AgentId(0);
        let mut host = host_with(agent, at(0, 64, 0));
        let mut nav = nav();
        let mut rec = Recorder::default();

        let mut ids = Vec::new();
        for goal in [at(4, 64, 0), at(4, 64, 4), at(0, 64, 4), at(0, 64, 0)] {
            ids.push(nav.walk_to(&g, &host, agent, goal).unwrap());
            nav.run_until_idle(&g, &mut host, &mut rec, 1_000).unwrap();
        }
        assert_eq!(rec.plans.len(), 4);
        assert!(ids.into_iter().all(|id| nav.take_plan(id).is_none()));
    }

    #[test]
    fn second_walk_is_rejected() {
        let g = floor();
        let agent = AgentId(0);
        let mut host = host_with(agent, at(0, 64, 0));
        let mut nav = nav();

        nav.walk_to(&g, &host, agent, at(6, 64, 0)).unwrap();
        let err = nav.walk_to(&g, &host, agent, at(0, 64, 6)).unwrap_err();
        assert!(matches!(err, NavError::Motion(MotionError::AlreadyWalking)));

        // Still rejected once the plan has turned into a walk.
        while !nav.is_walking(agent) {
            nav.tick(&g, &mut host, &mut NoopObserver);
        }
        let err = nav.walk_to(&g, &host, agent, at(0, 64, 6)).unwrap_err();
        assert!(matches!(err, NavError::Motion(MotionError::AlreadyWalking)));
    }

    #[test]
    fn unknown_agent_is_invalid() {
        let g = floor();
        let host = MemoryHost::new();
        let mut nav = nav();
        let err = nav.walk_to(&g, &host, AgentId(5), at(6, 64, 0)).unwrap_err();
        assert!(matches!(err, NavError::Motion(MotionError::AgentInvalidated)));
    }

    #[test]
    fn despawned_agent_fails_walk() {
        let g = floor();
        let agent = AgentId(1);
        let mut host = host_with(agent, at(0, 64, 0));
        let mut nav = nav();
        let mut rec = Recorder::default();

        nav.walk_to(&g, &host, agent, at(6, 64, 0)).unwrap();
        host.despawn(agent);
        nav.run_until_idle(&g, &mut host, &mut rec, 1_000).unwrap();
        assert_eq!(rec.walks, vec![(agent, WalkStep::Failed(MotionError::AgentInvalidated))]);
    }

    #[test]
    fn failed_plan_never_walks() {
        let mut g = floor();
        for dx in -1..=1 {
            for dz in -1..=1 {
                if (dx, dz) != (0, 0) {
                    g.set_tagged(at(dx, 64, dz), "oak_fence", ["fence"]);
                }
            }
        }
        let agent = AgentId(0);
        let mut host = host_with(agent, at(0, 64, 0));
        let mut nav = nav();
        let mut rec = Recorder::default();

        let id = nav.walk_to(&g, &host, agent, at(6, 64, 0)).unwrap();
        nav.run_until_idle(&g, &mut host, &mut rec, 1_000).unwrap();
        assert_eq!(rec.plans, vec![(id, Some(agent), false)]);
        assert!(rec.walks.is_empty());
        assert!(nav.take_plan(id).is_none());
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancellation {
    use super::*;

    #[test]
    fn cancel_plan_discards_it() {
        let g = floor();
        let mut nav = nav();
        let id = nav.plan(&g, at(0, 64, 0), at(10, 64, 0), nav.default_constraints()).unwrap();
        nav.cancel_plan(id).unwrap();
        assert!(nav.is_idle());
        assert!(matches!(nav.cancel_plan(id), Err(NavError::UnknownPlan(p)) if p == id));
        assert!(nav.take_plan(id).is_none());
    }

    #[test]
    fn cancel_find_is_reported() {
        let g = floor();
        let mut nav = nav();
        let mut host = MemoryHost::new();
        let mut rec = Recorder::default();

        let id = nav.find(&g, &SearchOptions::new(at(0, 64, 0))).unwrap();
        nav.cancel_find(id).unwrap();
        nav.tick(&g, &mut host, &mut rec);
        assert_eq!(rec.searches, vec![id]);
        assert_eq!(nav.take_found(id), Some(Err(SearchError::Cancelled(id))));
    }

    #[test]
    fn stop_drops_pending_walk() {
        let g = floor();
        let agent = AgentId(0);
        let mut host = host_with(agent, at(0, 64, 0));
        let mut nav = nav();
        let mut rec = Recorder::default();

        nav.walk_to(&g, &host, agent, at(6, 64, 0)).unwrap();
        assert!(nav.stop(agent));
        assert!(!nav.stop(agent));
        nav.run_until_idle(&g, &mut host, &mut rec, 10).unwrap();
        assert!(rec.plans.is_empty());
        assert!(rec.walks.is_empty());
        assert_eq!(host.pose(agent).unwrap().position, at(0, 64, 0).footing());
    }
}

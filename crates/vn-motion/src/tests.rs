//! Unit tests for vn-motion.

use vn_core::{AgentId, Coord, WalkConfig};
use vn_grid::Cell;
use vn_path::Path;

use crate::{AgentHost, MemoryHost, MotionEngine, MotionError, WalkStep, Walker};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Start-inclusive path along +x at y = 64, from x = 0 to x = `len`.
fn line_path(len: i32) -> Path {
    Path::new((0..=len).map(|x| Cell::new(Coord::new(x, 64, 0), "air")).collect())
}

fn spawn_at_origin(host: &mut MemoryHost, agent: AgentId) {
    host.spawn(agent, Coord::new(0, 64, 0).footing());
}

/// Tick until the walk ends; returns the final step and the quanta taken.
fn walk_out(walker: &mut Walker, agent: AgentId, host: &mut MemoryHost, budget: u32) -> (WalkStep, u32) {
    for q in 1..=budget {
        match walker.tick(agent, host) {
            WalkStep::Walking => continue,
            step => return (step, q),
        }
    }
    panic!("walk did not end within {budget} quanta");
}

// ── Walker ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod walker {
    use super::*;

    #[test]
    fn walks_to_final_waypoint() {
        let agent = AgentId(1);
        let mut host = MemoryHost::new();
        spawn_at_origin(&mut host, agent);

        let mut walker = Walker::default();
        walker.move_to(&line_path(3), 0.125, 0.5).unwrap();
        assert!(walker.is_walking());

        let (step, quanta) = walk_out(&mut walker, agent, &mut host, 100);
        assert_eq!(step, WalkStep::Arrived);
        assert!(!walker.is_walking());
        // ~2.5 blocks at 1/8 block per quantum, plus waypoint slack.
        assert!((18..=26).contains(&quanta), "took {quanta} quanta");

        let pose = host.pose(agent).unwrap();
        let goal = Coord::new(3, 64, 0).footing();
        assert!(pose.position.distance(goal) < 0.5);
        assert_eq!(pose.facing, Some(goal));
    }

    #[test]
    fn displacement_never_overshoots() {
        let agent = AgentId(0);
        let mut host = MemoryHost::new();
        spawn_at_origin(&mut host, agent);

        let mut walker = Walker::default();
        walker.move_to(&line_path(1), 10.0, 0.01).unwrap();
        assert_eq!(walker.tick(agent, &mut host), WalkStep::Walking);
        let target = Coord::new(1, 64, 0).footing();
        assert!(host.position(agent).unwrap().distance(target) < 1e-4);
        assert_eq!(walker.tick(agent, &mut host), WalkStep::Arrived);
    }

    #[test]
    fn second_move_is_rejected() {
        let mut walker = Walker::default();
        walker.move_to(&line_path(5), 0.125, 1.0).unwrap();
        let before = walker.state().cloned();
        assert_eq!(walker.move_to(&line_path(2), 0.5, 1.0), Err(MotionError::AlreadyWalking));
        assert_eq!(walker.state().cloned(), before);
    }

    #[test]
    fn invalidated_agent_fails_walk() {
        let agent = AgentId(2);
        let mut host = MemoryHost::new();
        spawn_at_origin(&mut host, agent);

        let mut walker = Walker::default();
        walker.move_to(&line_path(5), 0.125, 1.0).unwrap();
        assert_eq!(walker.tick(agent, &mut host), WalkStep::Walking);

        host.despawn(agent);
        assert_eq!(walker.tick(agent, &mut host), WalkStep::Failed(MotionError::AgentInvalidated));
        assert!(!walker.is_walking());
        assert_eq!(walker.tick(agent, &mut host), WalkStep::Idle);
    }

    #[test]
    fn iteration_cutoff() {
        let agent = AgentId(3);
        let mut host = MemoryHost::new();
        spawn_at_origin(&mut host, agent);

        let mut walker = Walker::new(&WalkConfig { max_iterations: 5, ..WalkConfig::default() });
        walker.move_to(&line_path(10), 0.125, 1.0).unwrap();
        let (step, quanta) = walk_out(&mut walker, agent, &mut host, 20);
        assert_eq!(step, WalkStep::Failed(MotionError::IterationLimit { limit: 5 }));
        assert_eq!(quanta, 6);
    }

    #[test]
    fn start_only_path_arrives_immediately() {
        let agent = AgentId(4);
        let mut host = MemoryHost::new();
        spawn_at_origin(&mut host, agent);

        let mut walker = Walker::default();
        walker.move_to(&line_path(0), 0.125, 1.0).unwrap();
        assert_eq!(walker.tick(agent, &mut host), WalkStep::Arrived);
    }

    #[test]
    fn stop_aborts() {
        let mut walker = Walker::default();
        assert!(!walker.stop());
        walker.move_to(&line_path(3), 0.125, 1.0).unwrap();
        assert!(walker.stop());
        assert!(!walker.is_walking());
        walker.move_to(&line_path(3), 0.125, 1.0).unwrap();
    }
}

// ── MotionEngine ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use super::*;

    #[test]
    fn register_and_unknown_agents() {
        let mut engine = MotionEngine::default();
        assert!(engine.register(AgentId(0)));
        assert!(!engine.register(AgentId(0)));
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.begin_walk(AgentId(9), &line_path(2)), Err(MotionError::UnknownAgent(AgentId(9))));
        assert_eq!(engine.stop(AgentId(9)), Err(MotionError::UnknownAgent(AgentId(9))));
        assert!(engine.remove(AgentId(0)).is_some());
        assert!(engine.is_empty());
    }

    #[test]
    fn ticks_all_walkers_and_reports_endings() {
        let mut host = MemoryHost::new();
        let mut engine = MotionEngine::new(WalkConfig { speed: 0.5, stop_distance: 0.3, ..WalkConfig::default() });
        for id in [AgentId(2), AgentId(1)] {
            spawn_at_origin(&mut host, id);
            engine.register(id);
        }
        engine.begin_walk(AgentId(1), &line_path(2)).unwrap();
        engine.begin_walk(AgentId(2), &line_path(2)).unwrap();
        assert_eq!(engine.begin_walk(AgentId(1), &line_path(2)), Err(MotionError::AlreadyWalking));
        assert_eq!(engine.walking_len(), 2);

        let mut ended = Vec::new();
        for _ in 0..50 {
            ended.extend(engine.tick(&mut host));
            if engine.walking_len() == 0 {
                break;
            }
        }
        assert_eq!(ended, vec![(AgentId(1), WalkStep::Arrived), (AgentId(2), WalkStep::Arrived)]);
    }

    #[test]
    fn failure_is_reported_once() {
        let mut host = MemoryHost::new();
        let mut engine = MotionEngine::default();
        engine.register(AgentId(7));
        // Never spawned in the host.
        engine.begin_walk(AgentId(7), &line_path(3)).unwrap();
        let ended = engine.tick(&mut host);
        assert_eq!(ended, vec![(AgentId(7), WalkStep::Failed(MotionError::AgentInvalidated))]);
        assert!(engine.tick(&mut host).is_empty());
        assert!(!engine.is_walking(AgentId(7)));
    }

    #[test]
    fn stop_reports_in_flight() {
        let mut engine = MotionEngine::default();
        engine.register(AgentId(0));
        engine.begin_walk(AgentId(0), &line_path(3)).unwrap();
        assert_eq!(engine.stop(AgentId(0)), Ok(true));
        assert_eq!(engine.stop(AgentId(0)), Ok(false));
    }
}

//! Unit tests for vn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, PlanId, RequestId};

    #[test]
    fn next_is_sequential() {
        assert_eq!(RequestId(0).next(), RequestId(1));
        assert_eq!(PlanId(9).next(), PlanId(10));
    }

    #[test]
    fn ids_order_by_allocation() {
        let mut ids = vec![PlanId(3), PlanId(0), PlanId(0).next()];
        ids.sort();
        assert_eq!(ids, vec![PlanId(0), PlanId(1), PlanId(3)]);
        assert!(AgentId(1) > AgentId(0));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(RequestId(3).to_string(), "RequestId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Coord, Vec3};

    #[test]
    fn coord_offsets() {
        let c = Coord::new(1, 64, -3);
        assert_eq!(c.above(2), Coord::new(1, 66, -3));
        assert_eq!(c.below(1), Coord::new(1, 63, -3));
        assert_eq!(c.offset(-1, 0, 1), Coord::new(0, 64, -2));
    }

    #[test]
    fn coord_metrics() {
        let a = Coord::ORIGIN;
        let b = Coord::new(3, 0, 4);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert_eq!(a.chebyshev(b), 4);
        assert_eq!(a.manhattan(b), 7);
    }

    #[test]
    fn footing_is_floor_center() {
        let c = Coord::new(2, 10, -1);
        assert_eq!(c.center(), Vec3::new(2.5, 10.5, -0.5));
        assert_eq!(c.footing(), Vec3::new(2.5, 10.0, -0.5));
    }

    #[test]
    fn containing_floors_negative_positions() {
        assert_eq!(Coord::containing(Vec3::new(-0.5, 64.0, 0.99)), Coord::new(-1, 64, 0));
    }

    #[test]
    fn zero_vector_normalizes_to_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        let n = Vec3::new(3.0, 0.0, 4.0).normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }
}

#[cfg(test)]
mod shell {
    use std::collections::HashSet;

    use crate::{Coord, CuboidShell, OctahedronShell};

    #[test]
    fn octahedron_shell_sizes() {
        let center = Coord::new(5, 64, -5);
        let coords: Vec<Coord> = OctahedronShell::new(center, 4).collect();
        for d in 1..=4u32 {
            let n = coords.iter().filter(|c| c.manhattan(center) == d).count();
            assert_eq!(n as u32, 4 * d * d + 2, "shell {d}");
        }
        assert_eq!(coords.len(), 6 + 18 + 38 + 66);
    }

    #[test]
    fn octahedron_is_duplicate_free_and_monotone() {
        let coords: Vec<Coord> = OctahedronShell::new(Coord::ORIGIN, 6).collect();
        let unique: HashSet<_> = coords.iter().copied().collect();
        assert_eq!(unique.len(), coords.len());
        assert!(!unique.contains(&Coord::ORIGIN));
        let dists: Vec<u32> = coords.iter().map(|c| c.manhattan(Coord::ORIGIN)).collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn octahedron_restart_is_deterministic() {
        let mut shell = OctahedronShell::new(Coord::ORIGIN, 3);
        let first: Vec<Coord> = shell.by_ref().collect();
        assert!(shell.next().is_none());
        shell.restart();
        let second: Vec<Coord> = shell.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_radius_is_empty() {
        assert_eq!(OctahedronShell::new(Coord::ORIGIN, 0).count(), 0);
        assert_eq!(CuboidShell::new(Coord::ORIGIN, 0).count(), 0);
    }

    #[test]
    fn cuboid_shell_sizes() {
        let coords: Vec<Coord> = CuboidShell::new(Coord::ORIGIN, 3).collect();
        for r in 1..=3i64 {
            let n = coords.iter().filter(|c| c.chebyshev(Coord::ORIGIN) as i64 == r).count();
            let expected = (2 * r + 1).pow(3) - (2 * r - 1).pow(3);
            assert_eq!(n as i64, expected, "radius {r}");
        }
        let unique: HashSet<_> = coords.iter().copied().collect();
        assert_eq!(unique.len(), coords.len());
    }

    #[test]
    fn cuboid_chunks_cover_everything() {
        let mut shell = CuboidShell::new(Coord::new(0, 64, 0), 2);
        let mut total = 0;
        loop {
            let chunk = shell.next_chunk(10);
            if chunk.is_empty() {
                break;
            }
            assert!(chunk.len() <= 10);
            total += chunk.len();
        }
        assert_eq!(total, 26 + 98);
    }
}

#[cfg(test)]
mod time {
    use crate::{Pacer, Quantum};

    #[test]
    fn quantum_arithmetic() {
        assert_eq!(Quantum(3) + 2, Quantum(5));
        assert_eq!(Quantum(5).since(Quantum(2)), 3);
        assert_eq!(Quantum(2).since(Quantum(5)), 0);
    }

    #[test]
    fn pacer_fires_every_interval() {
        let mut pacer = Pacer::new(5);
        let fired: Vec<u64> = (0..16).filter(|&q| pacer.ready(Quantum(q))).collect();
        assert_eq!(fired, vec![0, 5, 10, 15]);
    }

    #[test]
    fn pacer_zero_interval_fires_every_quantum() {
        let mut pacer = Pacer::new(0);
        assert!(pacer.ready(Quantum(0)));
        assert!(pacer.ready(Quantum(1)));
        pacer.reset();
        assert!(pacer.ready(Quantum(1)));
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, NavConfig};

    #[test]
    fn defaults_are_valid() {
        let cfg = NavConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.scheduler.max_concurrent, 2);
        assert_eq!(cfg.walk.max_iterations, 2_500);
    }

    #[test]
    fn zero_concurrency_rejected() {
        let mut cfg = NavConfig::default();
        cfg.scheduler.max_concurrent = 0;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn non_positive_speed_rejected() {
        let mut cfg = NavConfig::default();
        cfg.walk.speed = 0.0;
        assert!(cfg.validate().is_err());
        cfg.walk.speed = f32::NAN;
        assert!(cfg.validate().is_err());
    }
}

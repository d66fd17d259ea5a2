//! quarry: smallest end-to-end demo for the rust_vn navigation core.
//!
//! A single miner stands on a flat stone floor behind a short fence.  The
//! demo searches for the nearest iron ore, measures the vein, plans a path
//! around the fence and walks the miner up to the ore face.
//!
//! Run with `RUST_LOG=debug` to see scheduler admissions and planner
//! statistics.

use std::io::Cursor;

use anyhow::{Context, Result, bail};
use log::info;

use vn_core::{AgentId, Coord, NavConfig, PlanId, PlannerConfig, Quantum, RequestId, SchedulerConfig};
use vn_grid::load_cells_reader;
use vn_motion::{MemoryHost, WalkStep};
use vn_path::{Path, PlanResult};
use vn_runtime::{LogObserver, NavObserver, NavigatorBuilder};
use vn_search::{SearchOptions, connected_cells};

// ── Constants ─────────────────────────────────────────────────────────────────

const MINER:       AgentId = AgentId(0);
const FLOOR_Y:     i32     = 63;
const FLOOR_HALF:  i32     = 16;
const SEARCH_DIST: f32     = 14.0;
const MAX_QUANTA:  u64     = 5_000;

// ── Terrain CSV ───────────────────────────────────────────────────────────────

// Everything not listed reads as air; the floor is filled in code.
const TERRAIN_CSV: &str = "\
x,y,z,type_id,tags\n\
4,64,-2,oak_fence,fence\n\
4,64,-1,oak_fence,fence\n\
4,64,0,oak_fence,fence\n\
4,64,1,oak_fence,fence\n\
4,64,2,oak_fence,fence\n\
9,64,3,iron_ore,ore\n\
10,64,3,iron_ore,ore\n\
10,65,3,iron_ore,ore\n\
10,64,4,iron_ore,ore\n\
-6,64,5,chest,container\n\
";

// ── Observer wrapper to count completions ─────────────────────────────────────

#[derive(Default)]
struct CountingObserver {
    inner:    Option<LogObserver>,
    searches: usize,
    plans:    usize,
    /// Last successful `walk_to` path, as reported on completion.
    walked:   Option<Path>,
    walks:    Vec<WalkStep>,
}

impl CountingObserver {
    fn logging() -> Self {
        Self { inner: Some(LogObserver), ..Self::default() }
    }
}

impl NavObserver for CountingObserver {
    fn on_search_done(&mut self, now: Quantum, id: RequestId) {
        self.searches += 1;
        if let Some(inner) = self.inner.as_mut() {
            inner.on_search_done(now, id);
        }
    }

    fn on_plan_done(&mut self, now: Quantum, id: PlanId, walker: Option<AgentId>, result: &PlanResult<Path>) {
        self.plans += 1;
        if let (Some(_), Ok(path)) = (walker, result) {
            self.walked = Some(path.clone());
        }
        if let Some(inner) = self.inner.as_mut() {
            inner.on_plan_done(now, id, walker, result);
        }
    }

    fn on_walk_done(&mut self, now: Quantum, agent: AgentId, step: &WalkStep) {
        self.walks.push(step.clone());
        if let Some(inner) = self.inner.as_mut() {
            inner.on_walk_done(now, agent, step);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== quarry: rust_vn navigation core ===");

    // 1. Terrain.
    let mut grid = load_cells_reader(Cursor::new(TERRAIN_CSV), "air")?;
    grid.fill(
        Coord::new(-FLOOR_HALF, FLOOR_Y, -FLOOR_HALF),
        Coord::new(FLOOR_HALF, FLOOR_Y, FLOOR_HALF),
        "stone",
    );
    println!("Terrain: {} explicit cells, fill = {}", grid.len(), grid.fill_type());

    // 2. Navigator and miner.
    let config = NavConfig {
        scheduler: SchedulerConfig { interval_quanta: 1, ..SchedulerConfig::default() },
        planner:   PlannerConfig { max_nodes: 2_000, ..PlannerConfig::default() },
        ..NavConfig::default()
    };
    let mut nav = NavigatorBuilder::new().config(config).agents([MINER]).build()?;
    let start = Coord::new(0, FLOOR_Y + 1, 0);
    let mut host = MemoryHost::new();
    host.spawn(MINER, start.footing());
    let mut observer = CountingObserver::logging();

    // 3. Find the nearest ore.
    let options = SearchOptions::new(start)
        .max_distance(SEARCH_DIST)
        .target_tag("ore")
        .max_results(1);
    let request = nav.find(&grid, &options)?;
    let quanta = nav.run_until_idle(&grid, &mut host, &mut observer, MAX_QUANTA)?;
    let found = nav
        .take_found(request)
        .context("search outcome missing")??;
    let Some(ore) = found.first() else {
        bail!("no ore within {SEARCH_DIST} blocks of {start}");
    };
    info!("ore at {} after {quanta} quanta", ore.coord);

    let vein = connected_cells(&grid, ore.coord, &["iron_ore"], 64);
    println!("Ore vein at {}: {} blocks", ore.coord, vein.len());

    // 4. Walk to the ore face.
    nav.walk_to(&grid, &host, MINER, ore.coord)?;
    let quanta = nav.run_until_idle(&grid, &mut host, &mut observer, MAX_QUANTA)?;
    let path = observer.walked.take().context("no path to the ore")?;

    println!();
    println!("Path: {} cells, {} waypoints, cost {}", path.len(), path.waypoints().len(), path.cost());
    for cell in path.cells() {
        println!("  {}  {}", cell.coord, cell.type_id);
    }

    let pose = host.pose(MINER).context("miner vanished")?;
    println!();
    println!("Walk finished after {quanta} quanta: {:?}", observer.walks.last());
    println!("Miner at {}, {:.2} blocks from the ore", pose.position, pose.position.distance(ore.coord.footing()));
    println!("Completions: {} searches, {} plans, {} walks", observer.searches, observer.plans, observer.walks.len());
    Ok(())
}

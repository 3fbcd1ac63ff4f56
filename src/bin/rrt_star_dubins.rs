// RRT* path planning with Dubins steering
// author: Atsushi Sakai (@Atsushi_twi)
//         Ryohei Sasaki (@rsasaki0109)
//
// usage: rrt_star_dubins [config.yaml] [seed]

use std::path::Path;
use std::process::ExitCode;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dubins_rrt_star::common::{AreaBounds, CircleObstacle, ObstacleSnapshots, Pose2D};
use dubins_rrt_star::path_planning::rrt_star_dubins::{PlanRequest, PlannerConfig, RRTStarDubins, TreeSnapshot};
use dubins_rrt_star::PlannerResult;

fn scenario() -> PlanRequest {
    let obstacles = vec![
        CircleObstacle::new(5.0, 5.0, 1.0),
        CircleObstacle::new(3.0, 6.0, 2.0),
        CircleObstacle::new(3.0, 8.0, 2.0),
        CircleObstacle::new(3.0, 10.0, 2.0),
        CircleObstacle::new(7.0, 5.0, 2.0),
        CircleObstacle::new(9.0, 5.0, 2.0),
    ];

    PlanRequest::new(
        Pose2D::new(0.0, 0.0, 0.0),
        Pose2D::new(10.0, 10.0, 0.0),
        AreaBounds::from_ranges((-2.0, 15.0), (-2.0, 15.0)),
    )
    .with_obstacles(ObstacleSnapshots::single(obstacles))
    .with_max_iterations(200)
}

fn run() -> PlannerResult<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => PlannerConfig::load(Path::new(&path))?,
        None => PlannerConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);

    let planner = RRTStarDubins::new(config);
    let request = scenario();
    let mut rng = StdRng::seed_from_u64(seed);

    let path = planner.plan_with_hook(&request, &mut rng, |snap: &TreeSnapshot<'_>| {
        info!("iteration {}: {} vertices", snap.iteration, snap.tree.len());
    })?;

    println!(
        "# cost: {:.3}, length: {:.3}, vertices: {}",
        path.cost,
        path.waypoints.total_length(),
        path.tree_size
    );
    println!("# x y yaw");
    for pose in &path.poses {
        println!("{:.4} {:.4} {:.4}", pose.x, pose.y, pose.yaw);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    println!("Start rrt star with dubins planning");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

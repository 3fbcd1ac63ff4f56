//! End-to-end planning scenarios

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use dubins_rrt_star::common::{AreaBounds, CircleObstacle, ObstacleSnapshots, Point2D, Pose2D};
use dubins_rrt_star::path_planning::rrt_star_dubins::{
    CollisionSettings, PlanRequest, PlannerConfig, RRTStarDubins, SnapshotPolicy, TreeSnapshot,
};

fn straight_request() -> PlanRequest {
    PlanRequest::new(
        Pose2D::new(0.0, 0.0, 0.0),
        Pose2D::new(10.0, 0.0, 0.0),
        AreaBounds::from_ranges((-5.0, 15.0), (-5.0, 15.0)),
    )
    .with_max_iterations(60)
}

#[test]
fn test_obstacle_free_straight_goal() {
    let planner = RRTStarDubins::new(PlannerConfig::default());

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let path = planner.plan(&straight_request(), &mut rng).unwrap();

        let first = path.waypoints.first().unwrap();
        let last = path.waypoints.last().unwrap();
        assert_eq!(*first, Point2D::new(0.0, 0.0));
        assert_eq!(*last, Point2D::new(10.0, 0.0));

        // The vertex before the literal goal lies inside the goal region
        let reached = path.poses[path.poses.len() - 2];
        assert!(reached.xy_distance(&Pose2D::new(10.0, 0.0, 0.0)) <= 0.5);
        assert!(path.cost >= 10.0 - 0.5);
    }
}

#[test]
fn test_obstacle_on_start_boundary_has_no_path() {
    // The start sits exactly on the circle, and boundary contact counts as collision
    let planner = RRTStarDubins::new(PlannerConfig::default());
    let request = straight_request()
        .with_obstacles(ObstacleSnapshots::single(vec![CircleObstacle::new(5.0, 0.0, 5.0)]));
    let mut rng = StdRng::seed_from_u64(7);

    let err = planner.plan(&request, &mut rng).unwrap_err();
    assert!(err.is_no_path(), "unexpected error: {}", err);
}

#[test]
fn test_large_obstacle_between_start_and_goal() {
    let obstacle = CircleObstacle::new(5.0, 0.0, 4.0);
    let config = PlannerConfig {
        bias_increment: 0,
        ..Default::default()
    };
    let planner = RRTStarDubins::new(config);
    let request = straight_request()
        .with_obstacles(ObstacleSnapshots::single(vec![obstacle]))
        .with_max_iterations(800);

    let mut found = 0;
    for seed in 0..6 {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Ok(path) = planner.plan(&request, &mut rng) {
            for pose in &path.poses {
                assert!((pose.x - obstacle.x).hypot(pose.y - obstacle.y) > obstacle.radius);
            }
            assert!(path.cost > 10.0);
            found += 1;
        }
    }
    assert!(found > 0, "no seed found a way around the obstacle");
}

#[test]
fn test_detour_around_obstacle() {
    let planner = RRTStarDubins::new(PlannerConfig::default());
    let obstacle = CircleObstacle::new(5.0, 0.0, 1.5);
    let request = straight_request()
        .with_obstacles(ObstacleSnapshots::single(vec![obstacle]))
        .with_vehicle_radius(0.2)
        .with_max_iterations(300);
    let mut rng = StdRng::seed_from_u64(3);

    let path = planner.plan(&request, &mut rng).unwrap();
    for pose in &path.poses {
        assert!((pose.x - obstacle.x).hypot(pose.y - obstacle.y) > obstacle.radius + 0.2);
    }
    // The route has to leave the x axis to get past the circle
    assert!(path.poses.iter().any(|p| p.y.abs() > obstacle.radius));
    assert!(path.cost > 10.0);
    assert!(path.waypoints.total_length() > 10.0);
}

#[test]
fn test_zero_iterations_is_invalid() {
    let planner = RRTStarDubins::new(PlannerConfig::default());
    let mut rng = StdRng::seed_from_u64(0);
    let err = planner
        .plan(&straight_request().with_max_iterations(0), &mut rng)
        .unwrap_err();
    assert!(err.is_invalid_configuration());
}

#[test]
fn test_malformed_request_is_invalid() {
    let planner = RRTStarDubins::new(PlannerConfig::default());
    let mut rng = StdRng::seed_from_u64(0);

    let mut request = straight_request();
    request.sample_region = AreaBounds::new(5.0, -5.0, 0.0, 1.0);
    assert!(planner.plan(&request, &mut rng).unwrap_err().is_invalid_configuration());

    let request = straight_request().with_goal_bias(101);
    assert!(planner.plan(&request, &mut rng).unwrap_err().is_invalid_configuration());

    let mut request = straight_request();
    request.start = Pose2D { x: f64::NAN, y: 0.0, yaw: 0.0 };
    assert!(planner.plan(&request, &mut rng).unwrap_err().is_invalid_configuration());
}

#[test]
fn test_full_goal_bias_single_iteration() {
    let planner = RRTStarDubins::new(PlannerConfig::default());
    let request = straight_request().with_goal_bias(100).with_max_iterations(1);
    let mut rng = StdRng::seed_from_u64(123);

    let path = planner.plan(&request, &mut rng).unwrap();
    assert_eq!(path.tree_size, 2);
    assert_eq!(path.goal_index, 1);
    assert_abs_diff_eq!(path.cost, 10.0, epsilon = 1e-6);
}

#[test]
fn test_seeded_runs_produce_identical_paths() {
    let planner = RRTStarDubins::new(PlannerConfig::default());
    let request = straight_request()
        .with_obstacles(ObstacleSnapshots::single(vec![CircleObstacle::new(5.0, 2.0, 1.0)]))
        .with_max_iterations(100);

    let a = planner.plan(&request, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = planner.plan(&request, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a.waypoints, b.waypoints);
    assert_eq!(a.poses, b.poses);
}

#[test]
fn test_tree_invariants_hold_through_rewiring() {
    let planner = RRTStarDubins::new(PlannerConfig::default());
    let request = straight_request()
        .with_obstacles(ObstacleSnapshots::single(vec![
            CircleObstacle::new(4.0, 1.0, 1.0),
            CircleObstacle::new(7.0, -1.0, 1.0),
        ]))
        .with_max_iterations(200);
    let mut rng = StdRng::seed_from_u64(17);

    let mut checked = 0;
    let (tree, stats) = planner
        .build_tree(&request, &mut rng, |snap: &TreeSnapshot<'_>| {
            for (i, node) in snap.tree.nodes().iter().enumerate().skip(1) {
                let parent = snap.tree.node(node.parent.unwrap());
                assert_abs_diff_eq!(node.cost, parent.cost + node.segment_length, epsilon = 1e-9);
                assert_eq!(snap.tree.ancestors(i).last(), Some(0));
            }
            checked += 1;
        })
        .unwrap();

    assert_eq!(checked, 40);
    assert_eq!(tree.len(), stats.inserted + 1);
    assert!(tree.root().is_root());
}

#[test]
fn test_arrival_indexed_snapshots() {
    // An obstacle that only exists late in the prediction horizon, sitting on
    // the straight line just past the start
    let snapshots = ObstacleSnapshots::from_tuples(vec![
        vec![],
        vec![],
        vec![],
        vec![(1.0, 0.0, 0.5)],
    ]);
    let request = straight_request()
        .with_obstacles(snapshots)
        .with_goal_bias(100)
        .with_max_iterations(1);
    let mut rng = StdRng::seed_from_u64(0);

    let union = RRTStarDubins::new(PlannerConfig::default());
    assert!(union.plan(&request, &mut rng).unwrap_err().is_no_path());

    let config = PlannerConfig {
        collision: CollisionSettings {
            snapshot_policy: SnapshotPolicy::ArrivalIndexed,
            ..Default::default()
        },
        ..Default::default()
    };
    let indexed = RRTStarDubins::new(config);
    let path = indexed.plan(&request, &mut rng).unwrap();
    assert_abs_diff_eq!(path.cost, 10.0, epsilon = 1e-6);
}

#[test]
fn test_config_file_round_trip_drives_planner() {
    let yaml = include_str!("../config/rrt_star_dubins.yaml");
    let config = PlannerConfig::from_yaml(yaml).unwrap();
    assert_eq!(config, PlannerConfig::default());

    let planner = RRTStarDubins::new(config);
    let mut rng = StdRng::seed_from_u64(4);
    assert!(planner.plan(&straight_request(), &mut rng).is_ok());
}

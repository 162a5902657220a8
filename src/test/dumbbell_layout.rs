use crate::net::{CONSTANT_POSITION, Network, NodeId, Vector};
use crate::topo::{DEFAULT_MOBILITY_MODEL, WirelessDumbbell, WirelessDumbbellOpts, build_wireless_dumbbell};

const EPS: f64 = 1e-6;

fn built(n_left: usize, n_right: usize) -> (Network, WirelessDumbbell) {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(
        &mut net,
        &WirelessDumbbellOpts {
            n_left,
            n_right,
            ..Default::default()
        },
    );
    (net, topo)
}

#[track_caller]
fn assert_at(net: &Network, node: NodeId, x: f64, y: f64) {
    let p = net.position(node).expect("node has a position");
    assert!(
        (p.x - x).abs() < EPS && (p.y - y).abs() < EPS,
        "node {node:?} at ({}, {}), expected ({x}, {y})",
        p.x,
        p.y
    );
}

#[test]
fn three_by_three_layout_in_square() {
    let (mut net, topo) = built(3, 3);
    topo.bounding_box(&mut net, 0.0, 0.0, 300.0, 300.0);

    let d = 100.0 * std::f64::consts::FRAC_1_SQRT_2;
    assert_at(&net, topo.left(), 100.0, 150.0);
    assert_at(&net, topo.right(), 200.0, 150.0);

    assert_at(&net, topo.left_leaf(0), 100.0 - d, 150.0 - d);
    assert_at(&net, topo.left_leaf(1), 0.0, 150.0);
    assert_at(&net, topo.left_leaf(2), 100.0 - d, 150.0 + d);

    assert_at(&net, topo.right_leaf(0), 200.0 + d, 150.0 - d);
    assert_at(&net, topo.right_leaf(1), 300.0, 150.0);
    assert_at(&net, topo.right_leaf(2), 200.0 + d, 150.0 + d);
}

#[test]
fn leaves_are_equidistant_from_their_router() {
    let (mut net, topo) = built(5, 4);
    topo.bounding_box(&mut net, 0.0, 0.0, 600.0, 1000.0);

    let dist = |a: Vector, b: Vector| ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
    let lr = net.position(topo.left()).unwrap();
    let rr = net.position(topo.right()).unwrap();
    for &n in topo.left_leaves() {
        assert!((dist(net.position(n).unwrap(), lr) - 200.0).abs() < EPS);
    }
    for &n in topo.right_leaves() {
        assert!((dist(net.position(n).unwrap(), rr) - 200.0).abs() < EPS);
    }
}

#[test]
fn even_count_arc_skips_the_midline() {
    let (mut net, topo) = built(2, 0);
    topo.bounding_box(&mut net, 0.0, 0.0, 300.0, 300.0);

    // theta = -30°, +30°
    let dx = 100.0 * (std::f64::consts::PI / 6.0).cos();
    assert_at(&net, topo.left_leaf(0), 100.0 - dx, 100.0);
    assert_at(&net, topo.left_leaf(1), 100.0 - dx, 200.0);
}

#[test]
fn odd_count_midpoint_is_level_with_router() {
    for n in [1usize, 3, 5, 7] {
        let (mut net, topo) = built(n, n);
        topo.bounding_box(&mut net, 10.0, 20.0, 910.0, 620.0);
        let mid = n / 2;
        let lr = net.position(topo.left()).unwrap();
        let rr = net.position(topo.right()).unwrap();
        assert_eq!(net.position(topo.left_leaf(mid)).unwrap().y, lr.y);
        assert_eq!(net.position(topo.right_leaf(mid)).unwrap().y, rr.y);
        assert_at(&net, topo.left_leaf(mid), 10.0, 320.0);
        assert_at(&net, topo.right_leaf(mid), 910.0, 320.0);
    }
}

#[test]
fn leaf_y_is_clamped_but_x_is_not() {
    let (mut net, topo) = built(3, 3);
    // 宽 300、高 100：弧半径 100 超出上下边界
    topo.bounding_box(&mut net, 0.0, 0.0, 300.0, 100.0);

    let d = 100.0 * std::f64::consts::FRAC_1_SQRT_2;
    assert_at(&net, topo.left_leaf(0), 100.0 - d, 0.0);
    assert_at(&net, topo.left_leaf(2), 100.0 - d, 100.0);
    assert_at(&net, topo.right_leaf(0), 200.0 + d, 0.0);
    assert_at(&net, topo.right_leaf(2), 200.0 + d, 100.0);

    let (mut net, topo) = built(1, 1);
    topo.bounding_box(&mut net, 0.0, 0.0, 30.0, 1.0);
    assert_at(&net, topo.left_leaf(0), 0.0, 0.5);
    assert_at(&net, topo.right_leaf(0), 30.0, 0.5);
}

#[test]
fn clamp_uses_normalized_bounds_when_y_is_reversed() {
    let (mut net, topo) = built(3, 3);
    // uly > lry：上下边界取归一化后的 [0, 100]
    topo.bounding_box(&mut net, 0.0, 100.0, 300.0, 0.0);

    let d = 100.0 * std::f64::consts::FRAC_1_SQRT_2;
    assert_at(&net, topo.left_leaf(0), 100.0 - d, 0.0);
    assert_at(&net, topo.left_leaf(2), 100.0 - d, 100.0);
    assert_at(&net, topo.right_leaf(0), 200.0 + d, 0.0);
    assert_at(&net, topo.right_leaf(2), 200.0 + d, 100.0);
    for n in topo.all_nodes() {
        let y = net.position(n).unwrap().y;
        assert!((0.0..=100.0).contains(&y), "node {n:?} y={y} outside box");
    }
}

#[test]
fn reversed_corners_are_normalized() {
    let (mut a_net, a) = built(3, 2);
    a.bounding_box(&mut a_net, 0.0, 0.0, 300.0, 200.0);
    let (mut b_net, b) = built(3, 2);
    b.bounding_box(&mut b_net, 300.0, 200.0, 0.0, 0.0);

    for (na, nb) in a.all_nodes().into_iter().zip(b.all_nodes()) {
        let pa = a_net.position(na).unwrap();
        let pb = b_net.position(nb).unwrap();
        assert!((pa.x - pb.x).abs() < EPS && (pa.y - pb.y).abs() < EPS);
    }
}

#[test]
fn layout_is_idempotent_and_keeps_mobility_models() {
    let (mut net, topo) = built(4, 3);
    topo.bounding_box(&mut net, -50.0, -50.0, 50.0, 50.0);
    let first: Vec<Vector> = topo.all_nodes().iter().map(|&n| net.position(n).unwrap()).collect();
    topo.bounding_box(&mut net, -50.0, -50.0, 50.0, 50.0);
    let second: Vec<Vector> = topo.all_nodes().iter().map(|&n| net.position(n).unwrap()).collect();
    assert_eq!(first, second);

    assert_eq!(net.node(topo.left_leaf(0)).mobility().unwrap().model, DEFAULT_MOBILITY_MODEL);
    assert_eq!(net.node(topo.access_point()).mobility().unwrap().model, CONSTANT_POSITION);
    assert_eq!(net.node(topo.right()).mobility().unwrap().model, CONSTANT_POSITION);
    assert_eq!(net.node(topo.right_leaf(2)).mobility().unwrap().model, CONSTANT_POSITION);
}

#[test]
fn empty_sides_only_place_routers() {
    let (mut net, topo) = built(0, 0);
    topo.bounding_box(&mut net, 0.0, 0.0, 90.0, 60.0);
    assert_at(&net, topo.left(), 30.0, 30.0);
    assert_at(&net, topo.right(), 60.0, 30.0);
}

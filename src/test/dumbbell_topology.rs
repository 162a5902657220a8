use crate::addr::InternetStack;
use crate::net::{
    CONSTANT_POSITION, DeviceKind, LinkSpec, Network, NodeKind, Rectangle, RateAdaptation, Ssid, Vector, WifiConfig,
};
use crate::topo::{DEFAULT_MOBILITY_MODEL, WirelessDumbbellOpts, build_wireless_dumbbell};
use crate::units::{DataRate, SimTime};
use std::collections::HashSet;

fn opts(n_left: usize, n_right: usize) -> WirelessDumbbellOpts {
    WirelessDumbbellOpts {
        n_left,
        n_right,
        ..Default::default()
    }
}

#[test]
fn dumbbell_counts_and_node_kinds() {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(&mut net, &opts(3, 4));

    assert_eq!(topo.left_count(), 3);
    assert_eq!(topo.right_count(), 4);
    assert_eq!(net.nodes().len(), 2 + 3 + 4);
    // 中间链路 + 每个右侧叶子一条
    assert_eq!(net.links().len(), 1 + 4);
    assert_eq!(net.channels().len(), 1);

    assert_eq!(net.node(topo.left()).kind(), NodeKind::Router);
    assert_eq!(net.node(topo.right()).name(), "rt1");
    assert_eq!(topo.access_point(), topo.left());
    for i in 0..3 {
        assert_eq!(net.node(topo.left_leaf(i)).kind(), NodeKind::WirelessLeaf);
        assert_eq!(net.node(topo.left_leaf(i)).name(), format!("l{i}"));
    }
    for i in 0..4 {
        assert_eq!(net.node(topo.right_leaf(i)).kind(), NodeKind::WiredLeaf);
    }

    let all: HashSet<_> = topo.all_nodes().into_iter().collect();
    assert_eq!(all.len(), 9);
}

#[test]
fn left_leaves_and_ap_share_one_wifi_channel() {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(&mut net, &opts(3, 3));
    let ch = topo.wifi_channel();

    assert_eq!(topo.left_leaf_devices().len(), 3);
    for (i, &d) in topo.left_leaf_devices().iter().enumerate() {
        assert_eq!(net.device(d).node, topo.left_leaf(i));
        assert_eq!(net.device(d).kind, DeviceKind::WifiSta { channel: ch });
    }
    assert_eq!(net.device(topo.ap_device()).node, topo.left());
    assert_eq!(net.device(topo.ap_device()).kind, DeviceKind::WifiAp { channel: ch });
    assert_eq!(net.channel(ch).devices.len(), 4);
    assert_eq!(net.channel(ch).config.ssid, Ssid::default());

    // 左侧路由器：一个点对点设备 + 一个 AP 设备
    assert_eq!(net.node(topo.left()).devices().len(), 2);
}

#[test]
fn each_right_leaf_has_its_own_link_to_right_router() {
    let mut net = Network::default();
    let right_link = LinkSpec::new(DataRate::from_mbps(100), SimTime::from_millis(20));
    let topo = build_wireless_dumbbell(
        &mut net,
        &WirelessDumbbellOpts {
            right_link,
            ..opts(2, 3)
        },
    );

    let central = net.link(topo.central_link());
    assert_eq!(central.nodes, [topo.left(), topo.right()]);
    assert_eq!(central.devices, topo.central_devices());
    assert_eq!(central.spec, LinkSpec::default());

    assert_eq!(topo.right_links().len(), 3);
    for i in 0..3 {
        let link = net.link(topo.right_links()[i]);
        assert_eq!(link.nodes, [topo.right(), topo.right_leaf(i)]);
        assert_eq!(link.devices, [topo.right_router_devices()[i], topo.right_leaf_devices()[i]]);
        assert_eq!(link.spec, right_link);
        assert_eq!(net.device(topo.right_leaf_devices()[i]).node, topo.right_leaf(i));
    }
    // 右侧路由器：中间链路一个设备 + 每个叶子一个
    assert_eq!(net.node(topo.right()).devices().len(), 4);
}

#[test]
fn wifi_config_is_carried_onto_the_channel() {
    let mut net = Network::default();
    let wifi = WifiConfig {
        rate_adaptation: RateAdaptation::Minstrel,
        ssid: Ssid("lab".to_string()),
        ..Default::default()
    };
    let topo = build_wireless_dumbbell(
        &mut net,
        &WirelessDumbbellOpts {
            wifi: wifi.clone(),
            ..opts(1, 1)
        },
    );
    let ch = net.channel(topo.wifi_channel());
    assert_eq!(ch.config, wifi);
    assert_eq!(ch.config.rate_adaptation.manager_type(), "ns3::MinstrelWifiManager");
    assert_eq!(ch.config.standard.to_string(), "802.11g");
}

#[test]
fn default_placement_seeds_left_leaves_then_ap_on_one_grid() {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(&mut net, &opts(4, 2));

    let expect = [(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
    for (i, &(x, y)) in expect.iter().enumerate() {
        let m = net.node(topo.left_leaf(i)).mobility().expect("left leaf mobility");
        assert_eq!(m.model, DEFAULT_MOBILITY_MODEL);
        assert_eq!(m.bounds, Some(Rectangle::new(-50.0, 50.0, -50.0, 50.0)));
        assert_eq!(m.position, Vector::new(x, y, 0.0));
    }

    let ap = net.node(topo.access_point()).mobility().expect("ap mobility");
    assert_eq!(ap.model, CONSTANT_POSITION);
    assert_eq!(ap.position, Vector::new(5.0, 10.0, 0.0));

    assert!(net.node(topo.right()).mobility().is_none());
    assert!(net.node(topo.right_leaf(0)).mobility().is_none());
}

#[test]
fn custom_mobility_model_is_passed_through() {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(
        &mut net,
        &WirelessDumbbellOpts {
            mobility_model: "ns3::RandomWalk2dMobilityModel".to_string(),
            ..opts(2, 2)
        },
    );
    assert_eq!(
        net.node(topo.left_leaf(1)).mobility().unwrap().model,
        "ns3::RandomWalk2dMobilityModel"
    );
}

#[test]
fn zero_leaves_on_either_side_is_accepted() {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(&mut net, &opts(0, 0));
    assert_eq!(topo.left_count(), 0);
    assert_eq!(topo.right_count(), 0);
    assert_eq!(net.nodes().len(), 2);
    assert_eq!(net.links().len(), 1);
    assert!(topo.right_links().is_empty());
    // 只有 AP 在信道上，位置是网格的第一个点
    assert_eq!(net.channel(topo.wifi_channel()).devices, vec![topo.ap_device()]);
    assert_eq!(net.position(topo.access_point()), Some(Vector::new(0.0, 0.0, 0.0)));
}

#[test]
fn install_stack_covers_routers_and_leaves() {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(&mut net, &opts(2, 2));
    topo.install_stack(&mut net, &InternetStack::default());
    for n in topo.all_nodes() {
        assert!(net.has_ipv4(n), "node {n:?} has no IPv4");
        assert!(net.has_ipv6(n), "node {n:?} has no IPv6");
    }
}

#[test]
#[should_panic]
fn left_leaf_out_of_range_panics() {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(&mut net, &opts(2, 2));
    let _ = topo.left_leaf(2);
}

#[test]
#[should_panic]
fn right_leaf_out_of_range_panics() {
    let mut net = Network::default();
    let topo = build_wireless_dumbbell(&mut net, &opts(2, 0));
    let _ = topo.right_leaf(0);
}

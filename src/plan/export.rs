use super::types::{
    PlanDevice, PlanDeviceKind, PlanFlow, PlanIpv4Interface, PlanIpv6Interface, PlanLink, PlanNode, PlanSink,
    PlanWifi, TopologyPlan,
};
use crate::net::{DeviceKind, Network, WifiChannel};
use crate::scenario::Scenario;

impl TopologyPlan {
    /// 从构建好的场景导出规划
    pub fn from_scenario(sc: &Scenario) -> Self {
        let net = &sc.net;
        let topo = &sc.topo;
        let ap = topo.access_point();

        let nodes = net
            .nodes()
            .iter()
            .map(|n| PlanNode {
                id: n.id().0,
                name: n.name().to_string(),
                kind: n.kind(),
                access_point: n.id() == ap,
                mobility_model: n.mobility().map(|m| m.model.clone()),
                position: n.mobility().map(|m| m.position),
            })
            .collect();

        let devices = net
            .devices()
            .iter()
            .map(|d| PlanDevice {
                id: d.id.0,
                node: d.node.0,
                kind: match d.kind {
                    DeviceKind::PointToPoint { .. } => PlanDeviceKind::PointToPoint,
                    DeviceKind::WifiSta { .. } => PlanDeviceKind::WifiSta,
                    DeviceKind::WifiAp { .. } => PlanDeviceKind::WifiAp,
                },
                mac: d.mac.to_string(),
                addresses: d.addresses.clone(),
            })
            .collect();

        let links = net
            .links()
            .iter()
            .map(|l| PlanLink {
                id: l.id.0,
                nodes: [l.nodes[0].0, l.nodes[1].0],
                devices: [l.devices[0].0, l.devices[1].0],
                data_rate_bps: l.spec.data_rate.bps(),
                delay_ns: l.spec.delay.0,
            })
            .collect();

        let wifi = net.channels().iter().map(|ch| wifi_entry(net, ch)).collect();

        let ipv4 = [
            topo.router_interfaces(),
            topo.left_leaf_interfaces(),
            topo.left_router_interfaces(),
            topo.right_leaf_interfaces(),
            topo.right_router_interfaces(),
        ]
        .into_iter()
        .flat_map(|c| c.iter())
        .map(|i| PlanIpv4Interface {
            node: i.node.0,
            device: i.device.0,
            address: i.address,
            prefix_len: i.mask.prefix_len(),
        })
        .collect();

        let ipv6 = [
            topo.router_interfaces6(),
            topo.left_leaf_interfaces6(),
            topo.left_router_interfaces6(),
            topo.right_leaf_interfaces6(),
            topo.right_router_interfaces6(),
        ]
        .into_iter()
        .flat_map(|c| c.iter())
        .map(|i| PlanIpv6Interface {
            node: i.node.0,
            device: i.device.0,
            link_local: i.link_local,
            global: i.global,
            prefix_len: i.prefix.prefix_len(),
        })
        .collect();

        let socket_type = sc.spec.tcp_variant.socket_type();
        let flows = sc
            .traffic
            .senders
            .iter()
            .map(|s| PlanFlow {
                src: s.node.0,
                dst: s.remote_node.0,
                remote: s.remote.to_string(),
                socket_type: socket_type.to_string(),
                send_size: s.send_size,
                max_bytes: s.max_bytes,
                start_ns: s.start.0,
                stop_ns: s.stop.0,
                path: s.path.iter().map(|n| n.0).collect(),
            })
            .collect();

        let sinks = sc
            .traffic
            .sinks
            .iter()
            .map(|s| PlanSink {
                node: s.node.0,
                port: s.port,
                start_ns: s.start.0,
                stop_ns: s.stop.0,
            })
            .collect();

        let config_defaults = sc
            .spec
            .tcp_variant
            .config_defaults()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        TopologyPlan {
            nodes,
            devices,
            links,
            wifi,
            ipv4,
            ipv6,
            flows,
            sinks,
            config_defaults,
            stop_time_ns: sc.traffic.stop_time.0,
        }
    }
}

fn wifi_entry(net: &Network, ch: &WifiChannel) -> PlanWifi {
    let mut ap_devices = Vec::new();
    let mut sta_devices = Vec::new();
    for &d in &ch.devices {
        match net.device(d).kind {
            DeviceKind::WifiAp { .. } => ap_devices.push(d.0),
            _ => sta_devices.push(d.0),
        }
    }
    PlanWifi {
        id: ch.id.0,
        ssid: ch.config.ssid.0.clone(),
        standard: ch.config.standard.to_string(),
        manager: ch.config.rate_adaptation.manager_type().to_string(),
        ap_devices,
        sta_devices,
    }
}

//! 仿真场景
//!
//! 场景 = 拓扑参数 + TCP 变体 + wifi 速率自适应算法 + 地址规划起点 + 应用参数。
//! `build_scenario` 按固定顺序完成：建拓扑 → 装协议栈 → 分配地址 → 布局 → 路由 → 流量规划。

mod spec;
mod traffic;

pub use spec::{BoundingBox, Ipv6Spec, ScenarioSpec, TcpVariant};
pub use traffic::{BulkSendApp, PacketSinkApp, TrafficPlan, plan_traffic};

use tracing::info;

use crate::addr::{InternetStack, Ipv4AddressHelper, Ipv6AddressGenerator};
use crate::error::ScenarioError;
use crate::net::Network;
use crate::topo::{WirelessDumbbell, WirelessDumbbellOpts, build_wireless_dumbbell};

/// 构建完成的场景，交给外部仿真引擎使用
#[derive(Debug)]
pub struct Scenario {
    pub spec: ScenarioSpec,
    pub net: Network,
    pub topo: WirelessDumbbell,
    pub traffic: TrafficPlan,
}

/// 用一个新的 IPv6 生成器构建场景
pub fn build_scenario(spec: &ScenarioSpec) -> Result<Scenario, ScenarioError> {
    let mut generator = Ipv6AddressGenerator::default();
    build_scenario_with(spec, &mut generator)
}

/// 构建场景；多个场景共享 `generator` 时 IPv6 网络互不重叠
#[tracing::instrument(skip_all, fields(n_left = spec.n_left, n_right = spec.n_right, tcp = %spec.tcp_variant))]
pub fn build_scenario_with(
    spec: &ScenarioSpec,
    generator: &mut Ipv6AddressGenerator,
) -> Result<Scenario, ScenarioError> {
    if spec.n_left > spec.n_right {
        return Err(ScenarioError::NotEnoughSinks {
            n_left: spec.n_left,
            n_right: spec.n_right,
        });
    }

    let mut net = Network::default();
    let opts = WirelessDumbbellOpts {
        n_left: spec.n_left,
        n_right: spec.n_right,
        central_link: spec.central_link,
        right_link: spec.right_link,
        wifi: spec.wifi.clone(),
        mobility_model: spec.mobility_model.clone(),
    };
    let mut topo = build_wireless_dumbbell(&mut net, &opts);

    let stack = if spec.ipv6.is_some() {
        InternetStack::default()
    } else {
        InternetStack::ipv4_only()
    };
    topo.install_stack(&mut net, &stack);

    let mut router_ip = Ipv4AddressHelper::from_subnet(&spec.router_base)?;
    let mut left_ip = Ipv4AddressHelper::from_subnet(&spec.left_base)?;
    let mut right_ip = Ipv4AddressHelper::from_subnet(&spec.right_base)?;
    topo.assign_ipv4(&mut net, &mut left_ip, &mut right_ip, &mut router_ip)?;

    if let Some(v6) = spec.ipv6 {
        topo.assign_ipv6(&mut net, generator, v6.base, v6.prefix)?;
    }

    if let Some(bb) = spec.bounding_box {
        topo.bounding_box(&mut net, bb.ulx, bb.uly, bb.lrx, bb.lry);
    }

    net.populate_routing_tables();
    let traffic = plan_traffic(&mut net, &topo, spec)?;

    info!(
        senders = traffic.senders.len(),
        sinks = traffic.sinks.len(),
        stop_time = %traffic.stop_time,
        rate_adaptation = %spec.wifi.rate_adaptation,
        "✅ 场景构建完成"
    );

    Ok(Scenario {
        spec: spec.clone(),
        net,
        topo,
        traffic,
    })
}

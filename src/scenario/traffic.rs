//! 流量规划
//!
//! 第 i 个左侧叶子跑一个 bulk sender，目标是第 i 个右侧叶子的 sink；
//! 每个右侧叶子都挂一个 packet sink。

use std::net::SocketAddrV4;

use tracing::debug;

use super::spec::ScenarioSpec;
use crate::error::ScenarioError;
use crate::net::{Network, NodeId};
use crate::topo::WirelessDumbbell;
use crate::units::SimTime;

/// 持续发送的 TCP 源
#[derive(Debug, Clone, PartialEq)]
pub struct BulkSendApp {
    pub node: NodeId,
    pub remote: SocketAddrV4,
    pub remote_node: NodeId,
    pub send_size: u32,
    /// None 表示不限量
    pub max_bytes: Option<u64>,
    pub start: SimTime,
    pub stop: SimTime,
    /// 全局路由给出的节点路径（含两端）
    pub path: Vec<NodeId>,
}

/// TCP 接收端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketSinkApp {
    pub node: NodeId,
    pub port: u16,
    pub start: SimTime,
    pub stop: SimTime,
}

#[derive(Debug, Clone, Default)]
pub struct TrafficPlan {
    pub senders: Vec<BulkSendApp>,
    pub sinks: Vec<PacketSinkApp>,
    /// 仿真停止时间（应用停止后再多 1 秒）
    pub stop_time: SimTime,
}

/// 按场景配置生成流量规划；需要在 IPv4 地址分配之后调用
pub fn plan_traffic(
    net: &mut Network,
    topo: &WirelessDumbbell,
    spec: &ScenarioSpec,
) -> Result<TrafficPlan, ScenarioError> {
    if topo.left_count() > topo.right_count() {
        return Err(ScenarioError::NotEnoughSinks {
            n_left: topo.left_count(),
            n_right: topo.right_count(),
        });
    }

    let start = SimTime::ZERO;
    let stop = spec.simulation_time;

    let mut senders = Vec::with_capacity(topo.left_count());
    for i in 0..topo.left_count() {
        let src = topo.left_leaf(i);
        let dst = topo.right_leaf(i);
        let path = net.route(src, dst).unwrap_or_default();
        let remote = SocketAddrV4::new(topo.right_ipv4_address(i), spec.sink_port);
        debug!(src = ?src, remote = %remote, hops = path.len().saturating_sub(1), "规划 bulk sender");
        senders.push(BulkSendApp {
            node: src,
            remote,
            remote_node: dst,
            send_size: spec.send_size,
            max_bytes: spec.max_bytes,
            start,
            stop,
            path,
        });
    }

    let sinks = topo
        .right_leaves()
        .iter()
        .map(|&node| PacketSinkApp {
            node,
            port: spec.sink_port,
            start,
            stop,
        })
        .collect();

    Ok(TrafficPlan {
        senders,
        sinks,
        stop_time: SimTime(stop.0.saturating_add(SimTime::from_secs(1).0)),
    })
}

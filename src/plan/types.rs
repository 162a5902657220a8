use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use crate::net::{NodeKind, Vector};

/// 完整的拓扑规划（JSON），交给外部仿真引擎装配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyPlan {
    pub nodes: Vec<PlanNode>,
    pub devices: Vec<PlanDevice>,
    pub links: Vec<PlanLink>,
    pub wifi: Vec<PlanWifi>,
    pub ipv4: Vec<PlanIpv4Interface>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ipv6: Vec<PlanIpv6Interface>,
    pub flows: Vec<PlanFlow>,
    pub sinks: Vec<PlanSink>,
    /// 全局默认属性 (名字, 值)，按顺序设置
    pub config_defaults: Vec<(String, String)>,
    /// 仿真停止时间（ns）
    pub stop_time_ns: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanNode {
    pub id: usize,
    pub name: String,
    pub kind: NodeKind,
    /// 左侧路由器同时是 AP
    #[serde(default)]
    pub access_point: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobility_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vector>,
}

/// 设备类别（JSON 里的标签）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanDeviceKind {
    PointToPoint,
    WifiSta,
    WifiAp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDevice {
    pub id: usize,
    pub node: usize,
    pub kind: PlanDeviceKind,
    pub mac: String,
    pub addresses: Vec<IpAddr>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanLink {
    pub id: usize,
    pub nodes: [usize; 2],
    pub devices: [usize; 2],
    /// 链路带宽（bps）
    pub data_rate_bps: u64,
    /// 传播时延（ns）
    pub delay_ns: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWifi {
    pub id: usize,
    pub ssid: String,
    pub standard: String,
    /// remote station manager 类型名
    pub manager: String,
    pub ap_devices: Vec<usize>,
    pub sta_devices: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanIpv4Interface {
    pub node: usize,
    pub device: usize,
    pub address: Ipv4Addr,
    pub prefix_len: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanIpv6Interface {
    pub node: usize,
    pub device: usize,
    pub link_local: Ipv6Addr,
    pub global: Ipv6Addr,
    pub prefix_len: u8,
}

/// 一条 bulk-send 流
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFlow {
    pub src: usize,
    pub dst: usize,
    pub remote: String,
    pub socket_type: String,
    pub send_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<u64>,
    pub start_ns: u64,
    pub stop_ns: u64,
    /// 路由给出的节点路径（含两端）
    pub path: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSink {
    pub node: usize,
    pub port: u16,
    pub start_ns: u64,
    pub stop_ns: u64,
}

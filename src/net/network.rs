//! 网络拓扑管理
//!
//! `Network` 是节点、设备、链路和无线信道的 arena：所有对象只在这里拥有，
//! 其余组件只保存下标形式的标识符。

use std::collections::HashMap;
use std::net::IpAddr;

use super::device::{DeviceKind, Mac48, NetDevice};
use super::id::{ChannelId, DeviceId, LinkId, NodeId};
use super::link::{LinkSpec, PointToPointLink};
use super::mobility::{Mobility, Vector};
use super::node::{Node, NodeKind};
use super::routing::RoutingTable;
use super::wifi::{WifiChannel, WifiConfig, WifiRole};
use crate::addr::InternetStack;
use crate::error::AddrError;
use tracing::{debug, trace};

/// 网络拓扑
#[derive(Debug, Default)]
pub struct Network {
    nodes: Vec<Node>,
    devices: Vec<NetDevice>,
    links: Vec<PointToPointLink>,
    channels: Vec<WifiChannel>,
    /// 上一个分配出去的 MAC（低 48 位）
    last_mac: u64,
    /// 已分配地址 -> 所属设备
    addresses: HashMap<IpAddr, DeviceId>,
    routing: RoutingTable,
}

impl Network {
    /// 添加节点
    pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name, kind));
        self.routing.mark_dirty();
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn device(&self, id: DeviceId) -> &NetDevice {
        &self.devices[id.0]
    }

    pub fn devices(&self) -> &[NetDevice] {
        &self.devices
    }

    pub fn link(&self, id: LinkId) -> &PointToPointLink {
        &self.links[id.0]
    }

    pub fn links(&self) -> &[PointToPointLink] {
        &self.links
    }

    pub fn channel(&self, id: ChannelId) -> &WifiChannel {
        &self.channels[id.0]
    }

    pub fn channels(&self) -> &[WifiChannel] {
        &self.channels
    }

    fn add_device(&mut self, node: NodeId, kind: DeviceKind) -> DeviceId {
        let id = DeviceId(self.devices.len());
        self.last_mac = self.last_mac.wrapping_add(1);
        let mac = Mac48::from_u64(self.last_mac);
        self.devices.push(NetDevice {
            id,
            node,
            kind,
            mac,
            addresses: Vec::new(),
        });
        self.nodes[node.0].devices.push(id);
        trace!(node = ?node, device = ?id, mac = %mac, "添加设备");
        id
    }

    /// 用点对点链路连接两个节点
    ///
    /// 返回：(链路, `a` 端设备, `b` 端设备)
    pub fn install_point_to_point(&mut self, a: NodeId, b: NodeId, spec: &LinkSpec) -> (LinkId, DeviceId, DeviceId) {
        let link = LinkId(self.links.len());
        let dev_a = self.add_device(a, DeviceKind::PointToPoint { link });
        let dev_b = self.add_device(b, DeviceKind::PointToPoint { link });
        self.links.push(PointToPointLink {
            id: link,
            devices: [dev_a, dev_b],
            nodes: [a, b],
            spec: *spec,
        });
        self.routing.mark_dirty();
        debug!(
            link = ?link,
            a = ?a,
            b = ?b,
            data_rate = %spec.data_rate,
            delay = %spec.delay,
            "创建点对点链路"
        );
        (link, dev_a, dev_b)
    }

    /// 创建一个空的无线信道
    pub fn create_wifi_channel(&mut self, config: WifiConfig) -> ChannelId {
        let id = ChannelId(self.channels.len());
        debug!(channel = ?id, ssid = %config.ssid.0, "创建无线信道");
        self.channels.push(WifiChannel {
            id,
            config,
            devices: Vec::new(),
        });
        id
    }

    /// 在每个节点上安装一个挂到 `channel` 的 wifi 设备
    pub fn install_wifi(&mut self, channel: ChannelId, role: WifiRole, nodes: &[NodeId]) -> Vec<DeviceId> {
        let mut out = Vec::with_capacity(nodes.len());
        for &node in nodes {
            let kind = match role {
                WifiRole::Sta => DeviceKind::WifiSta { channel },
                WifiRole::Ap => DeviceKind::WifiAp { channel },
            };
            let dev = self.add_device(node, kind);
            self.channels[channel.0].devices.push(dev);
            out.push(dev);
        }
        self.routing.mark_dirty();
        debug!(channel = ?channel, role = ?role, count = nodes.len(), "安装 wifi 设备");
        out
    }

    /// 在节点上安装协议栈（重复安装会覆盖）
    pub fn install_stack(&mut self, node: NodeId, stack: &InternetStack) {
        self.nodes[node.0].stack = Some(*stack);
    }

    pub fn has_ipv4(&self, node: NodeId) -> bool {
        self.nodes[node.0].stack().is_some_and(|s| s.ipv4)
    }

    pub fn has_ipv6(&self, node: NodeId) -> bool {
        self.nodes[node.0].stack().is_some_and(|s| s.ipv6)
    }

    /// 把地址登记到设备上；同一地址只能分配一次
    pub fn register_address(&mut self, device: DeviceId, addr: IpAddr) -> Result<(), AddrError> {
        if self.addresses.contains_key(&addr) {
            return Err(AddrError::Duplicate(addr));
        }
        self.addresses.insert(addr, device);
        self.devices[device.0].addresses.push(addr);
        trace!(device = ?device, addr = %addr, "登记地址");
        Ok(())
    }

    /// 地址所属的设备
    pub fn device_by_address(&self, addr: IpAddr) -> Option<DeviceId> {
        self.addresses.get(&addr).copied()
    }

    /// 设置（替换）节点的移动模型
    pub fn set_mobility(&mut self, node: NodeId, mobility: Mobility) {
        self.nodes[node.0].mobility = Some(mobility);
    }

    /// 更新节点位置；节点没有移动模型时挂一个固定位置模型
    pub fn set_position(&mut self, node: NodeId, position: Vector) {
        let n = &mut self.nodes[node.0];
        match n.mobility.as_mut() {
            Some(m) => m.position = position,
            None => n.mobility = Some(Mobility::constant(position)),
        }
    }

    pub fn position(&self, node: NodeId) -> Option<Vector> {
        self.nodes[node.0].mobility.as_ref().map(|m| m.position)
    }

    /// 邻接表：点对点链路两端互为邻居，同一无线信道上的节点两两互为邻居
    pub fn adjacency(&self) -> Vec<Vec<NodeId>> {
        let mut adj = vec![Vec::new(); self.nodes.len()];
        for l in &self.links {
            let [a, b] = l.nodes;
            adj[a.0].push(b);
            adj[b.0].push(a);
        }
        for ch in &self.channels {
            for &d in &ch.devices {
                let from = self.devices[d.0].node;
                for &e in &ch.devices {
                    let to = self.devices[e.0].node;
                    if from != to {
                        adj[from.0].push(to);
                    }
                }
            }
        }
        for nbrs in &mut adj {
            nbrs.sort();
            nbrs.dedup();
        }
        adj
    }

    /// 基于当前拓扑计算全局最短跳数路由
    pub fn populate_routing_tables(&mut self) {
        if !self.routing.is_dirty() {
            return;
        }
        let adj = self.adjacency();
        self.routing.ensure_built(&adj);
        debug!(nodes = adj.len(), "路由表已更新");
    }

    /// `src` 到 `dst` 的节点路径（含两端）；不可达返回 None
    pub fn route(&mut self, src: NodeId, dst: NodeId) -> Option<Vec<NodeId>> {
        self.populate_routing_tables();
        self.routing.path(src, dst)
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }
}

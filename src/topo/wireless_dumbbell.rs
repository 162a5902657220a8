//! 无线/点对点 dumbbell 拓扑构建
//!
//! 拓扑结构：
//!
//! ```text
//!   l0 ~~\                     /-- r0
//!   l1 ~~~ rt0(AP) ---- rt1 ----- r1
//!   l2 ~~/                     \-- r2
//! ```
//!
//! 左侧叶子通过同一个 wifi 信道接入与 `rt0` 共址的 AP；
//! 右侧每个叶子各用一条独立的点对点链路连到 `rt1`。

use std::num::NonZeroU32;

use tracing::info;

use crate::addr::{InternetStack, Ipv4InterfaceContainer, Ipv6InterfaceContainer};
use crate::net::{
    ChannelId, DeviceId, GridLayout, GridPositionAllocator, LinkId, LinkSpec, Mobility, Network, NodeId, NodeKind,
    Rectangle, WifiConfig, WifiRole,
};

/// 左侧叶子的默认移动模型
pub const DEFAULT_MOBILITY_MODEL: &str = "ns3::RandomDirection2dMobilityModel";

/// 左侧叶子初始网格每行 3 个
const LEAF_GRID_WIDTH: NonZeroU32 = NonZeroU32::new(3).unwrap();

/// 无线 dumbbell 拓扑配置选项
#[derive(Debug, Clone)]
pub struct WirelessDumbbellOpts {
    pub n_left: usize,
    pub n_right: usize,
    pub central_link: LinkSpec,
    pub right_link: LinkSpec,
    pub wifi: WifiConfig,
    /// 左侧叶子的移动模型类型名，原样交给仿真引擎
    pub mobility_model: String,
}

impl Default for WirelessDumbbellOpts {
    fn default() -> Self {
        Self {
            n_left: 3,
            n_right: 3,
            central_link: LinkSpec::default(),
            right_link: LinkSpec::default(),
            wifi: WifiConfig::default(),
            mobility_model: DEFAULT_MOBILITY_MODEL.to_string(),
        }
    }
}

/// 构建好的无线 dumbbell 拓扑
///
/// 节点、设备都归 `Network` 所有，这里只保存标识符；
/// 叶子集合的顺序即叶子下标，地址与位置都按这个顺序对应。
#[derive(Debug, Clone)]
pub struct WirelessDumbbell {
    pub(crate) routers: [NodeId; 2],
    pub(crate) left_leaves: Vec<NodeId>,
    pub(crate) right_leaves: Vec<NodeId>,

    pub(crate) central_link: LinkId,
    pub(crate) central_devices: [DeviceId; 2],
    pub(crate) wifi_channel: ChannelId,
    pub(crate) left_leaf_devices: Vec<DeviceId>,
    pub(crate) ap_device: DeviceId,
    pub(crate) right_links: Vec<LinkId>,
    pub(crate) right_leaf_devices: Vec<DeviceId>,
    pub(crate) right_router_devices: Vec<DeviceId>,

    pub(crate) router_interfaces: Ipv4InterfaceContainer,
    pub(crate) left_leaf_interfaces: Ipv4InterfaceContainer,
    pub(crate) left_router_interfaces: Ipv4InterfaceContainer,
    pub(crate) right_leaf_interfaces: Ipv4InterfaceContainer,
    pub(crate) right_router_interfaces: Ipv4InterfaceContainer,

    pub(crate) router_interfaces6: Ipv6InterfaceContainer,
    pub(crate) left_leaf_interfaces6: Ipv6InterfaceContainer,
    pub(crate) left_router_interfaces6: Ipv6InterfaceContainer,
    pub(crate) right_leaf_interfaces6: Ipv6InterfaceContainer,
    pub(crate) right_router_interfaces6: Ipv6InterfaceContainer,
}

/// 构建无线 dumbbell 拓扑
///
/// 除了节点和链路，还会给左侧叶子和 AP 设置初始位置：
/// 一个共享的网格分配器（列宽 3，间距 5×10）依次给出左侧叶子、AP 的位置。
/// 这只是默认种子，`bounding_box` 会覆盖它。
#[tracing::instrument(skip(net, opts), fields(n_left = opts.n_left, n_right = opts.n_right))]
pub fn build_wireless_dumbbell(net: &mut Network, opts: &WirelessDumbbellOpts) -> WirelessDumbbell {
    // 瓶颈路由器
    let rt0 = net.add_node("rt0", NodeKind::Router);
    let rt1 = net.add_node("rt1", NodeKind::Router);

    let left_leaves: Vec<NodeId> = (0..opts.n_left)
        .map(|i| net.add_node(format!("l{i}"), NodeKind::WirelessLeaf))
        .collect();
    let right_leaves: Vec<NodeId> = (0..opts.n_right)
        .map(|i| net.add_node(format!("r{i}"), NodeKind::WiredLeaf))
        .collect();

    // rt0 <-> rt1
    let (central_link, c0, c1) = net.install_point_to_point(rt0, rt1, &opts.central_link);

    // 左侧：STA 与 AP 在同一信道、同一 SSID 上
    let wifi_channel = net.create_wifi_channel(opts.wifi.clone());
    let left_leaf_devices = net.install_wifi(wifi_channel, WifiRole::Sta, &left_leaves);
    let ap_device = net.install_wifi(wifi_channel, WifiRole::Ap, &[rt0])[0];

    let mut grid = GridPositionAllocator::new(0.0, 0.0, 5.0, 10.0, LEAF_GRID_WIDTH, GridLayout::RowFirst);
    for &leaf in &left_leaves {
        net.set_mobility(
            leaf,
            Mobility {
                model: opts.mobility_model.clone(),
                bounds: Some(Rectangle::new(-50.0, 50.0, -50.0, 50.0)),
                position: grid.next_position(),
            },
        );
    }
    net.set_mobility(rt0, Mobility::constant(grid.next_position()));

    // 右侧：每个叶子一条独立链路，设备下标与叶子下标一致
    let mut right_links = Vec::with_capacity(opts.n_right);
    let mut right_router_devices = Vec::with_capacity(opts.n_right);
    let mut right_leaf_devices = Vec::with_capacity(opts.n_right);
    for &leaf in &right_leaves {
        let (link, router_dev, leaf_dev) = net.install_point_to_point(rt1, leaf, &opts.right_link);
        right_links.push(link);
        right_router_devices.push(router_dev);
        right_leaf_devices.push(leaf_dev);
    }

    info!(
        nodes = net.nodes().len(),
        links = net.links().len(),
        wifi_stas = left_leaf_devices.len(),
        "🏗️  无线 dumbbell 拓扑构建完成"
    );

    WirelessDumbbell {
        routers: [rt0, rt1],
        left_leaves,
        right_leaves,
        central_link,
        central_devices: [c0, c1],
        wifi_channel,
        left_leaf_devices,
        ap_device,
        right_links,
        right_leaf_devices,
        right_router_devices,
        router_interfaces: Ipv4InterfaceContainer::default(),
        left_leaf_interfaces: Ipv4InterfaceContainer::default(),
        left_router_interfaces: Ipv4InterfaceContainer::default(),
        right_leaf_interfaces: Ipv4InterfaceContainer::default(),
        right_router_interfaces: Ipv4InterfaceContainer::default(),
        router_interfaces6: Ipv6InterfaceContainer::default(),
        left_leaf_interfaces6: Ipv6InterfaceContainer::default(),
        left_router_interfaces6: Ipv6InterfaceContainer::default(),
        right_leaf_interfaces6: Ipv6InterfaceContainer::default(),
        right_router_interfaces6: Ipv6InterfaceContainer::default(),
    }
}

impl WirelessDumbbell {
    /// 左侧瓶颈路由器（同时是 AP）
    pub fn left(&self) -> NodeId {
        self.routers[0]
    }

    /// 第 `i` 个左侧叶子
    pub fn left_leaf(&self, i: usize) -> NodeId {
        self.left_leaves[i]
    }

    /// 右侧瓶颈路由器
    pub fn right(&self) -> NodeId {
        self.routers[1]
    }

    /// 第 `i` 个右侧叶子
    pub fn right_leaf(&self, i: usize) -> NodeId {
        self.right_leaves[i]
    }

    pub fn access_point(&self) -> NodeId {
        self.routers[0]
    }

    pub fn routers(&self) -> [NodeId; 2] {
        self.routers
    }

    pub fn left_leaves(&self) -> &[NodeId] {
        &self.left_leaves
    }

    pub fn right_leaves(&self) -> &[NodeId] {
        &self.right_leaves
    }

    pub fn left_count(&self) -> usize {
        self.left_leaves.len()
    }

    pub fn right_count(&self) -> usize {
        self.right_leaves.len()
    }

    pub fn central_link(&self) -> LinkId {
        self.central_link
    }

    pub fn central_devices(&self) -> [DeviceId; 2] {
        self.central_devices
    }

    pub fn wifi_channel(&self) -> ChannelId {
        self.wifi_channel
    }

    pub fn left_leaf_devices(&self) -> &[DeviceId] {
        &self.left_leaf_devices
    }

    pub fn ap_device(&self) -> DeviceId {
        self.ap_device
    }

    pub fn right_links(&self) -> &[LinkId] {
        &self.right_links
    }

    pub fn right_leaf_devices(&self) -> &[DeviceId] {
        &self.right_leaf_devices
    }

    pub fn right_router_devices(&self) -> &[DeviceId] {
        &self.right_router_devices
    }

    /// 所有节点：两个路由器、左侧叶子、右侧叶子
    pub fn all_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(2 + self.left_count() + self.right_count());
        out.extend(self.routers);
        out.extend(&self.left_leaves);
        out.extend(&self.right_leaves);
        out
    }

    /// 在路由器和全部叶子上安装协议栈
    pub fn install_stack(&self, net: &mut Network, stack: &InternetStack) {
        stack.install(net, &self.all_nodes());
    }
}

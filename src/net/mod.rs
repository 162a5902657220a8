//! 网络拓扑模块
//!
//! 此模块包含拓扑描述的核心组件：节点、设备、点对点链路、无线信道、
//! 位置/移动模型以及全局路由。

// 子模块声明
mod device;
mod id;
mod link;
mod mobility;
mod network;
mod node;
mod routing;
mod wifi;

// 重新导出公共接口
pub use device::{DeviceKind, Mac48, NetDevice};
pub use id::{ChannelId, DeviceId, LinkId, NodeId};
pub use link::{LinkSpec, PointToPointLink};
pub use mobility::{CONSTANT_POSITION, GridLayout, GridPositionAllocator, Mobility, Rectangle, Vector};
pub use network::Network;
pub use node::{Node, NodeKind};
pub use routing::RoutingTable;
pub use wifi::{RateAdaptation, Ssid, WifiChannel, WifiConfig, WifiRole, WifiStandard};

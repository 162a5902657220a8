//! 点对点链路
//!
//! 链路属性（速率、时延）只做透传，由外部仿真引擎解释。

use serde::{Deserialize, Serialize};

use super::id::{DeviceId, LinkId, NodeId};
use crate::units::{DataRate, SimTime};

/// 点对点链路属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub data_rate: DataRate,
    pub delay: SimTime,
}

impl LinkSpec {
    pub fn new(data_rate: DataRate, delay: SimTime) -> Self {
        Self { data_rate, delay }
    }
}

impl Default for LinkSpec {
    fn default() -> Self {
        Self {
            data_rate: DataRate::from_mbps(10),
            delay: SimTime::from_millis(2),
        }
    }
}

/// 一条点对点链路，恰好连接两个设备
#[derive(Debug, Clone)]
pub struct PointToPointLink {
    pub id: LinkId,
    /// 两端设备，顺序与安装时参数顺序一致
    pub devices: [DeviceId; 2],
    pub nodes: [NodeId; 2],
    pub spec: LinkSpec,
}

impl PointToPointLink {
    /// 链路另一端的节点
    pub fn peer_of(&self, node: NodeId) -> Option<NodeId> {
        if self.nodes[0] == node {
            Some(self.nodes[1])
        } else if self.nodes[1] == node {
            Some(self.nodes[0])
        } else {
            None
        }
    }
}

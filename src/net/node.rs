//! 节点类型
//!
//! 节点只是仿真参与者的身份：名字、类别、挂载的设备、位置（mobility）和协议栈。

use serde::{Deserialize, Serialize};

use super::id::{DeviceId, NodeId};
use super::mobility::Mobility;
use crate::addr::InternetStack;

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// 瓶颈路由器（左侧路由器同时承担 AP 角色）
    Router,
    /// 通过 wifi 接入的叶子节点
    WirelessLeaf,
    /// 通过点对点链路接入的叶子节点
    WiredLeaf,
}

/// 网络节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    kind: NodeKind,
    pub(crate) devices: Vec<DeviceId>,
    pub(crate) mobility: Option<Mobility>,
    pub(crate) stack: Option<InternetStack>,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            devices: Vec::new(),
            mobility: None,
            stack: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// 节点上挂载的设备（按安装顺序）
    pub fn devices(&self) -> &[DeviceId] {
        &self.devices
    }

    pub fn mobility(&self) -> Option<&Mobility> {
        self.mobility.as_ref()
    }

    pub fn stack(&self) -> Option<&InternetStack> {
        self.stack.as_ref()
    }
}

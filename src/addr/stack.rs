//! 协议栈安装

use crate::net::{Network, NodeId};

/// 节点上安装的 Internet 协议栈能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternetStack {
    pub ipv4: bool,
    pub ipv6: bool,
}

impl Default for InternetStack {
    fn default() -> Self {
        Self { ipv4: true, ipv6: true }
    }
}

impl InternetStack {
    pub fn ipv4_only() -> Self {
        Self { ipv4: true, ipv6: false }
    }

    /// 在一组节点上安装协议栈
    pub fn install(&self, net: &mut Network, nodes: &[NodeId]) {
        for &n in nodes {
            net.install_stack(n, self);
        }
    }
}

//! 网络设备
//!
//! 每个设备属于一个节点，是点对点链路或无线信道在该节点上的端点。

use std::fmt;
use std::net::IpAddr;

use serde::{Serialize, Serializer};

use super::id::{ChannelId, DeviceId, LinkId, NodeId};

/// 48 位 MAC 地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mac48(pub [u8; 6]);

impl Mac48 {
    /// 由低 48 位整数构造
    pub fn from_u64(v: u64) -> Self {
        let b = v.to_be_bytes();
        Mac48([b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    /// 修正 EUI-64 形式的接口标识（U/L 位取反，中间插入 ff:fe）
    pub fn to_eui64(self) -> [u8; 8] {
        let m = self.0;
        [m[0] ^ 0x02, m[1], m[2], 0xff, 0xfe, m[3], m[4], m[5]]
    }
}

impl fmt::Display for Mac48 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

impl Serialize for Mac48 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 设备类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    PointToPoint { link: LinkId },
    /// wifi 终端（STA）
    WifiSta { channel: ChannelId },
    /// wifi 接入点（AP）
    WifiAp { channel: ChannelId },
}

impl DeviceKind {
    pub fn channel(&self) -> Option<ChannelId> {
        match *self {
            DeviceKind::WifiSta { channel } | DeviceKind::WifiAp { channel } => Some(channel),
            DeviceKind::PointToPoint { .. } => None,
        }
    }

    pub fn link(&self) -> Option<LinkId> {
        match *self {
            DeviceKind::PointToPoint { link } => Some(link),
            _ => None,
        }
    }
}

/// 网络设备
#[derive(Debug, Clone)]
pub struct NetDevice {
    pub id: DeviceId,
    pub node: NodeId,
    pub kind: DeviceKind,
    pub mac: Mac48,
    /// 已分配到该设备上的地址（按分配顺序）
    pub addresses: Vec<IpAddr>,
}

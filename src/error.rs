//! 错误类型

use std::net::{IpAddr, Ipv4Addr};

use crate::net::NodeId;

/// 属性字符串解析失败
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AttrError {
    #[error("invalid data rate: {0:?}")]
    InvalidRate(String),
    #[error("invalid time value: {0:?}")]
    InvalidTime(String),
    #[error("invalid subnet: {0:?} (expected a.b.c.d/len or a.b.c.d/mask)")]
    InvalidSubnet(String),
    #[error("invalid bounding box: {0:?} (expected ulx,uly,lrx,lry)")]
    InvalidBoundingBox(String),
}

/// 地址分配失败
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddrError {
    #[error("invalid IPv4 mask {0}")]
    InvalidMask(Ipv4Addr),
    #[error("invalid IPv6 prefix length {0}")]
    InvalidPrefix(u8),
    #[error("network address {network} has bits set outside of its prefix")]
    UnalignedNetwork { network: IpAddr },
    #[error("address overflow in network {network}")]
    AddressOverflow { network: IpAddr },
    #[error("network overflow after {network}")]
    NetworkOverflow { network: IpAddr },
    #[error("address {0} has already been allocated")]
    Duplicate(IpAddr),
    #[error("IPv6 address generator has no network for prefix /{0}")]
    GeneratorUninit(u8),
    #[error("node {0:?} has no {1} stack installed")]
    NoStack(NodeId, &'static str),
}

/// 场景构建失败
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("{n_left} senders but only {n_right} sinks on the right side")]
    NotEnoughSinks { n_left: usize, n_right: usize },
    #[error(transparent)]
    Addr(#[from] AddrError),
}

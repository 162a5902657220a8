//! 地址分配模块
//!
//! 协议栈安装、IPv4 子网游标与 IPv6 网络生成器。

mod ipv4;
mod ipv6;
mod stack;

pub use ipv4::{Ipv4AddressHelper, Ipv4Interface, Ipv4InterfaceContainer, Ipv4Mask, Ipv4Subnet};
pub use ipv6::{
    Ipv6AddressGenerator, Ipv6Interface, Ipv6InterfaceContainer, Ipv6Prefix, link_local_from_mac,
};
pub use stack::InternetStack;

//! IPv4 子网分配
//!
//! `Ipv4AddressHelper` 持有一个子网游标：在当前网络里依次发放主机地址，
//! 调用 `new_network` 后前进到下一个同样大小的网络。

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::{AddrError, AttrError};
use crate::net::{DeviceId, Network, NodeId};

/// IPv4 子网掩码（高位连续的 1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Mask(u32);

impl Ipv4Mask {
    pub fn from_prefix_len(len: u8) -> Result<Self, AddrError> {
        if len > 32 {
            return Err(AddrError::InvalidPrefix(len));
        }
        let bits = u32::MAX.checked_shl(32 - u32::from(len)).unwrap_or(0);
        Ok(Ipv4Mask(bits))
    }

    pub fn from_addr(mask: Ipv4Addr) -> Result<Self, AddrError> {
        let bits = u32::from(mask);
        if bits.leading_ones() + bits.trailing_zeros() != 32 {
            return Err(AddrError::InvalidMask(mask));
        }
        Ok(Ipv4Mask(bits))
    }

    pub fn prefix_len(self) -> u8 {
        self.0.leading_ones() as u8
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn to_addr(self) -> Ipv4Addr {
        Ipv4Addr::from(self.0)
    }
}

impl fmt::Display for Ipv4Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_addr())
    }
}

/// 一个 IPv4 网络（网络地址 + 掩码），字符串形式为 `10.1.1.0/24` 或 `10.1.1.0/255.255.255.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Subnet {
    pub network: Ipv4Addr,
    pub mask: Ipv4Mask,
}

impl Ipv4Subnet {
    pub fn new(network: Ipv4Addr, prefix_len: u8) -> Result<Self, AddrError> {
        Ok(Self {
            network,
            mask: Ipv4Mask::from_prefix_len(prefix_len)?,
        })
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & self.mask.bits() == u32::from(self.network) & self.mask.bits()
    }
}

impl fmt::Display for Ipv4Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.mask.prefix_len())
    }
}

impl FromStr for Ipv4Subnet {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || AttrError::InvalidSubnet(s.to_string());
        let (net, mask) = s.trim().split_once('/').ok_or_else(bad)?;
        let network: Ipv4Addr = net.parse().map_err(|_| bad())?;
        let mask = match mask.parse::<u8>() {
            Ok(len) => Ipv4Mask::from_prefix_len(len),
            Err(_) => Ipv4Mask::from_addr(mask.parse().map_err(|_| bad())?),
        };
        let mask = mask.map_err(|_| bad())?;
        Ok(Self { network, mask })
    }
}

impl Serialize for Ipv4Subnet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Subnet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 一个已分配的 IPv4 接口：(地址, 设备)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Interface {
    pub node: NodeId,
    pub device: DeviceId,
    pub address: Ipv4Addr,
    pub mask: Ipv4Mask,
}

impl Ipv4Interface {
    pub fn subnet(&self) -> Ipv4Subnet {
        Ipv4Subnet {
            network: Ipv4Addr::from(u32::from(self.address) & self.mask.bits()),
            mask: self.mask,
        }
    }
}

/// 有序的接口集合，下标与分配时的设备顺序一致
#[derive(Debug, Clone, Default)]
pub struct Ipv4InterfaceContainer {
    interfaces: Vec<Ipv4Interface>,
}

impl Ipv4InterfaceContainer {
    pub fn push(&mut self, iface: Ipv4Interface) {
        self.interfaces.push(iface);
    }

    /// 第 `i` 个接口；越界属于编程错误，直接 panic
    pub fn get(&self, i: usize) -> &Ipv4Interface {
        &self.interfaces[i]
    }

    pub fn address(&self, i: usize) -> Ipv4Addr {
        self.interfaces[i].address
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ipv4Interface> {
        self.interfaces.iter()
    }
}

/// IPv4 子网游标
#[derive(Debug, Clone)]
pub struct Ipv4AddressHelper {
    mask: Ipv4Mask,
    shift: u32,
    /// 当前网络号（已右移 `shift` 位）
    network: u64,
    /// 每个网络的首个主机号
    base: u64,
    /// 下一个待发放的主机号
    address: u64,
    /// 主机号上限（不含广播地址）
    max: u64,
}

impl Ipv4AddressHelper {
    /// 以 `.1` 作为首个主机号
    pub fn new(network: Ipv4Addr, mask: Ipv4Mask) -> Result<Self, AddrError> {
        Self::with_base(network, mask, Ipv4Addr::new(0, 0, 0, 1))
    }

    pub fn from_subnet(subnet: &Ipv4Subnet) -> Result<Self, AddrError> {
        Self::new(subnet.network, subnet.mask)
    }

    pub fn with_base(network: Ipv4Addr, mask: Ipv4Mask, base: Ipv4Addr) -> Result<Self, AddrError> {
        let net_bits = u32::from(network);
        if net_bits & !mask.bits() != 0 {
            return Err(AddrError::UnalignedNetwork {
                network: IpAddr::V4(network),
            });
        }
        let shift = 32 - u32::from(mask.prefix_len());
        let base = u64::from(u32::from(base) & !mask.bits());
        Ok(Self {
            mask,
            shift,
            network: u64::from(net_bits) >> shift,
            base,
            address: base,
            max: (1u64 << shift).saturating_sub(2),
        })
    }

    pub fn mask(&self) -> Ipv4Mask {
        self.mask
    }

    /// 当前网络地址
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(((self.network << self.shift) & u64::from(u32::MAX)) as u32)
    }

    pub fn subnet(&self) -> Ipv4Subnet {
        Ipv4Subnet {
            network: self.network(),
            mask: self.mask,
        }
    }

    /// 在当前网络中发放下一个主机地址
    pub fn new_address(&mut self) -> Result<Ipv4Addr, AddrError> {
        if self.address == 0 || self.address > self.max {
            return Err(AddrError::AddressOverflow {
                network: IpAddr::V4(self.network()),
            });
        }
        let addr = ((self.network << self.shift) | self.address) as u32;
        self.address += 1;
        Ok(Ipv4Addr::from(addr))
    }

    /// 前进到下一个网络，主机号回到起点
    pub fn new_network(&mut self) -> Result<Ipv4Addr, AddrError> {
        let limit = 1u64 << (32 - self.shift);
        if self.network + 1 >= limit {
            return Err(AddrError::NetworkOverflow {
                network: IpAddr::V4(self.network()),
            });
        }
        self.network += 1;
        self.address = self.base;
        debug!(network = %self.subnet(), "前进到下一个 IPv4 网络");
        Ok(self.network())
    }

    /// 给每个设备分配当前网络中的一个地址，返回顺序与 `devices` 一致
    pub fn assign(&mut self, net: &mut Network, devices: &[DeviceId]) -> Result<Ipv4InterfaceContainer, AddrError> {
        let mut out = Ipv4InterfaceContainer::default();
        for &dev in devices {
            let node = net.device(dev).node;
            if !net.has_ipv4(node) {
                return Err(AddrError::NoStack(node, "IPv4"));
            }
            let address = self.new_address()?;
            net.register_address(dev, IpAddr::V4(address))?;
            trace!(node = ?node, device = ?dev, address = %address, "分配 IPv4 地址");
            out.push(Ipv4Interface {
                node,
                device: dev,
                address,
                mask: self.mask,
            });
        }
        Ok(out)
    }
}

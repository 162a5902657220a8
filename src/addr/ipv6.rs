//! IPv6 网络/地址生成
//!
//! `Ipv6AddressGenerator` 按前缀长度分别维护一个网络游标。它是调用方显式持有的值，
//! 多个拓扑共享同一个生成器时不会拿到重复的网络；各自独立构建时各用各的生成器即可。
//! 生成器还记录所有已发出的地址，不同前缀长度的游标落在同一段地址上时返回 `Duplicate`。

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::AddrError;
use crate::net::{DeviceId, Mac48, Network, NodeId};

/// IPv6 前缀长度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Ipv6Prefix(u8);

impl Ipv6Prefix {
    pub fn new(len: u8) -> Result<Self, AddrError> {
        if len > 128 {
            return Err(AddrError::InvalidPrefix(len));
        }
        Ok(Ipv6Prefix(len))
    }

    pub fn prefix_len(self) -> u8 {
        self.0
    }

    pub fn mask(self) -> u128 {
        u128::MAX.checked_shl(128 - u32::from(self.0)).unwrap_or(0)
    }
}

impl TryFrom<u8> for Ipv6Prefix {
    type Error = AddrError;

    fn try_from(len: u8) -> Result<Self, Self::Error> {
        Ipv6Prefix::new(len)
    }
}

impl From<Ipv6Prefix> for u8 {
    fn from(p: Ipv6Prefix) -> u8 {
        p.0
    }
}

impl fmt::Display for Ipv6Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

/// 由 MAC 推导的链路本地地址 `fe80::/64` + 修正 EUI-64
pub fn link_local_from_mac(mac: Mac48) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets[0] = 0xfe;
    octets[1] = 0x80;
    octets[8..].copy_from_slice(&mac.to_eui64());
    Ipv6Addr::from(octets)
}

/// 一个已分配的 IPv6 接口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Interface {
    pub node: NodeId,
    pub device: DeviceId,
    pub link_local: Ipv6Addr,
    pub global: Ipv6Addr,
    pub prefix: Ipv6Prefix,
}

impl Ipv6Interface {
    /// 全局地址所在的网络
    pub fn network(&self) -> Ipv6Addr {
        Ipv6Addr::from(u128::from(self.global) & self.prefix.mask())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ipv6InterfaceContainer {
    interfaces: Vec<Ipv6Interface>,
}

impl Ipv6InterfaceContainer {
    pub fn push(&mut self, iface: Ipv6Interface) {
        self.interfaces.push(iface);
    }

    pub fn get(&self, i: usize) -> &Ipv6Interface {
        &self.interfaces[i]
    }

    /// 第 `i` 个接口的全局地址
    pub fn global(&self, i: usize) -> Ipv6Addr {
        self.interfaces[i].global
    }

    pub fn link_local(&self, i: usize) -> Ipv6Addr {
        self.interfaces[i].link_local
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ipv6Interface> {
        self.interfaces.iter()
    }
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    network: u128,
    /// 每个网络的首个接口标识
    base: u128,
    next: u128,
}

/// IPv6 网络游标（按前缀长度分别计数）
#[derive(Debug, Clone, Default)]
pub struct Ipv6AddressGenerator {
    cursors: HashMap<u8, Cursor>,
    allocated: HashSet<u128>,
}

impl Ipv6AddressGenerator {
    /// 以 `::1` 作为首个接口标识初始化
    pub fn init(&mut self, network: Ipv6Addr, prefix: Ipv6Prefix) -> Result<(), AddrError> {
        self.init_with_interface_id(network, prefix, Ipv6Addr::from(1u128))
    }

    /// 把 `prefix` 的游标设到 `network`。
    ///
    /// 游标只会前进：若已有游标不在 `network` 之前，保持原位，
    /// 保证同一个生成器不会两次发出同一个网络。
    pub fn init_with_interface_id(
        &mut self,
        network: Ipv6Addr,
        prefix: Ipv6Prefix,
        interface_id: Ipv6Addr,
    ) -> Result<(), AddrError> {
        let net_bits = u128::from(network);
        if net_bits & !prefix.mask() != 0 {
            return Err(AddrError::UnalignedNetwork {
                network: IpAddr::V6(network),
            });
        }
        let base = u128::from(interface_id) & !prefix.mask();
        if let Some(cur) = self.cursors.get(&prefix.prefix_len()) {
            if cur.network >= net_bits {
                debug!(
                    prefix = prefix.prefix_len(),
                    requested = %network,
                    current = %Ipv6Addr::from(cur.network),
                    "游标已越过请求的起点，沿用当前网络"
                );
                return Ok(());
            }
        }
        self.cursors.insert(
            prefix.prefix_len(),
            Cursor {
                network: net_bits,
                base,
                next: base,
            },
        );
        Ok(())
    }

    fn cursor(&self, prefix: Ipv6Prefix) -> Result<&Cursor, AddrError> {
        self.cursors
            .get(&prefix.prefix_len())
            .ok_or(AddrError::GeneratorUninit(prefix.prefix_len()))
    }

    /// 已发出的地址是否包含 `addr`
    pub fn is_allocated(&self, addr: Ipv6Addr) -> bool {
        self.allocated.contains(&u128::from(addr))
    }

    /// 当前网络
    pub fn network(&self, prefix: Ipv6Prefix) -> Result<Ipv6Addr, AddrError> {
        Ok(Ipv6Addr::from(self.cursor(prefix)?.network))
    }

    /// 前进到下一个网络并返回它
    pub fn next_network(&mut self, prefix: Ipv6Prefix) -> Result<Ipv6Addr, AddrError> {
        let cur = *self.cursor(prefix)?;
        let overflow = || AddrError::NetworkOverflow {
            network: IpAddr::V6(Ipv6Addr::from(cur.network)),
        };
        let step = 1u128.checked_shl(128 - u32::from(prefix.prefix_len())).ok_or_else(overflow)?;
        let network = cur.network.checked_add(step).ok_or_else(overflow)?;
        self.cursors.insert(
            prefix.prefix_len(),
            Cursor {
                network,
                base: cur.base,
                next: cur.base,
            },
        );
        debug!(network = %Ipv6Addr::from(network), prefix = prefix.prefix_len(), "前进到下一个 IPv6 网络");
        Ok(Ipv6Addr::from(network))
    }

    /// 在当前网络中发放下一个地址
    pub fn next_address(&mut self, prefix: Ipv6Prefix) -> Result<Ipv6Addr, AddrError> {
        let host_mask = !prefix.mask();
        let cur = self
            .cursors
            .get_mut(&prefix.prefix_len())
            .ok_or(AddrError::GeneratorUninit(prefix.prefix_len()))?;
        if cur.next > host_mask {
            return Err(AddrError::AddressOverflow {
                network: IpAddr::V6(Ipv6Addr::from(cur.network)),
            });
        }
        let addr = cur.network | cur.next;
        cur.next += 1;
        if !self.allocated.insert(addr) {
            return Err(AddrError::Duplicate(IpAddr::V6(Ipv6Addr::from(addr))));
        }
        Ok(Ipv6Addr::from(addr))
    }

    /// 给每个设备分配当前网络中的一个全局地址（以及首次需要时的链路本地地址）
    pub fn assign(
        &mut self,
        net: &mut Network,
        devices: &[DeviceId],
        prefix: Ipv6Prefix,
    ) -> Result<Ipv6InterfaceContainer, AddrError> {
        let mut out = Ipv6InterfaceContainer::default();
        for &dev in devices {
            let node = net.device(dev).node;
            if !net.has_ipv6(node) {
                return Err(AddrError::NoStack(node, "IPv6"));
            }
            let link_local = match existing_link_local(net, dev) {
                Some(ll) => ll,
                None => {
                    let ll = link_local_from_mac(net.device(dev).mac);
                    net.register_address(dev, IpAddr::V6(ll))?;
                    ll
                }
            };
            let global = self.next_address(prefix)?;
            net.register_address(dev, IpAddr::V6(global))?;
            trace!(node = ?node, device = ?dev, global = %global, link_local = %link_local, "分配 IPv6 地址");
            out.push(Ipv6Interface {
                node,
                device: dev,
                link_local,
                global,
                prefix,
            });
        }
        Ok(out)
    }
}

fn existing_link_local(net: &Network, dev: DeviceId) -> Option<Ipv6Addr> {
    net.device(dev).addresses.iter().find_map(|a| match a {
        IpAddr::V6(v6) if v6.segments()[0] == 0xfe80 => Some(*v6),
        _ => None,
    })
}

//! Dumbbell 地址规划
//!
//! 左侧叶子和 AP 在同一个冲突域里，共用一个子网；
//! 右侧每条点对点链路各占一个子网；两个路由器之间再占一个子网。

use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::info;

use super::wireless_dumbbell::WirelessDumbbell;
use crate::addr::{
    Ipv4AddressHelper, Ipv4InterfaceContainer, Ipv6AddressGenerator, Ipv6InterfaceContainer, Ipv6Prefix,
};
use crate::error::AddrError;
use crate::net::Network;

impl WirelessDumbbell {
    /// 分配 IPv4 地址
    ///
    /// 三个游标都按可变引用传入：再次调用会从上次停下的地方继续，
    /// 得到一份与之前不相交的地址规划。拓扑上保存的接口集合换成新的一份，
    /// 调用方手里旧的集合仍然可用，只是已经过时。
    #[tracing::instrument(skip_all)]
    pub fn assign_ipv4(
        &mut self,
        net: &mut Network,
        left_ip: &mut Ipv4AddressHelper,
        right_ip: &mut Ipv4AddressHelper,
        router_ip: &mut Ipv4AddressHelper,
    ) -> Result<(), AddrError> {
        // 路由器之间
        let router_interfaces = router_ip.assign(net, &self.central_devices)?;

        // 左侧：叶子 + AP 一个子网
        let mut devices = self.left_leaf_devices.clone();
        devices.push(self.ap_device);
        let ifc = left_ip.assign(net, &devices)?;
        let mut left_leaf_interfaces = Ipv4InterfaceContainer::default();
        let mut left_router_interfaces = Ipv4InterfaceContainer::default();
        for (i, iface) in ifc.iter().enumerate() {
            if i < self.left_count() {
                left_leaf_interfaces.push(*iface);
            } else {
                left_router_interfaces.push(*iface);
            }
        }
        left_ip.new_network()?;

        // 右侧：每条链路一个新子网
        let mut right_leaf_interfaces = Ipv4InterfaceContainer::default();
        let mut right_router_interfaces = Ipv4InterfaceContainer::default();
        for i in 0..self.right_count() {
            let ifc = right_ip.assign(net, &[self.right_leaf_devices[i], self.right_router_devices[i]])?;
            right_leaf_interfaces.push(*ifc.get(0));
            right_router_interfaces.push(*ifc.get(1));
            right_ip.new_network()?;
        }

        self.router_interfaces = router_interfaces;
        self.left_leaf_interfaces = left_leaf_interfaces;
        self.left_router_interfaces = left_router_interfaces;
        self.right_leaf_interfaces = right_leaf_interfaces;
        self.right_router_interfaces = right_router_interfaces;

        info!(
            router = %self.router_interfaces.get(0).subnet(),
            left = %self.left_router_interfaces.get(0).subnet(),
            right_links = self.right_count(),
            "📮 IPv4 地址分配完成"
        );
        Ok(())
    }

    /// 分配 IPv6 地址
    ///
    /// 依次占用：路由器网络、左侧共享网络、每个右侧叶子一个网络，
    /// 每段之后生成器前进到下一个网络。
    #[tracing::instrument(skip(self, net, generator))]
    pub fn assign_ipv6(
        &mut self,
        net: &mut Network,
        generator: &mut Ipv6AddressGenerator,
        addr_base: Ipv6Addr,
        prefix: Ipv6Prefix,
    ) -> Result<(), AddrError> {
        generator.init(addr_base, prefix)?;

        let router_interfaces6 = generator.assign(net, &self.central_devices, prefix)?;
        generator.next_network(prefix)?;

        let mut devices = self.left_leaf_devices.clone();
        devices.push(self.ap_device);
        let ifc = generator.assign(net, &devices, prefix)?;
        let mut left_leaf_interfaces6 = Ipv6InterfaceContainer::default();
        let mut left_router_interfaces6 = Ipv6InterfaceContainer::default();
        for (i, iface) in ifc.iter().enumerate() {
            if i < self.left_count() {
                left_leaf_interfaces6.push(*iface);
            } else {
                left_router_interfaces6.push(*iface);
            }
        }
        generator.next_network(prefix)?;

        let mut right_leaf_interfaces6 = Ipv6InterfaceContainer::default();
        let mut right_router_interfaces6 = Ipv6InterfaceContainer::default();
        for i in 0..self.right_count() {
            let ifc = generator.assign(net, &[self.right_leaf_devices[i], self.right_router_devices[i]], prefix)?;
            right_leaf_interfaces6.push(*ifc.get(0));
            right_router_interfaces6.push(*ifc.get(1));
            generator.next_network(prefix)?;
        }

        self.router_interfaces6 = router_interfaces6;
        self.left_leaf_interfaces6 = left_leaf_interfaces6;
        self.left_router_interfaces6 = left_router_interfaces6;
        self.right_leaf_interfaces6 = right_leaf_interfaces6;
        self.right_router_interfaces6 = right_router_interfaces6;

        info!(
            router = %self.router_interfaces6.get(0).network(),
            left = %self.left_router_interfaces6.get(0).network(),
            right_links = self.right_count(),
            "📮 IPv6 地址分配完成"
        );
        Ok(())
    }

    /// 第 `i` 个左侧叶子的 IPv4 地址
    pub fn left_ipv4_address(&self, i: usize) -> Ipv4Addr {
        self.left_leaf_interfaces.address(i)
    }

    /// 第 `i` 个右侧叶子的 IPv4 地址
    pub fn right_ipv4_address(&self, i: usize) -> Ipv4Addr {
        self.right_leaf_interfaces.address(i)
    }

    /// 第 `i` 个左侧叶子的 IPv6 全局地址
    pub fn left_ipv6_address(&self, i: usize) -> Ipv6Addr {
        self.left_leaf_interfaces6.global(i)
    }

    /// 第 `i` 个右侧叶子的 IPv6 全局地址
    pub fn right_ipv6_address(&self, i: usize) -> Ipv6Addr {
        self.right_leaf_interfaces6.global(i)
    }

    pub fn router_interfaces(&self) -> &Ipv4InterfaceContainer {
        &self.router_interfaces
    }

    pub fn left_leaf_interfaces(&self) -> &Ipv4InterfaceContainer {
        &self.left_leaf_interfaces
    }

    /// AP 在左侧共享子网上的接口
    pub fn left_router_interfaces(&self) -> &Ipv4InterfaceContainer {
        &self.left_router_interfaces
    }

    pub fn right_leaf_interfaces(&self) -> &Ipv4InterfaceContainer {
        &self.right_leaf_interfaces
    }

    pub fn right_router_interfaces(&self) -> &Ipv4InterfaceContainer {
        &self.right_router_interfaces
    }

    pub fn router_interfaces6(&self) -> &Ipv6InterfaceContainer {
        &self.router_interfaces6
    }

    pub fn left_leaf_interfaces6(&self) -> &Ipv6InterfaceContainer {
        &self.left_leaf_interfaces6
    }

    pub fn left_router_interfaces6(&self) -> &Ipv6InterfaceContainer {
        &self.left_router_interfaces6
    }

    pub fn right_leaf_interfaces6(&self) -> &Ipv6InterfaceContainer {
        &self.right_leaf_interfaces6
    }

    pub fn right_router_interfaces6(&self) -> &Ipv6InterfaceContainer {
        &self.right_router_interfaces6
    }
}

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::addr::{Ipv4Subnet, Ipv6Prefix};
use crate::error::AttrError;
use crate::net::{LinkSpec, WifiConfig};
use crate::topo::DEFAULT_MOBILITY_MODEL;
use crate::units::SimTime;

/// 场景描述（JSON），所有字段都可省略
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSpec {
    pub n_left: usize,
    pub n_right: usize,
    pub central_link: LinkSpec,
    pub right_link: LinkSpec,
    pub tcp_variant: TcpVariant,
    pub wifi: WifiConfig,
    pub mobility_model: String,
    /// 应用运行时长；仿真在此之后再多跑 1 秒
    pub simulation_time: SimTime,
    pub router_base: Ipv4Subnet,
    pub left_base: Ipv4Subnet,
    pub right_base: Ipv4Subnet,
    pub ipv6: Option<Ipv6Spec>,
    pub sink_port: u16,
    pub send_size: u32,
    pub max_bytes: Option<u64>,
    pub bounding_box: Option<BoundingBox>,
}

impl Default for ScenarioSpec {
    fn default() -> Self {
        Self {
            n_left: 3,
            n_right: 3,
            central_link: LinkSpec::default(),
            right_link: LinkSpec::default(),
            tcp_variant: TcpVariant::default(),
            wifi: WifiConfig::default(),
            mobility_model: DEFAULT_MOBILITY_MODEL.to_string(),
            simulation_time: SimTime::from_secs(20),
            router_base: subnet("10.1.1.0/24"),
            left_base: subnet("10.1.2.0/24"),
            right_base: subnet("10.1.3.0/24"),
            ipv6: None,
            sink_port: 8080,
            send_size: 1000,
            max_bytes: None,
            bounding_box: None,
        }
    }
}

fn subnet(s: &str) -> Ipv4Subnet {
    s.parse().expect("built-in subnet literal")
}

/// IPv6 地址规划的起点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv6Spec {
    pub base: Ipv6Addr,
    pub prefix: Ipv6Prefix,
}

/// 布局矩形，字符串形式为 `ulx,uly,lrx,lry`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub ulx: f64,
    pub uly: f64,
    pub lrx: f64,
    pub lry: f64,
}

impl FromStr for BoundingBox {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || AttrError::InvalidBoundingBox(s.to_string());
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| bad())?;
        match parts[..] {
            [ulx, uly, lrx, lry] => Ok(BoundingBox { ulx, uly, lrx, lry }),
            _ => Err(bad()),
        }
    }
}

/// TCP 拥塞控制变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TcpVariant {
    #[default]
    Westwood,
    WestwoodPlus,
    NewReno,
}

impl TcpVariant {
    /// 仿真引擎中的 socket 类型名
    pub fn socket_type(self) -> &'static str {
        match self {
            TcpVariant::Westwood | TcpVariant::WestwoodPlus => "ns3::TcpWestwood",
            TcpVariant::NewReno => "ns3::TcpNewReno",
        }
    }

    /// 需要交给仿真引擎的全局默认属性 (名字, 值)
    pub fn config_defaults(self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        if self == TcpVariant::WestwoodPlus {
            out.push(("ns3::TcpWestwood::ProtocolType", "WestwoodPlus"));
        }
        out.push(("ns3::TcpL4Protocol::SocketType", self.socket_type()));
        if matches!(self, TcpVariant::Westwood | TcpVariant::WestwoodPlus) {
            out.push(("ns3::TcpWestwood::FilterType", "Tustin"));
        }
        out
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TcpVariant::Westwood => "westwood",
            TcpVariant::WestwoodPlus => "westwoodplus",
            TcpVariant::NewReno => "newreno",
        }
    }
}

impl fmt::Display for TcpVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TcpVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "westwood" => Ok(TcpVariant::Westwood),
            "westwoodplus" => Ok(TcpVariant::WestwoodPlus),
            "newreno" => Ok(TcpVariant::NewReno),
            other => Err(format!("unknown tcp variant: {other}")),
        }
    }
}

//! 无线接入配置
//!
//! 只描述 wifi 挂载关系（信道、SSID、标准、速率自适应算法），
//! PHY/MAC 行为由外部仿真引擎负责。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::{ChannelId, DeviceId};

/// 速率自适应算法（remote station manager）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateAdaptation {
    #[default]
    Arf,
    Aarf,
    Ideal,
    Minstrel,
}

impl RateAdaptation {
    /// 仿真引擎中的类型名
    pub fn manager_type(self) -> &'static str {
        match self {
            RateAdaptation::Arf => "ns3::ArfWifiManager",
            RateAdaptation::Aarf => "ns3::AarfWifiManager",
            RateAdaptation::Ideal => "ns3::IdealWifiManager",
            RateAdaptation::Minstrel => "ns3::MinstrelWifiManager",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RateAdaptation::Arf => "arf",
            RateAdaptation::Aarf => "aarf",
            RateAdaptation::Ideal => "ideal",
            RateAdaptation::Minstrel => "minstrel",
        }
    }
}

impl fmt::Display for RateAdaptation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateAdaptation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arf" => Ok(RateAdaptation::Arf),
            "aarf" => Ok(RateAdaptation::Aarf),
            "ideal" => Ok(RateAdaptation::Ideal),
            "minstrel" => Ok(RateAdaptation::Minstrel),
            other => Err(format!("unknown rate adaptation algorithm: {other}")),
        }
    }
}

/// wifi 标准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WifiStandard {
    #[serde(rename = "80211a")]
    Ieee80211a,
    #[serde(rename = "80211b")]
    Ieee80211b,
    #[default]
    #[serde(rename = "80211g")]
    Ieee80211g,
    #[serde(rename = "80211n")]
    Ieee80211n,
}

impl fmt::Display for WifiStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WifiStandard::Ieee80211a => "802.11a",
            WifiStandard::Ieee80211b => "802.11b",
            WifiStandard::Ieee80211g => "802.11g",
            WifiStandard::Ieee80211n => "802.11n",
        };
        f.write_str(s)
    }
}

/// 服务集标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ssid(pub String);

impl Default for Ssid {
    fn default() -> Self {
        Ssid("wifi-default".to_string())
    }
}

/// wifi 挂载配置
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WifiConfig {
    #[serde(default)]
    pub standard: WifiStandard,
    #[serde(default)]
    pub rate_adaptation: RateAdaptation,
    #[serde(default)]
    pub ssid: Ssid,
}

/// wifi 角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiRole {
    Sta,
    Ap,
}

/// 一个无线信道：所有挂在上面的设备共享一个冲突域
#[derive(Debug, Clone)]
pub struct WifiChannel {
    pub id: ChannelId,
    pub config: WifiConfig,
    pub devices: Vec<DeviceId>,
}

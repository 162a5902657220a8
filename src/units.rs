//! 时间与速率单位
//!
//! 定义链路属性使用的时延（`SimTime`）与数据速率（`DataRate`），
//! 并支持解析场景脚本里常见的属性字符串，例如 `"2ms"`、`"10Mbps"`。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AttrError;

/// 仿真时间（纳秒）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub fn from_micros(us: u64) -> SimTime {
        SimTime(us.saturating_mul(1_000))
    }
    pub fn from_millis(ms: u64) -> SimTime {
        SimTime(ms.saturating_mul(1_000_000))
    }
    pub fn from_secs(s: u64) -> SimTime {
        SimTime(s.saturating_mul(1_000_000_000))
    }
    /// 由浮点秒数构造（负数按 0 处理）
    pub fn from_secs_f64(s: f64) -> SimTime {
        SimTime(scale_to_u64(s, 1e9))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = self.0;
        if ns != 0 && ns % 1_000_000_000 == 0 {
            write!(f, "{}s", ns / 1_000_000_000)
        } else if ns != 0 && ns % 1_000_000 == 0 {
            write!(f, "{}ms", ns / 1_000_000)
        } else if ns != 0 && ns % 1_000 == 0 {
            write!(f, "{}us", ns / 1_000)
        } else {
            write!(f, "{}ns", ns)
        }
    }
}

impl FromStr for SimTime {
    type Err = AttrError;

    /// 支持 `ns`/`us`/`ms`/`s`/`min`/`h` 后缀，数值可以带小数；无后缀按秒处理。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, unit) = split_number(s).ok_or_else(|| AttrError::InvalidTime(s.to_string()))?;
        let scale = match unit {
            "ns" => 1.0,
            "us" => 1e3,
            "ms" => 1e6,
            "" | "s" => 1e9,
            "min" => 60e9,
            "h" => 3600e9,
            _ => return Err(AttrError::InvalidTime(s.to_string())),
        };
        Ok(SimTime(scale_to_u64(value, scale)))
    }
}

impl Serialize for SimTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SimTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 数据速率（bit/s）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct DataRate(pub u64);

impl DataRate {
    pub fn from_mbps(mbps: u64) -> DataRate {
        DataRate(mbps.saturating_mul(1_000_000))
    }
    pub fn from_gbps(gbps: u64) -> DataRate {
        DataRate(gbps.saturating_mul(1_000_000_000))
    }
    pub fn bps(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bps = self.0;
        if bps != 0 && bps % 1_000_000_000 == 0 {
            write!(f, "{}Gbps", bps / 1_000_000_000)
        } else if bps != 0 && bps % 1_000_000 == 0 {
            write!(f, "{}Mbps", bps / 1_000_000)
        } else if bps != 0 && bps % 1_000 == 0 {
            write!(f, "{}kbps", bps / 1_000)
        } else {
            write!(f, "{}bps", bps)
        }
    }
}

impl FromStr for DataRate {
    type Err = AttrError;

    /// 接受 `bps`、`b/s`、`kbps`、`Kbps`、`Mbps`、`Gbps` 以及字节单位 `KB/s`、`MB/s`、`GB/s`，
    /// 还有二进制前缀 `Kib/s`、`Mib/s`、`Gib/s`。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, unit) = split_number(s).ok_or_else(|| AttrError::InvalidRate(s.to_string()))?;
        let scale = match unit {
            "bps" | "b/s" => 1.0,
            "kbps" | "Kbps" | "kb/s" | "Kb/s" => 1e3,
            "Mbps" | "Mb/s" => 1e6,
            "Gbps" | "Gb/s" => 1e9,
            "Bps" | "B/s" => 8.0,
            "KBps" | "KB/s" | "kBps" | "kB/s" => 8e3,
            "MBps" | "MB/s" => 8e6,
            "GBps" | "GB/s" => 8e9,
            "Kib/s" => 1024.0,
            "Mib/s" => 1024.0 * 1024.0,
            "Gib/s" => 1024.0 * 1024.0 * 1024.0,
            _ => return Err(AttrError::InvalidRate(s.to_string())),
        };
        Ok(DataRate(scale_to_u64(value, scale)))
    }
}

impl Serialize for DataRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DataRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 把 `"12.5ms"` 切成 `(12.5, "ms")`
fn split_number(s: &str) -> Option<(f64, &str)> {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value: f64 = s[..end].parse().ok()?;
    Some((value, s[end..].trim()))
}

fn scale_to_u64(value: f64, scale: f64) -> u64 {
    let v = (value * scale).round();
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= u64::MAX as f64 {
        u64::MAX
    } else {
        v as u64
    }
}

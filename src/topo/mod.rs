//! 拓扑构建
//!
//! 目前提供无线/点对点混合的 dumbbell：构建、地址规划、几何布局分别在三个文件里。

mod addressing;
mod layout;
pub mod wireless_dumbbell;

pub use wireless_dumbbell::{DEFAULT_MOBILITY_MODEL, WirelessDumbbell, WirelessDumbbellOpts, build_wireless_dumbbell};

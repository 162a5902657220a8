//! 拓扑规划导出
//!
//! 把场景里的节点、设备、链路、无线信道、地址、位置和流量整理成一份 JSON，
//! 外部仿真引擎按它装配同样的拓扑。

mod export;
mod types;

pub use types::{
    PlanDevice, PlanDeviceKind, PlanFlow, PlanIpv4Interface, PlanIpv6Interface, PlanLink, PlanNode, PlanSink,
    PlanWifi, TopologyPlan,
};

//! 位置与移动模型
//!
//! 移动模型本身由外部引擎实现；这里只记录模型类型名、边界和当前位置。

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// 固定位置模型的类型名
pub const CONSTANT_POSITION: &str = "ns3::ConstantPositionMobilityModel";

/// 三维坐标（布局只用到 x/y）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// 轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Rectangle {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

/// 节点上的移动模型状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mobility {
    /// 模型类型名，不做校验，直接交给仿真引擎
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rectangle>,
    pub position: Vector,
}

impl Mobility {
    pub fn constant(position: Vector) -> Self {
        Self {
            model: CONSTANT_POSITION.to_string(),
            bounds: None,
            position,
        }
    }
}

/// 网格布局顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLayout {
    #[default]
    RowFirst,
    ColumnFirst,
}

/// 网格位置分配器：按顺序依次给出网格上的点
#[derive(Debug, Clone)]
pub struct GridPositionAllocator {
    pub min_x: f64,
    pub min_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub grid_width: NonZeroU32,
    pub layout: GridLayout,
    current: u32,
}

impl GridPositionAllocator {
    pub fn new(min_x: f64, min_y: f64, delta_x: f64, delta_y: f64, grid_width: NonZeroU32, layout: GridLayout) -> Self {
        Self {
            min_x,
            min_y,
            delta_x,
            delta_y,
            grid_width,
            layout,
            current: 0,
        }
    }

    /// 下一个网格位置
    pub fn next_position(&mut self) -> Vector {
        let col = f64::from(self.current % self.grid_width.get());
        let row = f64::from(self.current / self.grid_width.get());
        self.current += 1;
        match self.layout {
            GridLayout::RowFirst => Vector::new(self.min_x + self.delta_x * col, self.min_y + self.delta_y * row, 0.0),
            GridLayout::ColumnFirst => Vector::new(self.min_x + self.delta_x * row, self.min_y + self.delta_y * col, 0.0),
        }
    }
}

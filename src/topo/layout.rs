//! Dumbbell 几何布局

use std::f64::consts::{FRAC_PI_2, PI};

use tracing::debug;

use super::wireless_dumbbell::WirelessDumbbell;
use crate::net::{Network, Vector};

impl WirelessDumbbell {
    /// 在矩形 (ulx, uly)-(lrx, lry) 内摆放路由器与叶子
    ///
    /// 路由器位于宽度的 1/3、2/3 处并垂直居中；叶子排在以路由器为圆心、
    /// 半径为宽度 1/3 的半圆弧上，左侧向左凸出，右侧向右凸出，使所有连线等长。
    /// 叶子纵坐标被夹在矩形上下边界内，横坐标不夹。
    #[tracing::instrument(skip(self, net))]
    pub fn bounding_box(&self, net: &mut Network, ulx: f64, uly: f64, lrx: f64, lry: f64) {
        let left = ulx.min(lrx);
        let top = uly.min(lry);
        let bottom = uly.max(lry);
        let x_dist = (lrx - ulx).abs();
        let y_dist = bottom - top;

        let x_adder = x_dist / 3.0;
        let mid_y = top + y_dist / 2.0;

        let lr = Vector::new(left + x_adder, mid_y, 0.0);
        net.set_position(self.left(), lr);
        let rr = Vector::new(left + x_adder * 2.0, mid_y, 0.0);
        net.set_position(self.right(), rr);

        for (i, pos) in arc_positions(self.left_count(), lr, x_adder, -1.0).into_iter().enumerate() {
            net.set_position(self.left_leaf(i), clamp_y(pos, top, bottom));
        }
        for (i, pos) in arc_positions(self.right_count(), rr, x_adder, 1.0).into_iter().enumerate() {
            net.set_position(self.right_leaf(i), clamp_y(pos, top, bottom));
        }

        debug!(
            left_router = ?lr,
            right_router = ?rr,
            left_leaves = self.left_count(),
            right_leaves = self.right_count(),
            "完成几何布局"
        );
    }
}

/// 以 `center` 为圆心、`radius` 为半径，从上到下把 `count` 个点摆在半圆弧上。
///
/// `dir` 为 -1 时弧线朝左，为 1 时朝右。数量为奇数时正中间的点角度强制为 0，
/// 保证它与圆心严格在一条水平线上。
fn arc_positions(count: usize, center: Vector, radius: f64, dir: f64) -> Vec<Vector> {
    let step = PI / (count as f64 + 1.0);
    let mut theta = -FRAC_PI_2 + step;
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        if count % 2 == 1 && i == count / 2 {
            theta = 0.0;
        }
        out.push(Vector::new(
            center.x + dir * theta.cos() * radius,
            center.y + theta.sin() * radius,
            0.0,
        ));
        theta += step;
    }
    out
}

fn clamp_y(mut pos: Vector, top: f64, bottom: f64) -> Vector {
    if pos.y < top {
        pos.y = top;
    }
    if pos.y > bottom {
        pos.y = bottom;
    }
    pos
}

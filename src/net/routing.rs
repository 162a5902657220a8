//! 全局路由
//!
//! 提供一个简单的“按最短跳数”的路由表：为每个 (from, dst)
//! 预计算所有等价最短路径的下一跳集合。链路都是双向的，
//! 因此在同一张邻接表上对每个 dst 做 BFS 即可。

use std::collections::{HashMap, VecDeque};

use super::id::NodeId;

#[derive(Debug, Clone)]
pub struct RoutingTable {
    dirty: bool,
    /// (from, dst) -> 等价最短路径下一跳（按节点编号升序）
    next_hops: HashMap<(NodeId, NodeId), Vec<NodeId>>,
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self {
            dirty: true,
            next_hops: HashMap::new(),
        }
    }
}

impl RoutingTable {
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// 确保路由表基于当前拓扑是最新的。
    ///
    /// `adj[from]` 为 `from` 的所有邻居（无向）。
    pub fn ensure_built(&mut self, adj: &[Vec<NodeId>]) {
        if !self.dirty {
            return;
        }

        let n = adj.len();
        self.next_hops.clear();

        // 对每个 dst 做 BFS，得到到 dst 的最短跳数距离 dist[*]。
        // 然后对每个 from，选出所有满足 dist[next] = dist[from] - 1 的 next 作为候选。
        let mut dist: Vec<u32> = vec![u32::MAX; n];
        let mut q: VecDeque<NodeId> = VecDeque::new();

        for dst_idx in 0..n {
            dist.fill(u32::MAX);
            q.clear();

            let dst = NodeId(dst_idx);
            dist[dst_idx] = 0;
            q.push_back(dst);

            while let Some(v) = q.pop_front() {
                let dv = dist[v.0];
                for &pred in &adj[v.0] {
                    if dist[pred.0] == u32::MAX {
                        dist[pred.0] = dv.saturating_add(1);
                        q.push_back(pred);
                    }
                }
            }

            for from_idx in 0..n {
                let from = NodeId(from_idx);
                if from == dst {
                    continue;
                }
                let df = dist[from_idx];
                if df == u32::MAX {
                    continue; // unreachable
                }
                let mut cands: Vec<NodeId> = adj[from_idx]
                    .iter()
                    .copied()
                    .filter(|nh| dist[nh.0] == df - 1)
                    .collect();
                cands.sort();
                if !cands.is_empty() {
                    self.next_hops.insert((from, dst), cands);
                }
            }
        }

        self.dirty = false;
    }

    /// 获取 (from, dst) 的下一跳候选集合。
    pub fn next_hops(&self, from: NodeId, dst: NodeId) -> Option<&[NodeId]> {
        self.next_hops.get(&(from, dst)).map(|v| v.as_slice())
    }

    /// 沿编号最小的下一跳走出一条完整路径（含两端）。
    pub fn path(&self, src: NodeId, dst: NodeId) -> Option<Vec<NodeId>> {
        let mut path = vec![src];
        let mut cur = src;
        while cur != dst {
            let nh = *self.next_hops(cur, dst)?.first()?;
            path.push(nh);
            cur = nh;
        }
        Some(path)
    }
}

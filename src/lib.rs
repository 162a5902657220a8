pub mod addr;
pub mod error;
pub mod net;
pub mod plan;
pub mod scenario;
pub mod topo;
pub mod units;

#[cfg(test)]
mod test;

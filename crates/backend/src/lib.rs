pub mod cli;
pub mod dashboards;
pub mod shared;
pub mod system;

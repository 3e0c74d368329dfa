//! Handlers 模块

pub mod cameras;
pub mod devices;
pub mod health;
pub mod metrics;
pub mod recordings;

pub use cameras::*;
pub use devices::*;
pub use health::*;
pub use metrics::*;
pub use recordings::*;

//! 设备云客户端共享的领域模型。

pub mod command;
pub mod device;
pub mod stream;

pub use command::{DeviceCommand, PtzDirection, UnknownDirection};
pub use device::{Camera, DeviceRecord};
pub use stream::{StreamAllocation, StreamProtocol};

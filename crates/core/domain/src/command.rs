use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 下发给设备的命令，`code`/`value` 原样透传；`value` 缺省时不序列化该字段。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCommand {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl DeviceCommand {
    pub fn new(code: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            code: code.into(),
            value,
        }
    }
}

/// 云台移动方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PtzDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PtzDirection {
    pub const ALL: [PtzDirection; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for PtzDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的方向字符串。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ptz direction: {}", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for PtzDirection {
    type Err = UnknownDirection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str() == value)
            .ok_or_else(|| UnknownDirection(value.to_string()))
    }
}

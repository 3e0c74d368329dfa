//! 云端调用错误类型定义

/// 云端调用错误。
///
/// 需要 `Clone`：一次 token 刷新的失败结果会分发给所有等待者。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CloudError {
    /// 网络/连接失败
    #[error("transport error: {0}")]
    Transport(String),

    /// 响应不是合法 JSON，或结构与预期不符
    #[error("invalid payload: {0}")]
    Decode(String),

    /// 云端已响应但报告失败
    #[error("{message}")]
    RemoteApi { code: Option<i64>, message: String },
}

impl CloudError {
    /// 是否为云端业务失败（而非传输层故障）。
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteApi { .. })
    }
}

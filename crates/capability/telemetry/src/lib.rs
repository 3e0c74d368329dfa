//! 追踪与请求 ID 生成。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub cloud_requests: u64,
    pub cloud_failures: u64,
    pub token_refreshes: u64,
    pub token_refresh_failures: u64,
    pub discovery_auto: u64,
    pub discovery_fallback: u64,
    pub fallback_lookup_failures: u64,
    pub stream_hls: u64,
    pub stream_rtsp: u64,
    pub stream_unavailable: u64,
    pub commands_sent: u64,
    pub command_failures: u64,
}

/// 基础指标（进程内计数）。
pub struct TelemetryMetrics {
    cloud_requests: AtomicU64,
    cloud_failures: AtomicU64,
    token_refreshes: AtomicU64,
    token_refresh_failures: AtomicU64,
    discovery_auto: AtomicU64,
    discovery_fallback: AtomicU64,
    fallback_lookup_failures: AtomicU64,
    stream_hls: AtomicU64,
    stream_rtsp: AtomicU64,
    stream_unavailable: AtomicU64,
    commands_sent: AtomicU64,
    command_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            cloud_requests: AtomicU64::new(0),
            cloud_failures: AtomicU64::new(0),
            token_refreshes: AtomicU64::new(0),
            token_refresh_failures: AtomicU64::new(0),
            discovery_auto: AtomicU64::new(0),
            discovery_fallback: AtomicU64::new(0),
            fallback_lookup_failures: AtomicU64::new(0),
            stream_hls: AtomicU64::new(0),
            stream_rtsp: AtomicU64::new(0),
            stream_unavailable: AtomicU64::new(0),
            commands_sent: AtomicU64::new(0),
            command_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cloud_requests: self.cloud_requests.load(Ordering::Relaxed),
            cloud_failures: self.cloud_failures.load(Ordering::Relaxed),
            token_refreshes: self.token_refreshes.load(Ordering::Relaxed),
            token_refresh_failures: self.token_refresh_failures.load(Ordering::Relaxed),
            discovery_auto: self.discovery_auto.load(Ordering::Relaxed),
            discovery_fallback: self.discovery_fallback.load(Ordering::Relaxed),
            fallback_lookup_failures: self.fallback_lookup_failures.load(Ordering::Relaxed),
            stream_hls: self.stream_hls.load(Ordering::Relaxed),
            stream_rtsp: self.stream_rtsp.load(Ordering::Relaxed),
            stream_unavailable: self.stream_unavailable.load(Ordering::Relaxed),
            commands_sent: self.commands_sent.load(Ordering::Relaxed),
            command_failures: self.command_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录云端请求次数（含 token 请求）。
pub fn record_cloud_request() {
    metrics().cloud_requests.fetch_add(1, Ordering::Relaxed);
}

/// 记录云端请求失败次数（传输失败或业务失败）。
pub fn record_cloud_failure() {
    metrics().cloud_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录 token 刷新成功次数。
pub fn record_token_refresh() {
    metrics().token_refreshes.fetch_add(1, Ordering::Relaxed);
}

/// 记录 token 刷新失败次数。
pub fn record_token_refresh_failure() {
    metrics()
        .token_refresh_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录通过自动发现得到设备列表的次数。
pub fn record_discovery_auto() {
    metrics().discovery_auto.fetch_add(1, Ordering::Relaxed);
}

/// 记录回退到配置列表的次数。
pub fn record_discovery_fallback() {
    metrics().discovery_fallback.fetch_add(1, Ordering::Relaxed);
}

/// 记录配置列表中单个设备查询失败的次数。
pub fn record_fallback_lookup_failure() {
    metrics()
        .fallback_lookup_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录 HLS 分配成功次数。
pub fn record_stream_hls() {
    metrics().stream_hls.fetch_add(1, Ordering::Relaxed);
}

/// 记录回退到 RTSP 且成功的次数。
pub fn record_stream_rtsp() {
    metrics().stream_rtsp.fetch_add(1, Ordering::Relaxed);
}

/// 记录所有协议均分配失败的次数。
pub fn record_stream_unavailable() {
    metrics().stream_unavailable.fetch_add(1, Ordering::Relaxed);
}

/// 记录命令下发次数。
pub fn record_command_sent() {
    metrics().commands_sent.fetch_add(1, Ordering::Relaxed);
}

/// 记录命令下发失败次数。
pub fn record_command_failure() {
    metrics().command_failures.fetch_add(1, Ordering::Relaxed);
}

//! 进程内计数指标快照。
//!
//! - GET /api/metrics

use api_contract::MetricsSnapshotDto;
use axum::Json;
use camlink_telemetry::metrics;

pub async fn get_metrics() -> Json<MetricsSnapshotDto> {
    let snapshot = metrics().snapshot();
    Json(MetricsSnapshotDto {
        cloud_requests: snapshot.cloud_requests,
        cloud_failures: snapshot.cloud_failures,
        token_refreshes: snapshot.token_refreshes,
        token_refresh_failures: snapshot.token_refresh_failures,
        discovery_auto: snapshot.discovery_auto,
        discovery_fallback: snapshot.discovery_fallback,
        fallback_lookup_failures: snapshot.fallback_lookup_failures,
        stream_hls: snapshot.stream_hls,
        stream_rtsp: snapshot.stream_rtsp,
        stream_unavailable: snapshot.stream_unavailable,
        commands_sent: snapshot.commands_sent,
        command_failures: snapshot.command_failures,
    })
}

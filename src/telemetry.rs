//! 日志与追踪系统
//! 初始化结构化日志

use crate::config::AppConfig;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// 未设置 RUST_LOG 时使用的过滤指令
///
/// 本服务按配置级别输出，tower_http 的逐请求日志降到 warn 以上
pub fn default_directive(config: &AppConfig) -> String {
    let level = config.logging.level.to_lowercase();
    format!("{level},rbac_admin={level},tower_http=warn")
}

/// 初始化日志与追踪系统
///
/// 全局 subscriber 已存在时返回错误
pub fn init_telemetry(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config)))?;

    let log_layer = match config.logging.format.to_lowercase().as_str() {
        // 生产环境：请求 span 关闭时输出耗时
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        // 开发环境
        _ => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_layer)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.logging.level,
        format = %config.logging.format,
        "Telemetry initialized"
    );

    Ok(())
}

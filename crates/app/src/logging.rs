//! # 日志初始化

use autonome_core::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

/// # Summary
/// 安装全局 tracing 订阅者。
///
/// # Logic
/// 1. 日志级别取自 `RUST_LOG`，缺省为 `info`。
/// 2. 始终输出到终端；`dir` 非空时另写入按天滚动的日志文件。
///
/// # Returns
/// * 文件写入线程的 guard，必须持有到进程退出，否则尾部日志会丢失。
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = if config.dir.trim().is_empty() {
        (None, None)
    } else {
        let appender = tracing_appender::rolling::daily(&config.dir, "autonome.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

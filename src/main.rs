//! RBAC 管理服务主入口

use rbac_admin::{
    auth::JwtService, config::AppConfig, handlers::health, middleware::AppState, routes,
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();
    let mut issue_token_for = None;

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("rbac-admin {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            "token" => {
                let raw = args
                    .get(2)
                    .ok_or_else(|| anyhow::anyhow!("用法: rbac-admin token <user_id>"))?;
                issue_token_for = Some(Uuid::parse_str(raw)?);
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env
    if let Ok(env) = std::env::var("RBAC_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 签发访问令牌后退出（令牌只标识用户，不携带角色）
    if let Some(user_id) = issue_token_for {
        let jwt = JwtService::from_config(&config)?;
        println!("{}", jwt.generate_access_token(&user_id)?);
        return Ok(());
    }

    health::set_start_time();

    // 2. 初始化日志
    telemetry::init_telemetry(&config)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "RBAC admin starting...");

    // 3. 构建应用状态（按配置写入默认数据）
    let app_state = Arc::new(AppState::from_config(config.clone())?);

    // 4. 构建路由
    let app = routes::create_router(app_state);

    // 5. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 6. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
///
/// 收到信号后开始排空连接，超过超时时间仍未结束则强制退出
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        std::process::exit(1);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("rbac-admin {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: rbac-admin [选项 | token <user_id>]");
    println!();
    println!("选项:");
    println!("  --version          打印版本信息并退出");
    println!("  --help             打印此帮助信息并退出");
    println!("  token <user_id>    为指定用户签发访问令牌并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 RBAC_ 前缀的环境变量完成，例如 RBAC_SECURITY__JWT_SECRET");
    println!("  RBAC_SERVER__ADDR                  监听地址 (默认 0.0.0.0:3000)");
    println!("  RBAC_LOGGING__LEVEL / __FORMAT     日志级别与格式 (json | pretty)");
    println!("  RBAC_SECURITY__JWT_SECRET          JWT 密钥 (至少 32 个字符)");
    println!("  RBAC_RBAC__SEED_DEFAULTS           启动时写入默认角色与权限");
    println!("  RBAC_RBAC__BOOTSTRAP_SUPER_ADMIN   授予 super_admin 的用户 ID");
}

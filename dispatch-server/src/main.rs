use dispatch_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env (如果存在)
    dotenv::dotenv().ok();

    // 2. 加载配置并设置环境 (工作目录, 日志)
    let config = Config::from_env();
    setup_environment(&config)?;

    print_banner();
    tracing::info!("Dispatch server starting...");

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

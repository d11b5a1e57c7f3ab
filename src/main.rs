use anyhow::Result;
use kahoot_autoplay::utils::logging;
use kahoot_autoplay::{App, Config};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // Ctrl-C 取消正在进行的等待
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到退出信号，正在取消...");
            trigger.cancel();
        }
    });

    // 初始化并运行应用
    App::new(config, cancel).run().await?;

    Ok(())
}

use clap::Parser;
use dayflow_core::cli::{Cli, Commands, execute_command};
use dayflow_core::{AppError, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. 设置环境 (dotenv, 工作目录, 日志)
    let config = setup_environment()?;

    if !cli.json && matches!(cli.command, Commands::Login { .. }) {
        print_banner();
    }

    tracing::debug!(data = %config.data_path().display(), "Dayflow starting");

    // 2. 执行命令
    if let Err(e) = execute_command(cli, &config).await {
        match e.downcast_ref::<AppError>() {
            Some(app) => tracing::warn!(
                code = app.code.code(),
                category = app.code.category().name(),
                "Command refused: {}",
                app.message
            ),
            None => tracing::error!(error = %e, "Command failed"),
        }
        return Err(e);
    }

    Ok(())
}

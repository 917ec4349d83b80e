//! Web 服务器主程序入口

use clap::Parser;

use html_translator::env::{core, generate_env_docs, EnvVar};
use html_translator::logging::init_tracing;
use html_translator::translation::{create_provider, ConfigManager, TranslationOrchestrator};
use html_translator::web::{WebConfig, WebServer};

/// HTML translation web service
#[derive(Parser, Debug)]
#[command(name = "html-translator-web", version, about)]
struct Args {
    /// Bind address [env: HTML_TRANSLATOR_BIND_ADDRESS, default: 127.0.0.1]
    #[arg(short, long, value_name = "ADDRESS")]
    bind: Option<String>,

    /// Port number [env: HTML_TRANSLATOR_PORT, default: 8000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level: trace, debug, info, warn, error [env: HTML_TRANSLATOR_LOG_LEVEL]
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print the supported environment variables and exit
    #[arg(long)]
    env_docs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.env_docs {
        print!("{}", generate_env_docs());
        return Ok(());
    }

    let env_file = ConfigManager::load_dotenv();

    let log_level = match args.log_level {
        Some(level) => core::LogLevel::parse(&level)?,
        None => core::LogLevel::get()?,
    };
    init_tracing(&log_level);
    if let Some(file) = env_file {
        tracing::info!("已加载环境变量文件: {}", file);
    }

    let mut web_config = WebConfig::from_env()?;
    if let Some(bind) = args.bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        web_config.port = port;
    }
    web_config.validate()?;

    // 配置无效时在启动阶段退出，不对外提供服务
    let provider_config = ConfigManager::load_without_dotenv()?.into_config();
    let provider = create_provider(&provider_config).map_err(|e| {
        tracing::error!("无法创建翻译服务: {}", e);
        e
    })?;

    let server = WebServer::new(web_config, TranslationOrchestrator::new(provider));
    server.start().await?;

    Ok(())
}

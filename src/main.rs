use ragchat::config::{Config, load_dotenv};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "ui")]
fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();
    // Fail early on a bad latency instead of inside the first render
    Config::from_env()?;
    dioxus::launch(ragchat::ui::App);
    Ok(())
}

#[cfg(not(feature = "ui"))]
fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();
    let config = Config::from_env()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let mut controller = ragchat::controller::SessionController::new(config);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        ragchat::console::run_console(&mut controller, stdin, tokio::io::stdout()).await
    })
}

use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};

fn setup_logging() {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT / CONFIG_PATH 等环境变量生效
    dotenv().ok();
    let format = LogFormat::from_env();
    init_logging(format);
    info!(service = "bootstrap", event = "logger_init", format = ?format, "tracing subscriber initialized");
}

fn run() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate()?;
    info!(
        service = "bootstrap",
        event = "config_loaded",
        user_file = %cfg.storage.user_file.display(),
        gift_file = %cfg.storage.gift_file.display(),
        roles = cfg.domains.roles.len(),
        "configuration loaded"
    );

    common::env::ensure_data_files(&[&cfg.storage.user_file, &cfg.storage.gift_file])?;
    let stores = service::RecordStores::from_config(&cfg)?;

    let users = stores.users.list(false)?;
    let inventory = stores.gifts.inventory()?;
    info!(
        service = "bootstrap",
        event = "ready",
        users = users.len(),
        gift_cells = inventory.cell_count(),
        "record stores initialized"
    );
    Ok(())
}

fn main() -> std::process::ExitCode {
    setup_logging();

    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "bootstrap", event = "bootstrap_failed", error = %e, "bootstrap failed");
            std::process::ExitCode::FAILURE
        }
    }
}

use color_eyre::eyre;
use structopt::StructOpt;
use tracing::info;

use scanner::{logger::init_tracing, report, Pipeline, ScanConfig};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    // .env가 있으면 환경 변수로 로드 (CLI 플래그가 우선)
    dotenv::dotenv().ok();

    let config = ScanConfig::from_args();

    // init logging
    let _guards = init_tracing(config.log_dir.as_deref())?;

    info!("스캐너 시작: {:?}", config);

    let pipeline = Pipeline::from_config(&config)?;
    let report = pipeline.run().await?;

    if config.json {
        report::print_json(&report)?;
    } else {
        report::print_report(&report);
    }

    Ok(())
}

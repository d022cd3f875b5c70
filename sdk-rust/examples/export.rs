use brainys_sdk::{ExportFormat, ExportRequest, Exporter, ModuleType, TracingBrowser};
use dotenvy::dotenv;
use std::sync::Arc;

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();
    common::init_tracing();

    let mut args = std::env::args().skip(1);
    let module: ModuleType = args
        .next()
        .unwrap_or_else(|| "hint".to_string())
        .parse()
        .unwrap();
    let artifact_id = args.next().expect("usage: export <module> <artifact-id> [format]");
    let format: ExportFormat = args
        .next()
        .unwrap_or_else(|| "word".to_string())
        .parse()
        .unwrap();

    let session = common::session();
    let exporter = Exporter::new(session.clone(), Arc::new(TracingBrowser));

    match exporter
        .export(&ExportRequest::new(artifact_id, module, format))
        .await
    {
        Ok(outcome) => {
            println!("Download: {}", outcome.download_url);
            outcome.refresh.settled().await;
            println!("Credits left: {}", session.credit_balance().credit);
        }
        Err(error) => eprintln!("Export failed: {error}"),
    }
}

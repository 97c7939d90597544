#[tokio::main]
async fn main() {
    if let Err(e) = taskboard_server::run().await {
        log::error!("taskboard-server exited with error: {}", e);
        eprintln!("taskboard-server: {}", e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = terrain_ai_api::run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

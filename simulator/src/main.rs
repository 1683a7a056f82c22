#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ringlight_simulator::run().await
}

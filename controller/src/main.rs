mod device;
mod dispatcher;
mod host;
mod panel;
mod poller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    host::run().await
}

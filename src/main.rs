#[tokio::main]
async fn main() -> anyhow::Result<()> {
    label_office::run_server().await
}

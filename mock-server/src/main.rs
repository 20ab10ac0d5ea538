use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Canned HTTP endpoints for exercising the fetch wrapper.
#[derive(Parser)]
#[command(name = "mock-server")]
struct Args {
    /// Address to bind
    #[arg(long, env = "MOCK_HOST", default_value = "127.0.0.1")]
    host: String,
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    mock_server::run(listener).await
}

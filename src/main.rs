use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the CSV, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = plotmeter::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

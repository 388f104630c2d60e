use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();

    if let Err(err) = neis_mcp::mcp::run_server() {
        eprintln!("Error: {:#}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

// stdout belongs to the MCP stdio transport; all diagnostics go to stderr.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

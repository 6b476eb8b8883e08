// OpsDeck CLI Entry Point

use opsdeck_cli::{output, router::CommandRouter};

#[tokio::main]
async fn main() {
    // Route and execute command
    if let Err(e) = CommandRouter::route().await {
        tracing::debug!("{}", e.technical_details());
        output::print_error(&e.user_message());
        std::process::exit(1);
    }
}

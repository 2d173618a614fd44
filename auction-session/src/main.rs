use {
    crate::server::start_session,
    anyhow::Result,
    clap::Parser,
    std::io::IsTerminal,
    tracing_subscriber::filter::LevelFilter,
};

mod api;
mod config;
mod kernel;
mod ledger;
mod participant;
mod server;
mod session;
mod timer;

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries the console protocol, so logs go to stderr.
    let fmt_builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal());

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    if std::io::stderr().is_terminal() {
        tracing::subscriber::set_global_default(fmt_builder.compact().finish())?;
    } else {
        tracing::subscriber::set_global_default(fmt_builder.json().finish())?;
    }

    // Parse the command line arguments with clap, will exit automatically on `--help` or
    // with invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_session(opts).await,
    }
}

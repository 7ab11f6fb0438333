use clap::Parser;

mod action;

#[derive(Parser)]
#[command(about, author, version)]
struct Args {
    /// Directive used to filter the logs.
    #[arg(long, env = "LOG", default_value = "docket=info,tower_http=info", global = true)]
    log: String,
    /// Enables colors in the logs.
    #[arg(long, env = "LOG_COLOR", global = true)]
    log_color: bool,
    #[command(subcommand)]
    action: action::Action,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = docket::init_logs(&args.log, args.log_color) {
        eprintln!("unable to initialize logs: {err:?}");
    }
    if let Err(err) = args.action.execute().await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

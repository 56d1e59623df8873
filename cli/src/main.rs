use clap::Parser;
mod commands;
use commands::cli::{Args, Commands, E2eCommands, LintArgs};
use commands::{e2e, lint, list};
use monoguard_core::api::{load_default, CliError, DiscoveryError, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            1
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = Args::parse();
    let cfg = load_default(&args.root).map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    match args.command {
        // No subcommand runs the full lint, like the bare `lint` invocation
        // always has.
        None => lint::run(&LintArgs::default(), &args.root, &cfg).await,
        Some(Commands::List(list_args)) => Ok(list::run(&list_args, &args.root)),
        Some(Commands::Lint(lint_args)) => lint::run(&lint_args, &args.root, &cfg).await,
        Some(Commands::E2e(e2e_args)) => match e2e_args.command {
            E2eCommands::List => Ok(e2e::list(&args.root)),
            E2eCommands::Test(test_args) => e2e::test(&test_args, &args.root).await,
        },
    }
}

fn report_error(error: &CliError) {
    eprintln!("Error: {error}");
    if let CliError::Discovery(DiscoveryError::InvalidTargets {
        category, available, ..
    }) = error
    {
        if available.is_empty() {
            eprintln!("No {category} discovered");
        } else {
            eprintln!("Available {category}: {}", available.join(", "));
        }
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("monoguard"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("monoguard.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    // Logs go to stderr; stdout belongs to the reporters.
    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

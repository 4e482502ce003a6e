use clap::Parser;
use fwms::cli::commands;
use fwms::cli::{Cli, Commands, GlobalOpts};
use miette::Result;

/// Initialize the logger: warnings by default, debug with --verbose,
/// errors only with --quiet; RUST_LOG overrides all of these.
fn init_logger(global: &GlobalOpts) {
    let level = if global.verbose {
        log::LevelFilter::Debug
    } else if global.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };

    let mut builder = env_logger::builder();
    builder.filter_level(level).format_timestamp_millis();
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logger(&global);

    match cli.command {
        Commands::Init(args) => commands::init::run(args, &global),
        Commands::Import(args) => commands::import::run(args, &global),
        Commands::Dashboard(args) => commands::dashboard::run(args, &global),
        Commands::Provider(cmd) => commands::provider::run(cmd, &global),
        Commands::Food(cmd) => commands::food::run(cmd, &global),
        Commands::Receiver(cmd) => commands::receiver::run(cmd, &global),
        Commands::Claim(cmd) => commands::claim::run(cmd, &global),
        Commands::Report(cmd) => commands::report::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

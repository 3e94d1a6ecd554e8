use clap::Parser;
use miette::Result;
use seoplan::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Reset SIGPIPE so piping to `head` terminates quietly instead of panicking
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    init_tracing(&global);

    match cli.command {
        Commands::Preview(args) => seoplan::cli::commands::preview::run(args, &global),
        Commands::Run(args) => seoplan::cli::commands::run::run(args, &global),
        Commands::Wizard(args) => seoplan::cli::commands::wizard::run(args, &global),
        Commands::Template(args) => seoplan::cli::commands::template::run(args),
        Commands::Completions(args) => seoplan::cli::commands::completions::run(args),
    }
}

/// Log to stderr; RUST_LOG overrides the level picked by -v/-q
fn init_tracing(global: &GlobalOpts) {
    let default_level = if global.verbose {
        "seoplan=debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

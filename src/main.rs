use clap::{Parser, Subcommand};
use orstviz_player::PlayArgs;
use orstviz_steps::StepsArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None, styles=get_styles())] // Read from `Cargo.toml`
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print or count the snapshots of a sorting run
    Steps(StepsArgs),

    /// Animate a sorting run in the terminal
    Play(PlayArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with traces on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.commands {
        Commands::Steps(steps_args) => steps_args.run(),
        Commands::Play(play_args) => play_args.run(),
    }
}

fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}

#[test]
fn parses_both_subcommands() {
    assert!(Cli::try_parse_from(["orstviz", "steps", "trace", "-a", "heap", "--values", "3,1,2"]).is_ok());
    assert!(Cli::try_parse_from(["orstviz", "steps", "stats", "--sizes", "10,20"]).is_ok());
    assert!(Cli::try_parse_from(["orstviz", "play", "--algorithm", "quick", "--speed", "20"]).is_ok());
    assert!(Cli::try_parse_from(["orstviz", "play", "--algorithm", "bogo"]).is_err());
}

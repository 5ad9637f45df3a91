use clap::{Parser, Subcommand};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;
use wheelcore::command::{Command, Reply, SOCKET_PATH};
use wheelcore::geometry::Geometry;
use wheelcore::prizes::Label;
use wheelcore::resolver;

#[derive(Parser, Debug)]
#[command(name = "wheelctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Raise the prize wheel window
    Show,
    /// Spin the wheel
    Spin,
    /// Close the result without taking the prize out
    Dismiss,
    /// Take the winning prize off the wheel
    Claim,
    /// Answer the trivia question guarding the current prize
    Answer {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Add a prize to the wheel
    Add {
        #[arg(required = true)]
        label: Vec<String>,
    },
    /// Remove the prize at a position (0-based)
    Remove { index: usize },
    /// Remove every prize
    Clear,
    /// Replace the prizes with the default list
    Defaults,
    /// Delete the saved list and reload the defaults
    ClearStorage,
    /// Compute the winner for a rotation without a running wheel
    Resolve {
        /// Cumulative rotation in degrees
        #[arg(short, long)]
        rotation: f64,

        /// Number of segments on the wheel
        #[arg(short, long)]
        segments: usize,
    },
}

const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Resolve { rotation, segments } => return print_resolution(rotation, segments),
        Commands::Show => Command::Show,
        Commands::Spin => Command::Spin,
        Commands::Dismiss => Command::Dismiss,
        Commands::Claim => Command::Claim,
        Commands::Answer { text } => Command::Answer(text.join(" ")),
        Commands::Add { label } => Command::Add(Label::new(label.join(" "))),
        Commands::Remove { index } => Command::Remove(index),
        Commands::Clear => Command::Clear,
        Commands::Defaults => Command::Defaults,
        Commands::ClearStorage => Command::ClearStorage,
    };

    send_command(&command)
}

fn print_resolution(rotation: f64, segments: usize) -> anyhow::Result<()> {
    let geometry = Geometry::new(segments)?;
    let resolution = resolver::resolve_with(&geometry, rotation)?;
    println!(
        "rotation {:.2}° -> pointer at {:.2}° -> segment {} of {} (span {:.2}°)",
        resolution.rotation,
        resolution.pointer_angle,
        resolution.index,
        segments,
        resolution.span
    );
    Ok(())
}

fn send_command(command: &Command) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to prize wheel at {}: {}. Is prizewheel running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("Sending `{}`", command);
    writeln!(stream, "{}", command)?;

    stream.set_read_timeout(Some(REPLY_TIMEOUT))?;
    let mut line = String::new();
    if let Err(e) = BufReader::new(&stream).read_line(&mut line) {
        log::warn!("No reply from prize wheel: {}", e);
        return Ok(());
    }

    match Reply::parse(&line) {
        Reply::Ok => Ok(()),
        Reply::Error(message) => anyhow::bail!("prize wheel rejected `{}`: {}", command, message),
    }
}

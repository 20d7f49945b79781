use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};

use vixen_control_lib::control_interface::ControlInterface;
use vixen_control_lib::led::color::{parse_color, Color};
use vixen_control_lib::session::{Body, SessionConfig, DEFAULT_PORT};
use vixen_control_lib::util::acknowledgment::Acknowledgment;
use vixen_control_lib::util::error::CallError;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    handle_cli(cli).await
}

/// This struct defines the command line interface of the application
#[derive(Parser)]
#[clap(
    name = "vixen_control",
    about = "Controls a Vixen 3 lighting display through its web server",
    version
)]
pub struct Cli {
    /// Host name or IP address of the Vixen web server
    #[clap(long)]
    pub host: String,

    /// Port of the Vixen web server
    #[clap(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Request timeout in milliseconds
    #[clap(short = 't', long = "timeout", default_value = "10000", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Output format for lists and status (plaintext, json, yaml)
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Plaintext)]
    pub output: OutputFormat,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Supported output formats for fetched lists and status.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    /// Plain text format.
    Plaintext,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

/// Subcommands available for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Lists all elements.
    #[clap(name = "elements")]
    Elements,
    /// Searches elements by name.
    #[clap(name = "search")]
    Search {
        /// Text to search for
        query: String,
    },
    /// Lists all sequences.
    #[clap(name = "sequences")]
    Sequences,
    /// Shows the status of the active sequences.
    #[clap(name = "status")]
    Status,
    /// Fetches the element list and then the sequence list.
    #[clap(name = "refresh")]
    Refresh,
    /// Turns on an element.
    #[clap(name = "on")]
    On {
        #[clap(flatten)]
        target: OnTarget,
    },
    /// Turns on a group element and its children.
    #[clap(name = "group-on")]
    GroupOn {
        #[clap(flatten)]
        target: OnTarget,
    },
    /// Turns off an element.
    #[clap(name = "off")]
    Off {
        /// Id of the element
        id: String,
    },
    /// Clears all effects started through the web API.
    #[clap(name = "clear")]
    Clear,
    /// Plays a sequence.
    #[clap(name = "play")]
    Play {
        #[clap(flatten)]
        sequence: SequenceTarget,
    },
    /// Stops a sequence.
    #[clap(name = "stop")]
    Stop {
        #[clap(flatten)]
        sequence: SequenceTarget,
    },
    /// Pauses a sequence.
    #[clap(name = "pause")]
    Pause {
        #[clap(flatten)]
        sequence: SequenceTarget,
    },
}

#[derive(clap::Args)]
pub struct OnTarget {
    /// Id of the element
    id: String,

    /// Seconds the element stays on
    #[clap(short, long, default_value_t = 5)]
    duration: u32,

    /// Intensity in percent (0-100)
    #[clap(short, long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    intensity: u8,

    /// Color by name or as #RRGGBB
    #[clap(short, long, default_value = "white", value_parser = parse_cli_color)]
    color: Color,
}

#[derive(clap::Args)]
pub struct SequenceTarget {
    /// Name of the sequence
    name: String,

    /// File name of the sequence, as listed by `sequences`
    file_name: String,
}

fn parse_duration(s: &str) -> Result<Duration, &'static str> {
    let millis = s
        .parse::<u64>()
        .map_err(|_| "could not parse duration in milliseconds")?;
    Ok(Duration::from_millis(millis))
}

fn parse_cli_color(s: &str) -> Result<Color, String> {
    parse_color(s).map_err(|e| e.to_string())
}

fn print_body(body: &Body, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Plaintext => match body.as_json() {
            Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
            None => println!("{}", body.as_text().unwrap_or_default()),
        },
        OutputFormat::Json => println!("{}", serde_json::to_string(body)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(body)?),
    }
    Ok(())
}

/// Turns a device error into the message shown to the user.
fn explain(err: CallError) -> anyhow::Error {
    if let Some(status) = err.status() {
        anyhow!("The Vixen web server rejected the request ({})", status)
    } else if err.is_transport() {
        anyhow::Error::new(err)
            .context("Could not reach the Vixen web server, check --host and --port")
    } else {
        err.into()
    }
}

fn print_ack(result: Result<Acknowledgment, CallError>) -> Result<()> {
    let ack = result.map_err(explain)?;
    println!("{}", ack.message);
    Ok(())
}

async fn handle_cli(cli: Cli) -> Result<()> {
    let config = SessionConfig::new(&cli.host)
        .port(cli.port)
        .timeout(cli.timeout);
    let mut vixen = ControlInterface::new(&config)?;
    let output = cli.output;

    let result = run_command(&mut vixen, cli.command, output).await;
    vixen.close();
    result
}

async fn run_command(
    vixen: &mut ControlInterface,
    command: Commands,
    output: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Elements => {
            print_body(vixen.try_fetch_elements().await.map_err(explain)?, output)?
        }
        Commands::Search { query } => {
            print_body(vixen.try_search_elements(&query).await.map_err(explain)?, output)?
        }
        Commands::Sequences => {
            print_body(vixen.try_fetch_sequences().await.map_err(explain)?, output)?
        }
        Commands::Status => {
            print_body(vixen.try_sequence_status().await.map_err(explain)?, output)?
        }
        Commands::Refresh => {
            vixen.update_lists().await;
            match (vixen.elements(), vixen.sequences()) {
                (Some(elements), Some(sequences)) => {
                    println!("Elements:");
                    print_body(elements, output)?;
                    println!("Sequences:");
                    print_body(sequences, output)?;
                }
                _ => return Err(anyhow!("Unable to refresh the element and sequence lists")),
            }
        }
        Commands::On { target } => print_ack(
            vixen
                .try_turn_on_element(&target.id, target.duration, target.intensity, target.color)
                .await,
        )?,
        Commands::GroupOn { target } => print_ack(
            vixen
                .try_turn_on_group(&target.id, target.duration, target.intensity, target.color)
                .await,
        )?,
        Commands::Off { id } => print_ack(vixen.try_turn_off_element(&id).await)?,
        Commands::Clear => print_ack(vixen.try_clear_all_elements().await)?,
        Commands::Play { sequence } => print_ack(
            vixen
                .try_play_sequence(&sequence.name, &sequence.file_name)
                .await,
        )?,
        Commands::Stop { sequence } => print_ack(
            vixen
                .try_stop_sequence(&sequence.name, &sequence.file_name)
                .await,
        )?,
        Commands::Pause { sequence } => print_ack(
            vixen
                .try_pause_sequence(&sequence.name, &sequence.file_name)
                .await,
        )?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use vixen_control_lib::util::error::StatusCode;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_on_command() {
        let cli = Cli::try_parse_from([
            "vixen_control",
            "--host",
            "192.168.1.20",
            "on",
            "abc-123",
            "--duration",
            "5",
            "--intensity",
            "100",
            "--color",
            "#0000FF",
        ])
        .unwrap();

        assert_eq!(cli.port, 8888);
        assert_eq!(cli.timeout, Duration::from_secs(10));
        match cli.command {
            Commands::On { target } => {
                assert_eq!(target.id, "abc-123");
                assert_eq!(target.duration, 5);
                assert_eq!(target.intensity, 100);
                assert_eq!(target.color, Color::new(0, 0, 255));
            }
            _ => panic!("expected the on command"),
        }
    }

    #[test]
    fn test_intensity_is_bounded() {
        let result = Cli::try_parse_from([
            "vixen_control",
            "--host",
            "localhost",
            "on",
            "abc-123",
            "--intensity",
            "150",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_sequence_command() {
        let cli = Cli::try_parse_from([
            "vixen_control",
            "--host",
            "localhost",
            "--port",
            "9000",
            "--timeout",
            "2500",
            "pause",
            "Intro",
            "Intro.tim",
        ])
        .unwrap();

        assert_eq!(cli.port, 9000);
        assert_eq!(cli.timeout, Duration::from_millis(2500));
        match cli.command {
            Commands::Pause { sequence } => {
                assert_eq!(sequence.name, "Intro");
                assert_eq!(sequence.file_name, "Intro.tim");
            }
            _ => panic!("expected the pause command"),
        }
    }

    #[test]
    fn test_explain_rejected_request() {
        let err = explain(CallError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            err.to_string(),
            "The Vixen web server rejected the request (500 Internal Server Error)"
        );
    }

    #[test]
    fn test_explain_unreachable_server_keeps_cause() {
        let err = explain(CallError::Timeout(Duration::from_millis(100)));
        assert_eq!(
            err.to_string(),
            "Could not reach the Vixen web server, check --host and --port"
        );
        assert!(format!("{:#}", err).contains("Request timed out after 100ms"));
    }

    #[test]
    fn test_explain_passes_other_errors_through() {
        let err = explain(CallError::MalformedAcknowledgment("[]".to_string()));
        assert_eq!(err.to_string(), "Malformed acknowledgment: []");
        assert!(matches!(
            err.downcast_ref::<CallError>(),
            Some(CallError::MalformedAcknowledgment(_))
        ));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("150"), Ok(Duration::from_millis(150)));
        assert!(parse_duration("soon").is_err());
    }
}

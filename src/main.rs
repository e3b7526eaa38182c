use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use eyre::{eyre, WrapErr};
use oat_setup::config::{Config, ObservingLocation};
use oat_setup::{Axis, LongitudeConvention, MountSetupSession, SetupCommand};

/// OAT Setup
#[derive(Debug, Parser)]
#[command(name = "oat-setup", version, about)]
struct Args {
    /// The latitude, decimal degrees or sDD*MM. Positive northern hemisphere, negative (-) for southern
    #[arg(allow_hyphen_values = true, requires = "longitude")]
    latitude: Option<String>,

    /// The longitude, decimal degrees or sDDD*MM. Positive eastern hemisphere, negative (-) for western
    #[arg(allow_hyphen_values = true)]
    longitude: Option<String>,

    /// The serial port path [default: from config, else /dev/ttyUSB0 (COM3 on Windows)]
    serial_port: Option<String>,

    /// Serial baud rate
    #[arg(long)]
    baud_rate: Option<u32>,

    /// How long to wait for each acknowledgement, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u32>,

    /// TOML file with com_settings, observation_location and mount_settings tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Send the longitude positive West, for firmware that expects it
    #[arg(long)]
    west_positive: bool,

    /// Print the commands instead of sending them
    #[arg(long)]
    dry_run: bool,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config: Config = match &args.config {
        Some(path) => confy::load_path(path)
            .wrap_err_with(|| format!("Couldn't parse configuration {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(path) = args.serial_port {
        config.com_settings.path = path;
    }
    if let Some(baud_rate) = args.baud_rate {
        config.com_settings.baud_rate = baud_rate;
    }
    if let Some(timeout) = args.timeout_ms {
        config.com_settings.timeout_millis = timeout;
    }
    if args.west_positive {
        config.mount_settings.longitude_convention = LongitudeConvention::WestPositive;
    }

    let location = match (args.latitude, args.longitude) {
        (Some(latitude), Some(longitude)) => ObservingLocation {
            latitude,
            longitude,
        },
        _ => config
            .observation_location
            .clone()
            .ok_or_else(|| eyre!("No latitude/longitude given and none in the configuration"))?,
    };

    let latitude = Axis::Latitude.parse(&location.latitude)?;
    let longitude = Axis::Longitude.parse(&location.longitude)?;
    let when = Local::now().naive_local();

    println!("--- OAT Setup ---");
    println!("Serial port: {}", config.com_settings.path);
    println!("Latitude: {} ({:.4}\u{b0})", latitude, latitude.to_degrees());
    println!("Longitude: {} ({:.4}\u{b0})", longitude, longitude.to_degrees());

    if args.dry_run {
        let commands = SetupCommand::sequence(
            &latitude,
            &longitude,
            when,
            config.mount_settings.longitude_convention,
        )?;
        for command in &commands {
            println!("{}", command);
        }
        return Ok(());
    }

    let mut session = MountSetupSession::open(&config.com_settings)?
        .with_longitude_convention(config.mount_settings.longitude_convention);
    let result = session.configure(&latitude, &longitude, when);
    session.close();
    result.wrap_err("Mount setup failed")?;

    println!("Mount configured for {} {}", latitude, longitude);
    Ok(())
}

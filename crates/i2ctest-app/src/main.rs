use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use i2ctest_core::{acquire, BusHandle, DeviceConfig, Session, BANNER};
use log::info;

/// Largest ten-bit slave address.
const MAX_SLAVE_ADDRESS: u16 = 0x3ff;

/// I2cTestTool: Command line I2C testing utility
#[derive(Parser, Debug)]
#[command(
    name = "i2ctesttool",
    version,
    after_help = "Examples:\n  i2ctesttool 0x57\n  i2ctesttool 0x57 I2C1"
)]
struct Args {
    /// Slave address of the target device, hex (0x57) or decimal (87)
    #[arg(value_parser = parse_slave_address)]
    slave_address: u16,

    /// Bus to open when more than one is present, e.g. "i2c-1" or the adapter name
    friendly_name: Option<String>,

    /// Directory holding the i2c-N device nodes
    #[arg(long, default_value = "/dev")]
    dev_root: PathBuf,

    /// Directory holding the adapter descriptions
    #[arg(long, default_value = "/sys/class/i2c-adapter")]
    sysfs_root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn parse_slave_address(text: &str) -> Result<u16, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => text.parse(),
    };
    let address = parsed.map_err(|e| format!("invalid slave address '{text}': {e}"))?;
    if address > MAX_SLAVE_ADDRESS {
        return Err(format!(
            "slave address 0x{address:x} does not fit in 10 bits"
        ));
    }
    Ok(address)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

/// Acquire the device and run the console until the operator leaves.
///
/// Only acquisition failures are returned; a session that ends on an error
/// still counts as a completed session.
fn run(args: Args) -> Result<()> {
    let config = DeviceConfig {
        slave_address: args.slave_address,
        friendly_name: args.friendly_name,
        dev_root: args.dev_root,
        sysfs_root: args.sysfs_root,
    };
    let mut bus = acquire(&config)
        .with_context(|| format!("cannot open slave address 0x{:x}", config.slave_address))?;
    info!("connected: {}", bus.connection_info().device_id);

    println!("{BANNER}");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(err) = Session::new(&mut bus).run(stdin.lock(), &mut stdout) {
        eprintln!("Error: {err}");
    }
    Ok(())
}

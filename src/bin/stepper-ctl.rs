//! Raspberry Pi controller for a unipolar stepper motor.
//!
//! Homes the motor against its limit switch, then plays a command file or
//! takes angles from the terminal. `scan` turns the motor in every coil
//! order to find out how an unlabeled motor is wired.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::{error, info, warn};

use unipolar_stepper::diagnostics::{permutation_scan, DEFAULT_SCAN_STEPS};
use unipolar_stepper::error::{ConfigError, MotorError};
use unipolar_stepper::gpio::{RppalChip, RppalDelay};
use unipolar_stepper::homing::limit_switch_from_kind;
use unipolar_stepper::playback::{parse_manual, MoveOutcome};
use unipolar_stepper::{
    load_commands, load_config, ChipSession, CommandPlayer, Error, GpioChip, HomingController,
    Result, SequencerBuilder, ShutdownSignal, SystemConfig, WindingSequencer,
};

/// Set by the termination-signal handler, polled by the motor.
static SHUTDOWN: ShutdownSignal = ShutdownSignal::new();

/// How often the manual prompt checks for shutdown while waiting for input.
const INPUT_POLL: Duration = Duration::from_millis(100);

type Motor = WindingSequencer<<RppalChip as GpioChip>::Output, RppalDelay>;

/// Unipolar stepper motor controller
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file
    #[arg(short, long, default_value = "stepper.toml")]
    config: PathBuf,

    /// write log to file instead of stderr
    #[arg(short, long)]
    logfile: Option<PathBuf>,

    /// enable debug messages
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Home, then play a command file (default: `playback.command_file`)
    Run {
        /// `angle,hold` file; the first line is a header
        file: Option<PathBuf>,
    },
    /// Home, then rotate by angles typed at the prompt
    Manual,
    /// Turn the motor in every coil order
    Scan {
        /// Steps to take in each order
        #[arg(long, default_value_t = DEFAULT_SCAN_STEPS)]
        steps: u32,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("cannot create log file: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = ctrlc::set_handler(|| SHUTDOWN.trigger()) {
        error!("cannot install signal handler: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Interrupted) => {
            warn!("interrupted; windings released and gpio closed");
            ExitCode::from(130)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Args) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter(None, log::LevelFilter::Debug);
    } else {
        builder.filter(None, log::LevelFilter::Info);
    }
    if let Some(ref logfile) = args.logfile {
        let target = Box::new(std::fs::File::create(logfile)?);
        builder.target(env_logger::Target::Pipe(target));
    }
    builder.init();
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(&args.config)?;
    info!("loaded {}", args.config.display());

    let chip = RppalChip::open().map_err(|e| {
        error!("cannot open gpio: {}", e);
        Error::Motor(MotorError::ChipUnavailable)
    })?;

    let mut session = ChipSession::open(chip);
    let result = drive(&mut session, &config, &args.command);
    session.close();
    result
}

fn drive(
    session: &mut ChipSession<RppalChip>,
    config: &SystemConfig,
    command: &Command,
) -> Result<()> {
    let builder = SequencerBuilder::new()
        .from_motor_config(&config.motor)
        .delay(RppalDelay::new())
        .shutdown(&SHUTDOWN);
    let builder = session.claim_coils(&config.motor.coil_pins, builder)?;

    if let Command::Scan { steps } = command {
        let motor = builder.build_idle()?;
        println!("coil pins as configured: {:?}", config.motor.coil_pins.as_slice());
        permutation_scan(motor, *steps, |index, pins| {
            println!("order {}: {:?}", index + 1, pins);
        })?;
        return Ok(());
    }

    let mut motor = builder.build()?;
    let result = home(session, config, &mut motor).and_then(|()| match command {
        Command::Run { file } => play_file(&mut motor, config, file.as_deref()),
        _ => manual(&mut motor, config),
    });
    let released = motor.release();
    result.and(released)
}

fn home(
    session: &mut ChipSession<RppalChip>,
    config: &SystemConfig,
    motor: &mut Motor,
) -> Result<()> {
    let homing = &config.homing;
    if !homing.enabled {
        warn!(
            "homing disabled; assuming the motor is at {} deg",
            config.playback.start.0
        );
        return Ok(());
    }

    let pin = session.claim_input(homing.sensor_pin)?;
    let Some(mut switch) = limit_switch_from_kind(homing.sensor, pin) else {
        return Err(ConfigError::message(
            "threshold sensors need an ADC driver; use kind = \"limit_switch\"",
        )
        .into());
    };

    HomingController::from_config(homing)?.calibrate(motor, &mut switch)?;
    Ok(())
}

fn play_file(motor: &mut Motor, config: &SystemConfig, file: Option<&Path>) -> Result<()> {
    let path = file
        .or_else(|| config.command_file().map(Path::new))
        .ok_or_else(|| ConfigError::message("no command file given"))?;

    let commands = load_commands(path)?;
    info!("loaded {} commands from {}", commands.len(), path.display());

    let report = CommandPlayer::from_config(config)?.play(motor, &commands)?;
    println!(
        "Done! {} moved, {} clamped, {} skipped; at {} deg",
        report.executed,
        report.clamped,
        report.rejected,
        report.position.angle().0
    );
    Ok(())
}

fn prompt(player: &CommandPlayer) {
    print!("[{:.2} deg] angle> ", player.position().angle().0);
    let _ = io::stdout().flush();
}

fn manual(motor: &mut Motor, config: &SystemConfig) -> Result<()> {
    let mut player = CommandPlayer::from_config(config)?;

    // stdin blocks; read it elsewhere so this thread keeps polling SHUTDOWN.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("Enter an angle to rotate by (negative turns backward), `q` to quit.");
    prompt(&player);
    loop {
        SHUTDOWN.check()?;
        let line = match rx.recv_timeout(INPUT_POLL) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                info!("end of input");
                return Ok(());
            }
        };

        let input = line.trim();
        if matches!(input, "q" | "quit" | "exit") {
            return Ok(());
        }
        if !input.is_empty() {
            match parse_manual(input) {
                Ok(command) => {
                    if let MoveOutcome::Rejected(e) = player.execute(motor, &command)? {
                        println!("{}", e);
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        prompt(&player);
    }
}

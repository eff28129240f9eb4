use std::path::PathBuf;

use structopt::StructOpt;

use chip8_vm::emulator::timer::SystemClock;
use chip8_vm::emulator::{Driver, DriverConfig, Interpreter};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod crossterm_io;
mod key_manager;
use crossterm_io::{CrosstermInput, CrosstermOutput};

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Instructions executed per second
    #[structopt(short, long, default_value = "1000")]
    rate: u32,

    /// Seed for the random number generator
    #[structopt(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut interpreter = Interpreter::with_parts(rng, SystemClock::new());
    interpreter.load(&program)?;

    let mut driver = Driver::new(
        interpreter,
        CrosstermInput::new(),
        CrosstermOutput::new()?,
        DriverConfig::with_rate(opt.rate),
    );

    // The terminal is restored when the driver is dropped
    if let Err(err) = driver.run() {
        let (interpreter, _, output) = driver.into_parts();
        drop(output);
        log::error!("Halted: {}\n{}", err, interpreter);
        return Err(err.into());
    }

    Ok(())
}

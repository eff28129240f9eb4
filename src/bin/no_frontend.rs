use std::path::PathBuf;

use structopt::StructOpt;

use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::output::DummyOutput;
use chip8_vm::emulator::timer::SystemClock;
use chip8_vm::emulator::{Driver, DriverConfig, Interpreter};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run a program without a screen, then print what it drew.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Number of instructions to execute
    #[structopt(short, long, default_value = "1000")]
    cycles: usize,

    /// Instructions executed per second
    #[structopt(short, long, default_value = "1000")]
    rate: u32,

    /// Seed for the random number generator
    #[structopt(short, long, default_value = "0")]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let mut interpreter = Interpreter::with_parts(StdRng::seed_from_u64(opt.seed), SystemClock::new());
    interpreter.load(&program)?;

    let config = DriverConfig::with_rate(opt.rate);
    let interval = config.cycle_interval;
    let mut driver = Driver::new(interpreter, DummyInput, DummyOutput::new(), config);

    let mut result = Ok(());
    for _ in 0..opt.cycles {
        if let Err(err) = driver.tick() {
            result = Err(err);
            break;
        }
        std::thread::sleep(interval);
    }

    let (interpreter, _, output) = driver.into_parts();
    log::info!("Presented {} frames", output.frames_presented());
    println!("{}", interpreter.display());
    println!("{}", interpreter);

    result.map_err(|err| {
        log::error!("Halted: {}", err);
        err.into()
    })
}

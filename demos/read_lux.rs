// Reads the ambient light intensity once from a VEML7700 on a Linux i2c bus.
//
// Usage: read_lux [/dev/i2c-N]

use std::process::ExitCode;

use embedded_hal::blocking::delay::DelayMs;
use linux_embedded_hal::Delay;
use veml7700::{Configuration, Register, Veml7700};

fn main() -> ExitCode {
    let bus = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("/dev/i2c-1"));

    match run(&bus) {
        Ok(lux) => {
            println!("{:.4}", lux);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("veml7700 on {}: {}", bus, e);
            ExitCode::FAILURE
        }
    }
}

fn run(bus: &str) -> veml7700::Result<f32> {
    let mut delay = Delay;
    let mut sensor = Veml7700::open(bus)?;

    sensor.enable(&mut delay)?;

    // Gain x1 and 100 ms integration time, the setting the lux factor is for
    let word = sensor.apply(Configuration::default())?;
    log::info!("Wrote configuration word 0x{:04X}", word);

    // Wait for the first integration period to complete
    delay.delay_ms(120u32);

    let config = sensor.read_configuration()?;
    log::info!("Configuration: {:?}", config);

    let lux = sensor.read_lux();
    let white = sensor.read_register(Register::WhiteData);
    if let Ok(white) = white {
        log::info!("White channel: {}", white);
    }

    // Shut down even if the reading failed
    let disabled = sensor.disable();
    sensor.close();

    let lux = lux?;
    disabled?;

    Ok(lux)
}

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod hal;
#[cfg(target_arch = "avr")]
mod interrupts;

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use cluster_firmware::application::ClusterIo;
    use cluster_firmware::drivers::{SerialConsole, WaveformGenerator};
    use cluster_firmware::Cluster;

    use hal::board::{CoolantIn, FuelIn, OilLamp, OilSwitch, SpeedoIn, SpeedoOut, TachIn, TachOut};
    use hal::{exint, pwm, Adc, Uart, WaveTimer, WindowTimer};
    use interrupts::{MEASURED, SETPOINTS};

    let mut console = SerialConsole::new(Uart::new());
    let _ = console.banner();

    let _ = SpeedoIn::input_pull_up();
    let _ = TachIn::input_pull_up();
    let _ = CoolantIn::input_floating();
    let _ = FuelIn::input_floating();

    let (fuel_gauge, temp_gauge) = pwm::start();
    let io = ClusterIo {
        oil_switch: OilSwitch::input_pull_up(),
        oil_lamp: OilLamp::output_low(),
        temp_gauge,
        fuel_gauge,
    };
    let cluster = Cluster::new(&MEASURED, &SETPOINTS, io, console);

    interrupts::install_waveform(WaveformGenerator::new(
        TachOut::output_low(),
        SpeedoOut::output_low(),
    ));
    exint::enable_pulse_inputs();
    WaveTimer::start();
    WindowTimer::start();
    Adc::init();

    // SAFETY: every shared static is initialised above
    unsafe { avr_device::interrupt::enable() };
    interrupts::start_sampling();

    cluster.run()
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("cluster-firmware only runs on the ATmega128; use `cargo test` on the host");
}

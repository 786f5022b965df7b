//! Configuration constants for the instrument cluster firmware
//!
//! Everything here is fixed at build time; the firmware has no runtime
//! configuration surface.

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 8_000_000;

/// Debug UART baud rate
pub const UART_BAUD: u32 = 9600;

/// UBRR value for `UART_BAUD` in normal-speed asynchronous mode
pub const UART_UBRR: u16 = (CPU_FREQ_HZ / 16 / UART_BAUD - 1) as u16;

/// Timer0 prescaler divisor for the waveform tick
pub const WAVE_TIMER_PRESCALER: u32 = 64;

/// Timer0 counter value loaded after each overflow (256 - 8 counts)
pub const WAVE_TIMER_RELOAD: u8 = 248;

/// Waveform generator tick rate in Hz
pub const WAVE_TICK_HZ: u32 =
    CPU_FREQ_HZ / WAVE_TIMER_PRESCALER / (256 - WAVE_TIMER_RELOAD as u32);

/// Timer2 prescaler divisor for the measurement time base
pub const WINDOW_TIMER_PRESCALER: u32 = 1024;

/// Measurement time base tick rate in milli-Hz (~30.52 Hz)
pub const WINDOW_TICK_MILLIHZ: u32 =
    (CPU_FREQ_HZ as u64 * 1000 / WINDOW_TIMER_PRESCALER as u64 / 256) as u32;

/// Number of time base ticks per measurement window
pub const WINDOW_DIVIDER: u8 = 4;

/// Length of one measurement window in milliseconds
pub const WINDOW_PERIOD_MS: u32 = WINDOW_DIVIDER as u32 * 1_000_000 / WINDOW_TICK_MILLIHZ;

/// Tick offset of the speedometer window relative to the tach window
pub const SPEEDO_WINDOW_PHASE: u8 = WINDOW_DIVIDER / 2;

/// Crank sensor scale: RPM = pulses * numerator / denominator
pub const TACH_PULSE_SCALE: (u32, u32) = (1000, 18);

/// Wheel sensor scale: speed = pulses * numerator / denominator
pub const SPEEDO_PULSE_SCALE: (u32, u32) = (1, 1);

/// Engine speed above which the oil pressure lamp follows the switch
pub const OIL_GATE_RPM: u16 = 1450;

/// Half-period value that disables a frequency output
pub const OUTPUT_DISABLED: u16 = u16::MAX;

/// Coolant temperature published for a cold or shorted sender
pub const TEMP_FAULT_COLD: u8 = 0;

/// Coolant temperature published for a hot or open sender
pub const TEMP_FAULT_HOT: u8 = u8::MAX;

/// Temperature handed to the gauge when the sender is faulted
pub const TEMP_GAUGE_OFF: u8 = 0;

/// Fuel needle position until the first fuel sample arrives
pub const FUEL_STARTUP_PERCENT: u8 = 50;

/// Firmware version shown in the boot banner
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

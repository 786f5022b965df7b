//! Main loop: turns published measurements into gauge setpoints
//!
//! Runs cooperatively in thread mode. The only blocking point is the
//! telemetry write at the end of each iteration.

use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::serial;
use embedded_hal::PwmPin;

use crate::config::{FUEL_STARTUP_PERCENT, TEMP_GAUGE_OFF};
use crate::drivers::analog_sampler::is_temperature_fault;
use crate::drivers::gauge::{fuel_duty, fuel_percent, speedo_half_period, tach_half_period, temp_duty};
use crate::drivers::{OilPressureGate, SerialConsole};
use crate::error::Error;
use crate::state::{MeasuredState, Measurements, OutputSetpoints};

/// Pins and PWM channels owned by the main loop
pub struct ClusterIo<OIL, LAMP, TEMP, FUEL> {
    pub oil_switch: OIL,
    pub oil_lamp: LAMP,
    pub temp_gauge: TEMP,
    pub fuel_gauge: FUEL,
}

pub struct Cluster<'a, OIL, LAMP, TEMP, FUEL, S> {
    measured: &'a MeasuredState,
    setpoints: &'a OutputSetpoints,
    io: ClusterIo<OIL, LAMP, TEMP, FUEL>,
    console: SerialConsole<S>,
    last_rpm: u16,
    last_speed: u8,
    last_fuel: Option<u8>,
    dropped: u16,
}

impl<'a, OIL, LAMP, TEMP, FUEL, S> Cluster<'a, OIL, LAMP, TEMP, FUEL, S>
where
    OIL: InputPin,
    LAMP: OutputPin,
    TEMP: PwmPin<Duty = u16>,
    FUEL: PwmPin<Duty = u16>,
    S: serial::Write<u8>,
{
    /// Park every gauge: frequency outputs off, fuel at mid scale,
    /// temperature at rest.
    pub fn new(
        measured: &'a MeasuredState,
        setpoints: &'a OutputSetpoints,
        mut io: ClusterIo<OIL, LAMP, TEMP, FUEL>,
        console: SerialConsole<S>,
    ) -> Self {
        setpoints.tach.store(tach_half_period(0));
        setpoints.speedo.store(speedo_half_period(0));

        io.fuel_gauge.set_duty(fuel_duty(FUEL_STARTUP_PERCENT));
        io.temp_gauge.set_duty(temp_duty(TEMP_GAUGE_OFF));
        io.fuel_gauge.enable();
        io.temp_gauge.enable();

        Self {
            measured,
            setpoints,
            io,
            console,
            last_rpm: 0,
            last_speed: 0,
            last_fuel: None,
            dropped: 0,
        }
    }

    /// One loop iteration. Returns the values reported on the telemetry line.
    pub fn step(&mut self) -> Result<Measurements, Error<S::Error>> {
        let mut now = self.measured.snapshot();
        now.oil_switch = self.io.oil_switch.is_high().map_err(|_| Error::Pin)?;

        if now.rpm != self.last_rpm {
            self.last_rpm = now.rpm;
            let half_period = tach_half_period(now.rpm);
            self.setpoints.tach.store(half_period);
            #[cfg(feature = "debug")]
            self.console.debug("tach", half_period)?;
        }

        if now.speed != self.last_speed {
            self.last_speed = now.speed;
            let half_period = speedo_half_period(now.speed);
            self.setpoints.speedo.store(half_period);
            #[cfg(feature = "debug")]
            self.console.debug("speedo", half_period)?;
        }

        if self.last_fuel != Some(now.fuel_raw) {
            self.last_fuel = Some(now.fuel_raw);
            let duty = fuel_duty(fuel_percent(now.fuel_raw));
            self.io.fuel_gauge.set_duty(duty);
            #[cfg(feature = "debug")]
            self.console.debug("fuel", duty)?;
        }

        let lamp = OilPressureGate::for_rpm(now.rpm).lamp(now.oil_switch);
        if lamp {
            self.io.oil_lamp.set_high().map_err(|_| Error::Pin)?;
        } else {
            self.io.oil_lamp.set_low().map_err(|_| Error::Pin)?;
        }

        let degrees = if is_temperature_fault(now.temperature) {
            TEMP_GAUGE_OFF
        } else {
            now.temperature
        };
        self.io.temp_gauge.set_duty(temp_duty(degrees));

        self.console.telemetry(&now)?;
        Ok(now)
    }

    /// Run one iteration, counting it if it failed. Outputs not reached
    /// before the failure keep their previous drive until the next pass.
    pub fn poll(&mut self) {
        if self.step().is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Iterations abandoned on a pin or serial error since start-up
    pub fn dropped_iterations(&self) -> u16 {
        self.dropped
    }

    pub fn run(mut self) -> ! {
        loop {
            self.poll();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OUTPUT_DISABLED;
    use core::cell::Cell;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction as PinTransaction};
    use embedded_hal_mock::serial::{Mock as SerialMock, Transaction as SerialTransaction};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingPwm {
        duty: Rc<Cell<u16>>,
        enabled: Rc<Cell<bool>>,
    }

    impl PwmPin for RecordingPwm {
        type Duty = u16;

        fn disable(&mut self) {
            self.enabled.set(false);
        }

        fn enable(&mut self) {
            self.enabled.set(true);
        }

        fn get_duty(&self) -> u16 {
            self.duty.get()
        }

        fn get_max_duty(&self) -> u16 {
            0x3FF
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty.set(duty);
        }
    }

    struct DisconnectedSwitch;

    impl InputPin for DisconnectedSwitch {
        type Error = ();

        fn is_high(&self) -> Result<bool, ()> {
            Err(())
        }

        fn is_low(&self) -> Result<bool, ()> {
            Err(())
        }
    }

    #[test]
    fn new_parks_gauges() {
        let measured = MeasuredState::new();
        let setpoints = OutputSetpoints::new();
        setpoints.tach.store(100);
        let temp = RecordingPwm::default();
        let fuel = RecordingPwm::default();

        let io = ClusterIo {
            oil_switch: PinMock::new(&[]),
            oil_lamp: PinMock::new(&[]),
            temp_gauge: temp.clone(),
            fuel_gauge: fuel.clone(),
        };
        let _cluster = Cluster::new(&measured, &setpoints, io, SerialConsole::new(SerialMock::<u8>::new(&[])));

        assert_eq!(setpoints.tach.load(), OUTPUT_DISABLED);
        assert_eq!(setpoints.speedo.load(), OUTPUT_DISABLED);
        assert_eq!(fuel.duty.get(), 0xFE);
        assert_eq!(temp.duty.get(), 0x20);
        assert!(fuel.enabled.get() && temp.enabled.get());
    }

    #[test]
    fn running_engine_updates_all_outputs() {
        let measured = MeasuredState::new();
        let setpoints = OutputSetpoints::new();
        measured.rpm.store(3000);
        measured.speed.store(100);
        measured.temperature.store(90);
        measured.fuel_raw.store(255);

        let mut oil_switch = PinMock::new(&[PinTransaction::get(State::High)]);
        let mut oil_lamp = PinMock::new(&[PinTransaction::set(State::High)]);
        let mut serial = SerialMock::new(&[SerialTransaction::write_many(
            b"rpm=3000,speed=100,temp=90,fuel=255,oil=1\r\n",
        )]);
        let temp = RecordingPwm::default();
        let fuel = RecordingPwm::default();

        let io = ClusterIo {
            oil_switch: oil_switch.clone(),
            oil_lamp: oil_lamp.clone(),
            temp_gauge: temp.clone(),
            fuel_gauge: fuel.clone(),
        };
        let mut cluster = Cluster::new(&measured, &setpoints, io, SerialConsole::new(serial.clone()));
        let reported = cluster.step().unwrap();

        assert!(reported.oil_switch);
        assert_eq!(setpoints.tach.load(), 80);
        assert_eq!(setpoints.speedo.load(), 72);
        assert_eq!(fuel.duty.get(), 0xB0);
        assert_eq!(temp.duty.get(), 0x80);

        oil_switch.done();
        oil_lamp.done();
        serial.done();
    }

    #[test]
    fn setpoints_only_change_with_measurement() {
        let measured = MeasuredState::new();
        let setpoints = OutputSetpoints::new();
        measured.rpm.store(1000);

        let mut oil_switch = PinMock::new(&[
            PinTransaction::get(State::Low),
            PinTransaction::get(State::Low),
        ]);
        let mut oil_lamp = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::Low),
        ]);
        let mut serial = SerialMock::new(&[
            SerialTransaction::write_many(b"rpm=1000,speed=0,temp=0,fuel=0,oil=0\r\n"),
            SerialTransaction::write_many(b"rpm=1000,speed=0,temp=0,fuel=0,oil=0\r\n"),
        ]);

        let io = ClusterIo {
            oil_switch: oil_switch.clone(),
            oil_lamp: oil_lamp.clone(),
            temp_gauge: RecordingPwm::default(),
            fuel_gauge: RecordingPwm::default(),
        };
        let mut cluster = Cluster::new(&measured, &setpoints, io, SerialConsole::new(serial.clone()));

        cluster.step().unwrap();
        assert_eq!(setpoints.tach.load(), 240);

        // A foreign write is left alone while the RPM reading is unchanged
        setpoints.tach.store(7);
        cluster.step().unwrap();
        assert_eq!(setpoints.tach.load(), 7);

        oil_switch.done();
        oil_lamp.done();
        serial.done();
    }

    #[test]
    fn low_rpm_suppresses_lamp_and_faulted_sender_rests_gauge() {
        let measured = MeasuredState::new();
        let setpoints = OutputSetpoints::new();
        measured.rpm.store(1450);
        measured.temperature.store(u8::MAX);

        let mut oil_switch = PinMock::new(&[PinTransaction::get(State::High)]);
        let mut oil_lamp = PinMock::new(&[PinTransaction::set(State::Low)]);
        let mut serial = SerialMock::new(&[SerialTransaction::write_many(
            b"rpm=1450,speed=0,temp=255,fuel=0,oil=1\r\n",
        )]);
        let temp = RecordingPwm::default();

        let io = ClusterIo {
            oil_switch: oil_switch.clone(),
            oil_lamp: oil_lamp.clone(),
            temp_gauge: temp.clone(),
            fuel_gauge: RecordingPwm::default(),
        };
        let mut cluster = Cluster::new(&measured, &setpoints, io, SerialConsole::new(serial.clone()));
        cluster.step().unwrap();

        assert_eq!(temp.duty.get(), 0x20);
        oil_switch.done();
        oil_lamp.done();
        serial.done();
    }

    #[test]
    fn failed_iterations_are_counted_and_skip_telemetry() {
        let measured = MeasuredState::new();
        let setpoints = OutputSetpoints::new();
        measured.rpm.store(2000);

        let mut serial = SerialMock::<u8>::new(&[]);
        let io = ClusterIo {
            oil_switch: DisconnectedSwitch,
            oil_lamp: PinMock::new(&[]),
            temp_gauge: RecordingPwm::default(),
            fuel_gauge: RecordingPwm::default(),
        };
        let mut cluster = Cluster::new(&measured, &setpoints, io, SerialConsole::new(serial.clone()));

        assert!(matches!(cluster.step(), Err(Error::Pin)));
        assert_eq!(cluster.dropped_iterations(), 0);

        cluster.poll();
        cluster.poll();
        assert_eq!(cluster.dropped_iterations(), 2);
        // The switch is read before any output is touched
        assert_eq!(setpoints.tach.load(), OUTPUT_DISABLED);

        serial.done();
    }
}

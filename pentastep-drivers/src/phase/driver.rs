//! Phase output driver
//!
//! One drive iteration programs the PWM compare level of every phase,
//! pushes the matching port bits to the expander, advances the sequencer
//! and toggles the heartbeat LED. The caller then waits `hold_ms` before
//! the next iteration.

use embedded_hal::digital::StatefulOutputPin;
use embedded_hal::spi::SpiDevice;
use pentastep_core::config::BoardPins;
use pentastep_core::control::SharedControl;
use pentastep_core::motion::{phase_levels, Sequencer, StepIndex};
use pentastep_core::pattern::{PhaseRow, PHASE_COUNT};
use pentastep_hal::{PwmSlices, PwmSlot};

use crate::expander::{ExpanderError, Mcp23s17, PortBytes, Readback};

/// Outcome of one drive iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport<E> {
    /// Row that was driven
    pub index: StepIndex,
    /// Duty applied to the energized phases
    pub duty: u16,
    /// Port push result; a bus error does not stop the drive
    pub ports: Result<Readback, ExpanderError<E>>,
    /// Row that will be driven next
    pub next: StepIndex,
    /// Time to hold this step (ms)
    pub hold_ms: u16,
}

/// PWM, expander and heartbeat outputs for the five phases
pub struct PhaseDriver<PWM, SPI, LED> {
    pwm: PWM,
    expander: Mcp23s17<SPI>,
    heartbeat: LED,
    slots: [PwmSlot; PHASE_COUNT],
    lines: [u8; PHASE_COUNT],
}

impl<PWM, SPI, LED> PhaseDriver<PWM, SPI, LED>
where
    PWM: PwmSlices,
    SPI: SpiDevice,
    LED: StatefulOutputPin,
{
    /// Create a driver for the phase wiring in `pins`
    ///
    /// The expander must already be reset and configured for output.
    pub fn new(pwm: PWM, expander: Mcp23s17<SPI>, heartbeat: LED, pins: &BoardPins) -> Self {
        Self {
            pwm,
            expander,
            heartbeat,
            slots: pins.phase_slots(),
            lines: pins.phases,
        }
    }

    /// Drive one pattern row at the given duty
    pub fn apply(&mut self, row: &PhaseRow, duty: u16) -> Result<Readback, ExpanderError<SPI::Error>> {
        for (slot, level) in self.slots.iter().zip(phase_levels(row, duty)) {
            self.pwm.set_level(*slot, level);
        }
        self.expander.push(PortBytes::from_row(row, &self.lines))
    }

    /// Run one drive iteration
    ///
    /// Duty, direction and period are each loaded once, at the point they
    /// are needed, so a button tick landing mid-step takes effect on the
    /// next field read.
    pub fn run_step(&mut self, sequencer: &mut Sequencer, control: &SharedControl) -> StepReport<SPI::Error> {
        let index = sequencer.index();
        let duty = control.duty();
        let ports = self.apply(sequencer.pattern(), duty);

        let next = sequencer.advance(control.direction());
        let _ = self.heartbeat.toggle();

        StepReport {
            index,
            duty,
            ports,
            next,
            hold_ms: control.period_ms(),
        }
    }

    /// Set every phase level to zero and clear both ports
    pub fn release_all(&mut self) -> Result<Readback, ExpanderError<SPI::Error>> {
        for slot in self.slots {
            self.pwm.set_level(slot, 0);
        }
        self.expander.push(PortBytes::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::mcp23s17::mock::{FakeExpander, RecordingPin};
    use pentastep_core::config::DriveConfig;
    use pentastep_core::control::DirectionMode;
    use pentastep_core::pattern::pattern_for;
    use pentastep_hal::Channel;

    #[derive(Default)]
    struct FakePwm {
        writes: Vec<(PwmSlot, u16)>,
    }

    impl PwmSlices for FakePwm {
        fn set_level(&mut self, slot: PwmSlot, level: u16) {
            self.writes.push((slot, level));
        }
    }

    type TestDriver = PhaseDriver<FakePwm, FakeExpander, RecordingPin>;

    fn driver() -> TestDriver {
        PhaseDriver::new(
            FakePwm::default(),
            Mcp23s17::new(FakeExpander::default()),
            RecordingPin::default(),
            &BoardPins::PICO,
        )
    }

    #[test]
    fn test_step_programs_all_phases() {
        let mut drive = driver();
        let mut seq = Sequencer::new();
        let control = SharedControl::new(&DriveConfig::DEFAULT);

        let report = drive.run_step(&mut seq, &control);

        let row = pattern_for(StepIndex::ZERO);
        let expected = phase_levels(row, 2047);
        assert_eq!(drive.pwm.writes.len(), PHASE_COUNT);
        for ((slot, level), want) in drive.pwm.writes.iter().zip(expected) {
            assert_eq!(*level, want);
            assert!(slot.slice >= 2 && slot.slice <= 4);
        }
        // GPIO5 -> slice 2 channel B
        assert_eq!(drive.pwm.writes[0].0, PwmSlot { slice: 2, channel: Channel::B });

        assert_eq!(report.index, StepIndex::ZERO);
        assert_eq!(report.next.value(), 1);
        assert_eq!(report.duty, 2047);
        assert_eq!(report.hold_ms, 250);

        let readback = report.ports.unwrap();
        assert!(readback.is_verified());
        assert_eq!(readback.written, PortBytes::from_row(row, &BoardPins::PICO.phases));
    }

    #[test]
    fn test_heartbeat_toggles_each_step() {
        let mut drive = driver();
        let mut seq = Sequencer::new();
        let control = SharedControl::new(&DriveConfig::DEFAULT);

        for _ in 0..4 {
            drive.run_step(&mut seq, &control);
        }
        assert_eq!(drive.heartbeat.levels, vec![true, false, true, false]);
    }

    #[test]
    fn test_follows_live_parameters() {
        let mut drive = driver();
        let mut seq = Sequencer::new();
        let control = SharedControl::new(&DriveConfig::DEFAULT);

        control.set_direction(DirectionMode::Reverse);
        control.set_duty(800);
        control.set_period_ms(40);

        let report = drive.run_step(&mut seq, &control);
        assert_eq!(report.next.value(), 19);
        assert_eq!(report.duty, 800);
        assert_eq!(report.hold_ms, 40);

        control.set_direction(DirectionMode::Stopped);
        let report = drive.run_step(&mut seq, &control);
        assert_eq!(report.index.value(), 19);
        assert_eq!(report.next.value(), 19);
    }

    #[test]
    fn test_bus_error_keeps_stepping() {
        let mut drive = driver();
        let mut seq = Sequencer::new();
        let control = SharedControl::new(&DriveConfig::DEFAULT);
        drive.expander = Mcp23s17::new(FakeExpander {
            fail: true,
            ..Default::default()
        });

        let report = drive.run_step(&mut seq, &control);
        assert!(report.ports.is_err());
        assert_eq!(report.next.value(), 1);
        assert_eq!(drive.pwm.writes.len(), PHASE_COUNT);
    }

    struct BrokenLed;

    impl embedded_hal::digital::ErrorType for BrokenLed {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl embedded_hal::digital::OutputPin for BrokenLed {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    impl StatefulOutputPin for BrokenLed {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    #[test]
    fn test_heartbeat_failure_keeps_stepping() {
        let mut drive = PhaseDriver::new(
            FakePwm::default(),
            Mcp23s17::new(FakeExpander::default()),
            BrokenLed,
            &BoardPins::PICO,
        );
        let mut seq = Sequencer::new();
        let control = SharedControl::new(&DriveConfig::DEFAULT);

        let report = drive.run_step(&mut seq, &control);
        assert!(report.ports.unwrap().is_verified());
        assert_eq!(report.next.value(), 1);
        assert_eq!(seq.index().value(), 1);
    }

    #[test]
    fn test_release_all() {
        let mut drive = driver();
        let readback = drive.release_all().unwrap();

        assert_eq!(readback.written, PortBytes::default());
        assert!(drive.pwm.writes.iter().all(|(_, level)| *level == 0));
    }
}

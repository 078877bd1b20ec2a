//! Shared test fixtures: recording coil pins, a time-accumulating delay and
//! a counting GPIO chip.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use unipolar_stepper::{DriveMode, GpioChip, SequencerBuilder, WindingSequencer};

#[derive(Default)]
struct BenchState {
    writes: Vec<(u8, bool)>,
    high: BTreeSet<u8>,
    broken: Option<u8>,
}

/// Shared record of every level written to any pin handed out by it.
#[derive(Clone, Default)]
pub struct Bench {
    state: Rc<RefCell<BenchState>>,
}

impl Bench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, number: u8) -> RecordingPin {
        RecordingPin {
            number,
            bench: self.clone(),
        }
    }

    /// Every write so far as `(pin, high)`.
    pub fn writes(&self) -> Vec<(u8, bool)> {
        self.state.borrow().writes.clone()
    }

    /// Pins currently driven high, ascending.
    pub fn energized(&self) -> Vec<u8> {
        self.state.borrow().high.iter().copied().collect()
    }

    pub fn clear_writes(&self) {
        self.state.borrow_mut().writes.clear();
    }

    /// Make every later write to `pin` fail.
    pub fn break_pin(&self, pin: u8) {
        self.state.borrow_mut().broken = Some(pin);
    }

    /// Idle sequencer over pins `0..coils` with no step delay.
    pub fn sequencer(&self, coils: u8, mode: DriveMode) -> WindingSequencer<RecordingPin, TimedDelay> {
        self.builder(coils)
            .drive_mode(mode)
            .build_idle()
            .unwrap()
    }

    /// Builder with pins `0..coils` attached and no step delay.
    pub fn builder(&self, coils: u8) -> SequencerBuilder<RecordingPin, TimedDelay> {
        let mut builder = SequencerBuilder::new()
            .name("bench")
            .step_delay_ms(0)
            .delay(TimedDelay::new());
        for number in 0..coils {
            builder = builder.coil(number, self.pin(number));
        }
        builder
    }
}

/// Coil pin that logs its writes to a [`Bench`].
pub struct RecordingPin {
    number: u8,
    bench: Bench,
}

impl ErrorType for RecordingPin {
    type Error = ErrorKind;
}

impl RecordingPin {
    fn write(&mut self, high: bool) -> Result<(), ErrorKind> {
        let mut state = self.bench.state.borrow_mut();
        if state.broken == Some(self.number) {
            return Err(ErrorKind::Other);
        }
        state.writes.push((self.number, high));
        if high {
            state.high.insert(self.number);
        } else {
            state.high.remove(&self.number);
        }
        Ok(())
    }
}

impl OutputPin for RecordingPin {
    fn set_high(&mut self) -> Result<(), ErrorKind> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), ErrorKind> {
        self.write(false)
    }
}

/// Delay that only adds up the time it was asked to wait.
#[derive(Clone, Default)]
pub struct TimedDelay {
    elapsed_ns: Rc<Cell<u64>>,
}

impl TimedDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns.get() / 1_000_000
    }
}

impl DelayNs for TimedDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns.set(self.elapsed_ns.get() + u64::from(ns));
    }
}

/// Input pin reporting high from the `after`-th read on.
pub struct CountdownSwitch {
    reads: Rc<Cell<u32>>,
    after: u32,
}

impl CountdownSwitch {
    pub fn new(after: u32) -> Self {
        Self {
            reads: Rc::new(Cell::new(0)),
            after,
        }
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl ErrorType for CountdownSwitch {
    type Error = ErrorKind;
}

impl InputPin for CountdownSwitch {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        let n = self.reads.get();
        self.reads.set(n + 1);
        Ok(n >= self.after)
    }

    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        self.is_high().map(|high| !high)
    }
}

/// GPIO chip that hands out bench pins and counts how often it is closed.
pub struct CountingChip {
    pub bench: Bench,
    pub closes: Rc<Cell<u32>>,
    pub switch_after: u32,
}

impl CountingChip {
    pub fn new(switch_after: u32) -> Self {
        Self {
            bench: Bench::new(),
            closes: Rc::new(Cell::new(0)),
            switch_after,
        }
    }
}

impl GpioChip for CountingChip {
    type Output = RecordingPin;
    type Input = CountdownSwitch;
    type Error = ErrorKind;

    fn claim_output(&mut self, pin: u8) -> Result<RecordingPin, ErrorKind> {
        Ok(self.bench.pin(pin))
    }

    fn claim_input(&mut self, _pin: u8) -> Result<CountdownSwitch, ErrorKind> {
        Ok(CountdownSwitch::new(self.switch_after))
    }

    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}

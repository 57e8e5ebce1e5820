//! Shared rig for end-to-end adapter tests.

#![allow(dead_code)]

use joybridge::prelude::*;
use joybridge_test_helpers::init_test_tracing;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub type SimAdapter = Adapter<SimulatedIo, MemoryStore, ManualClock>;

/// Store image with valid values: port 0, nothing toggled, 50 ms rate.
pub const CLEAN_STORE: [u8; 6] = [0, 0, 0, 0, 50, 0];

/// Build an adapter over simulated hardware with a controller attached.
pub fn adapter_with_store(store: MemoryStore) -> TestResult<SimAdapter> {
    init_test_tracing();
    let config = AdapterConfig::default();
    let mut adapter = Adapter::new(SimulatedIo::new(), store, ManualClock::new(), config)?;
    let pins = config.protocol.pins;
    adapter
        .io_mut()
        .attach_controller(pins.latch, pins.clock, pins.data);
    adapter.store_mut().clear_write_log();
    Ok(adapter)
}

pub fn adapter() -> TestResult<SimAdapter> {
    adapter_with_store(MemoryStore::from_bytes(&CLEAN_STORE))
}

/// Present `bits` on the controller and run one cycle, `step_ms` after the
/// previous one.
pub fn cycle(adapter: &mut SimAdapter, bits: Vec<bool>, step_ms: u64) -> CycleReport {
    adapter.clock_mut().advance(step_ms);
    adapter.io_mut().set_controller_bits(bits);
    adapter.run_cycle()
}

/// Pin of `line` on `port` under the default wiring.
pub fn pin(adapter: &SimAdapter, port: JoyPort, line: JoyLine) -> PinId {
    adapter.driver().config().pins(port).pin(line)
}

/// Asserted lines of `port`, in [`JoyLine::ALL`] order.
pub fn asserted_lines(adapter: &SimAdapter, port: JoyPort) -> Vec<JoyLine> {
    JoyLine::ALL
        .into_iter()
        .filter(|&line| adapter.io().is_pulled_low(pin(adapter, port, line)))
        .collect()
}

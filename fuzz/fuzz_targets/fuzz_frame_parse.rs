#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a stream frame: the monitor must drop garbage
    // without panicking or corrupting state
    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = ampora::session::parse_frame(raw);

        let mut monitor = ampora::session::SessionMonitor::new();
        monitor.on_connected();
        monitor.apply_frame(raw);
    }
});

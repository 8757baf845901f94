#![no_main]
use libfuzzer_sys::fuzz_target;

use fmrt_abi::ffi_types::BridgeOutput;

fuzz_target!(|data: &[u8]| {
    // Parse data as a sequence of raw (type, dt-bits, stimulus-bits) event
    // records. This exercises the bridge's own pointer/byte-range checks,
    // not the engine's parsing (it has none) — the only property under
    // test is "never panics, always returns one of the documented codes".
    const RECORD_LEN: usize = 1 + 8 + 8 * 4;
    for chunk in data.chunks(RECORD_LEN) {
        if chunk.len() < RECORD_LEN {
            break;
        }

        let event_type = chunk[0];
        let dt = f64::from_le_bytes(chunk[1..9].try_into().unwrap());
        let mut stimulus = [0.0f64; 4];
        for i in 0..4 {
            let start = 9 + i * 8;
            stimulus[i] = f64::from_le_bytes(chunk[start..start + 8].try_into().unwrap());
        }

        let input = fmrt_abi::ffi_types::BridgeEvent { event_type, dt, stimulus };
        let mut output = BridgeOutput::zeroed();
        let rc = unsafe { fmrt_abi::fmrt_step(&input, &mut output) };
        assert!((-3..=0).contains(&rc), "fmrt_step returned undocumented code {rc}");
    }

    unsafe { fmrt_abi::fmrt_reset() };
});

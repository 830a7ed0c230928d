#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic
    let _ = zenbmp::probe_bmp(data);

    if let Ok(bitmap) = zenbmp::decode_bmp(data) {
        assert_eq!(
            bitmap.pixels().len(),
            bitmap.width as usize * bitmap.height as usize
        );
    }
});

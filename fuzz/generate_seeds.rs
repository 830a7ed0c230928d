#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(bmp: &mut [u8], info_size: u32, width: i32, height: i32, bpp: u16, compression: u32) {
    let len = bmp.len() as u32;
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&len.to_le_bytes()); // file size
    bmp[14..18].copy_from_slice(&info_size.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[30..34].copy_from_slice(&compression.to_le_bytes());
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    header(&mut bmp, 40, 1, 1, 24, 0);
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[54] = 0xff; // BGR
    fs::write(format!("{dir}/bmp_1x1_24.bmp"), bmp).unwrap();

    // 8x1 1-bit, two palette entries, top-down
    let mut bmp = vec![0u8; 66];
    header(&mut bmp, 40, 8, -1, 1, 0);
    bmp[10..14].copy_from_slice(&62u32.to_le_bytes());
    bmp[46..50].copy_from_slice(&2u32.to_le_bytes()); // palette colors
    bmp[58..62].copy_from_slice(&[0xff, 0xff, 0xff, 0xff]);
    bmp[62] = 0b1010_0101;
    fs::write(format!("{dir}/bmp_8x1_1.bmp"), bmp).unwrap();

    // 1x1 16-bit BI_BITFIELDS, 5-6-5 masks after a 40-byte header
    let mut bmp = vec![0u8; 70];
    header(&mut bmp, 40, 1, 1, 16, 3);
    bmp[10..14].copy_from_slice(&66u32.to_le_bytes());
    bmp[54..58].copy_from_slice(&0xf800u32.to_le_bytes());
    bmp[58..62].copy_from_slice(&0x07e0u32.to_le_bytes());
    bmp[62..66].copy_from_slice(&0x001fu32.to_le_bytes());
    bmp[66..68].copy_from_slice(&0xffffu16.to_le_bytes());
    fs::write(format!("{dir}/bmp_1x1_565.bmp"), bmp).unwrap();

    // 1x1 32-bit V4 header, sRGB
    let mut bmp = vec![0u8; 14 + 108 + 4];
    header(&mut bmp, 108, 1, 1, 32, 0);
    bmp[10..14].copy_from_slice(&122u32.to_le_bytes());
    bmp[70..74].copy_from_slice(&0x7352_4742u32.to_le_bytes()); // LCS_sRGB
    bmp[122..126].copy_from_slice(&[1, 2, 3, 4]);
    fs::write(format!("{dir}/bmp_1x1_v4.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}

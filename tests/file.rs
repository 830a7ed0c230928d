#![cfg(feature = "std")]

mod common;

use std::path::Path;

use common::BmpBuilder;
use mktemp::Temp;
use zenbmp::*;

#[test]
fn file_decode_matches_bytes() -> Result<(), Box<dyn std::error::Error>> {
    let data = BmpBuilder::new(2, -2, 32)
        .row(&[1, 2, 3, 4, 5, 6, 7, 8])
        .row(&[9, 10, 11, 12, 13, 14, 15, 16])
        .build();
    let tmp = Temp::new_file()?;
    std::fs::write(&tmp, &data)?;

    let from_file = decode_bmp_file(&tmp)?;
    let from_bytes = decode_bmp(&data)?;
    assert_eq!(from_file, from_bytes);
    assert_eq!(from_file.pixel(0, 1), Some(RGBA8::new(3, 2, 1, 4)));
    Ok(())
}

#[test]
fn missing_file_is_file_access_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = Temp::new_dir()?;
    let path = AsRef::<Path>::as_ref(&dir).join("missing.bmp");
    match decode_bmp_file(&path) {
        Err(BmpError::FileAccess(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected FileAccess, got {other:?}"),
    }
    Ok(())
}

#[test]
fn corrupt_file_on_disk() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = Temp::new_file()?;
    std::fs::write(&tmp, b"P6\n1 1\n255\n\0\0\0")?;
    assert!(matches!(
        decode_bmp_file(&tmp),
        Err(BmpError::CorruptFile)
    ));
    Ok(())
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use wirebuf::Buffer;

fuzz_target!(|data: Vec<u8>| {
    if data.len() < 9 {
        return;
    }
    let value = u64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ]);
    let offset = (data[8] % 24) as usize;
    let mut buf = Buffer::alloc(32).unwrap();

    // Verify: 64-bit round trips at any in-range offset
    buf.write_u64_be(value, offset).unwrap();
    assert_eq!(buf.read_u64_be(offset).unwrap(), value);
    buf.write_u64_le(value, offset).unwrap();
    assert_eq!(buf.read_u64_le(offset).unwrap(), value);

    let signed = value as i64;
    buf.write_i64_le(signed, offset).unwrap();
    assert_eq!(buf.read_i64_le(offset).unwrap(), signed);

    // Verify: generic dispatch agrees with the fixed-width readers
    let narrow = value as u32;
    buf.write_u32_be(narrow, offset).unwrap();
    assert_eq!(buf.read_u32_be(offset).unwrap(), narrow);
    assert_eq!(buf.read_uint_be(offset, 4).unwrap(), u64::from(narrow));

    // Verify: every variable width round trips once masked to range
    for width in 1..=6usize {
        let masked = value & ((1u64 << (8 * width)) - 1);
        assert_eq!(
            buf.write_uint_be(masked, offset, width).unwrap(),
            offset + width
        );
        assert_eq!(buf.read_uint_be(offset, width).unwrap(), masked);

        buf.write_uint_le(masked, offset, width).unwrap();
        assert_eq!(buf.read_uint_le(offset, width).unwrap(), masked);
    }

    // Verify: float bits survive the store, NaN payloads included
    let float = f64::from_bits(value);
    buf.write_f64_be(float, offset).unwrap();
    assert_eq!(buf.read_f64_be(offset).unwrap().to_bits(), value);

    // Verify: short buffers reject instead of writing out of bounds
    let mut tiny = Buffer::alloc(2).unwrap();
    assert!(tiny.write_u32_be(narrow, 0).is_err());
    assert!(tiny.read_u64_le(0).is_err());
    assert_eq!(tiny.to_vec(), vec![0, 0]);
});

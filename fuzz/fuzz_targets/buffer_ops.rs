#![no_main]

use libfuzzer_sys::fuzz_target;
use wirebuf::{Buffer, Encoding, compare, concat};

fuzz_target!(|data: Vec<u8>| {
    let buf = Buffer::from_slice(&data);
    assert_eq!(buf.len(), data.len());
    assert_eq!(buf.to_vec(), data);

    // Verify: binary-safe text encodings reproduce the bytes
    for encoding in [
        Encoding::Hex,
        Encoding::Base64,
        Encoding::Base64Url,
        Encoding::Latin1,
    ] {
        let text = buf.to_text(encoding);
        let back = Buffer::from_string(&text, encoding).unwrap();
        assert_eq!(back.to_vec(), data);
    }

    // Verify: concat reassembles the halves
    let split = data.len() / 2;
    let halves = [
        Buffer::from_slice(&data[..split]),
        Buffer::from_slice(&data[split..]),
    ];
    let joined = concat(&halves, None).unwrap();
    assert_eq!(joined.to_vec(), data);
    assert_eq!(compare(&joined, &buf), std::cmp::Ordering::Equal);

    // Verify: views write through to the parent
    if !data.is_empty() {
        let parent = Buffer::from_slice(&data);
        let mut view = parent.subarray(split..);
        assert_eq!(view.len(), data.len() - split);
        view.set(0, 0xAB);
        assert_eq!(parent.get(split), Some(0xAB));
    }

    // Verify: fill covers every byte
    let mut scratch = Buffer::from_slice(&data);
    scratch.fill(0x5Au8).unwrap();
    assert!(scratch.iter().all(|b| b == 0x5A));

    // Verify: swapping twice restores the original
    if data.len() % 2 == 0 {
        let mut swapped = Buffer::from_slice(&data);
        swapped.swap16().unwrap();
        swapped.swap16().unwrap();
        assert_eq!(swapped.to_vec(), data);
    }

    // Verify: search finds bytes that are known to be present
    if !data.is_empty() {
        assert_eq!(buf.index_of(data[0], 0), Some(0));
        assert!(buf.last_index_of(data[data.len() - 1], data.len()).is_some());
    }
});

#![no_main]

use bytepump::{ConsumableBuffer, ExpandingBuffer};
use libfuzzer_sys::fuzz_target;

// The first half of the input is the buffer, the rest is an op script.
fuzz_target!(|data: Vec<u8>| {
    let (content, script) = data.split_at(data.len() / 2);
    let mut cursor = ConsumableBuffer::new(content.to_vec());
    let mut model = 0usize;
    let mut echo = ExpandingBuffer::new();
    let mut expected = Vec::new();

    for op in script.chunks(2) {
        let n = op.get(1).copied().unwrap_or(0) as usize;
        match op[0] % 4 {
            0 => match cursor.read(n as u64) {
                Ok(bytes) => {
                    assert_eq!(&bytes[..], &content[model..model + n]);
                    expected.extend_from_slice(&bytes);
                    echo.write(bytes);
                    model += n;
                }
                Err(e) => {
                    assert!(e.is_out_of_range());
                    assert!(model + n > content.len());
                }
            },
            1 => {
                let ok = cursor.seek(n as u64).is_ok();
                assert_eq!(ok, model + n <= content.len());
                if ok {
                    model += n;
                }
            }
            2 => {
                let ok = cursor.aseek(n as u64).is_ok();
                assert_eq!(ok, n <= content.len());
                model = if ok { n } else { 0 };
            }
            _ => {
                cursor.reset();
                model = 0;
            }
        }
        assert_eq!(cursor.position(), model as u64);
        assert_eq!(cursor.remaining(), (content.len() - model) as u64);
    }

    assert_eq!(echo.as_bytes(), &expected[..]);
});

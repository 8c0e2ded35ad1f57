#![no_main]

use bytepump::ReadStream;
use futures::{StreamExt, executor::block_on};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u8>, u8, Option<u16>)| {
    let (data, step, limit) = input;
    let chunk_size = step as usize + 1;
    let limit = limit.map(u64::from);

    let reader: &[u8] = &data;
    let mut stream = ReadStream::new(reader, chunk_size, limit);
    let mut out = Vec::new();
    block_on(async {
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= chunk_size);
            out.extend_from_slice(&chunk);
        }
    });

    let expected = match limit {
        Some(l) => data.len().min(l as usize),
        None => data.len(),
    };
    assert_eq!(out, &data[..expected]);
    assert_eq!(stream.consumed(), expected as u64);
});

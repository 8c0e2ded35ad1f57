// Integration tests for the read cursors
// Tests cover: read/seek/aseek semantics, rewind, bounds, buffer/file parity

use bytepump::{Consumable, ConsumableBuffer, ConsumableFile, ResourceError};
use proptest::prelude::*;

fn fixture(content: &[u8]) -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), content).unwrap();
    file
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_index_scenario() {
    let mut buf = ConsumableBuffer::new(&b"INDEX"[..]);
    assert_eq!(&buf.read(1).unwrap()[..], b"I");
    assert_eq!(buf.position(), 1);

    // Only four bytes remain, so the seek itself is out of range.
    assert!(buf.seek(5).unwrap_err().is_out_of_range());
    assert!(buf.read(1).is_ok());

    buf.reset();
    buf.seek(5).unwrap();
    let err = buf.read(1).unwrap_err();
    assert!(matches!(err, ResourceError::OutOfRange { .. }));
}

#[tokio::test]
async fn test_file_index_scenario() {
    let tmp = fixture(b"INDEX");
    let mut file = ConsumableFile::new(tmp.path());
    file.open().await.unwrap();

    assert_eq!(&file.read(1).await.unwrap()[..], b"I");
    assert_eq!(file.position(), 1);

    // The file variant only checks the target on the next read.
    file.seek(5).await.unwrap();
    assert_eq!(file.position(), 6);
    assert!(file.read(1).await.unwrap_err().is_out_of_range());

    file.reset();
    file.seek(5).await.unwrap();
    assert!(file.read(1).await.unwrap_err().is_out_of_range());
    file.close();
}

/// Drives any consumable through the same sequence.
async fn walk<C: Consumable>(c: &mut C) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&c.read(2).await.unwrap());
    c.seek(1).await.unwrap();
    out.extend_from_slice(&c.read(3).await.unwrap());
    c.aseek(0).await.unwrap();
    out.extend_from_slice(&c.read(1).await.unwrap());
    c.reset();
    out.extend_from_slice(&c.read(4).await.unwrap());
    assert!(c.read(100).await.unwrap_err().is_out_of_range());
    out
}

#[tokio::test]
async fn test_buffer_and_file_behave_alike() {
    let content = b"consumable resources";
    let tmp = fixture(content);

    let mut buf = ConsumableBuffer::new(&content[..]);
    let mut file = ConsumableFile::new(tmp.path());
    file.open().await.unwrap();

    let from_buf = walk(&mut buf).await;
    let from_file = walk(&mut file).await;
    assert_eq!(from_buf, from_file);
    assert_eq!(from_buf, b"cosumccons");
    assert_eq!(Consumable::position(&buf), Consumable::position(&file));
}

#[tokio::test]
async fn test_empty_file() {
    let tmp = fixture(b"");
    let mut file = ConsumableFile::new(tmp.path());
    file.open().await.unwrap();

    assert_eq!(file.filesize(), Some(0));
    assert!(file.read(0).await.unwrap().is_empty());
    assert!(file.read(1).await.unwrap_err().is_out_of_range());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_buffer_read_exact(data in proptest::collection::vec(any::<u8>(), 0..256), n in 0usize..300) {
        let mut buf = ConsumableBuffer::new(data.clone());
        let result = buf.read(n as u64);
        if n <= data.len() {
            let bytes = result.unwrap();
            prop_assert_eq!(&bytes[..], &data[..n]);
            prop_assert_eq!(buf.position(), n as u64);
        } else {
            prop_assert!(result.unwrap_err().is_out_of_range());
            prop_assert_eq!(buf.position(), 0);
        }
    }

    #[test]
    fn prop_buffer_aseek_matches_reset_seek(
        data in proptest::collection::vec(any::<u8>(), 1..128),
        k in 0usize..128,
        n in 0usize..128,
    ) {
        prop_assume!(k <= data.len());
        let mut a = ConsumableBuffer::new(data.clone());
        let mut b = ConsumableBuffer::new(data.clone());
        a.read((data.len() / 2) as u64).unwrap();
        b.read((data.len() / 3) as u64).unwrap();

        a.aseek(k as u64).unwrap();
        b.reset();
        b.seek(k as u64).unwrap();

        let ra = a.read(n as u64).ok();
        let rb = b.read(n as u64).ok();
        prop_assert_eq!(ra, rb);
        prop_assert_eq!(a.position(), b.position());
    }

    #[test]
    fn prop_file_reset_rereads(data in proptest::collection::vec(any::<u8>(), 1..512), n in 1usize..512) {
        let n = n.min(data.len());
        let tmp = fixture(&data);
        runtime().block_on(async {
            let mut file = ConsumableFile::new(tmp.path());
            file.open().await.unwrap();
            let first = file.read(n as u64).await.unwrap();
            file.reset();
            let again = file.read(n as u64).await.unwrap();
            assert_eq!(first, again);
            assert_eq!(&first[..], &data[..n]);
            assert_eq!(file.position(), n as u64);
        });
    }
}

//! File hashing through the public streaming API

mod common;

use common::{generate_test_data, write_fixture};
use hashkit_core::error::IoErrorKind;
use hashkit_core::{
    CancellationToken, Error, FileHasher, HashAlgorithm, HashCalculator, LetterCase,
    ProgressProvider, ProgressUpdate,
};
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Default)]
struct CollectingProvider {
    updates: Mutex<Vec<u64>>,
}

impl ProgressProvider for CollectingProvider {
    fn report(&self, update: ProgressUpdate) {
        if let ProgressUpdate::HashProgress {
            bytes_processed, ..
        } = update
        {
            self.updates.lock().unwrap().push(bytes_processed);
        }
    }

    fn complete(&self) {}
}

#[tokio::test]
async fn test_known_vectors_from_files() {
    let temp_dir = TempDir::new().unwrap();
    let abc = write_fixture(&temp_dir, "abc.txt", b"abc");
    let digits = write_fixture(&temp_dir, "digits.txt", b"123456789");
    let hasher = FileHasher::new();

    let cases = [
        (&abc, HashAlgorithm::MD5, "900150983cd24fb0d6963f7d28e17f72"),
        (&abc, HashAlgorithm::SHA1, "a9993e364706816aba3e25717850c26c9cd0d89d"),
        (
            &abc,
            HashAlgorithm::SHA224,
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7",
        ),
        (
            &abc,
            HashAlgorithm::SHA256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ),
        (
            &abc,
            HashAlgorithm::SHA384,
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7",
        ),
        (
            &abc,
            HashAlgorithm::SHA512,
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        ),
        (&digits, HashAlgorithm::CRC16, "bb3d"),
        (&digits, HashAlgorithm::CRC32, "cbf43926"),
    ];

    for (path, algorithm, expected) in cases {
        let result = hasher.hash_file(path, algorithm).await.unwrap();
        assert_eq!(result.hex(LetterCase::Lower), expected, "{algorithm}");
    }
}

#[tokio::test]
async fn test_chunk_boundaries_match_in_memory_digest() {
    let temp_dir = TempDir::new().unwrap();
    let calculator = HashCalculator::new();
    let hasher = FileHasher::new();

    for size in [4095usize, 4096, 4097, 8192, 8193] {
        let data = generate_test_data(size);
        let path = write_fixture(&temp_dir, &format!("boundary_{size}.bin"), &data);

        for algorithm in HashAlgorithm::ALL {
            let from_file = hasher.hash_file(&path, algorithm).await.unwrap();
            let from_bytes = calculator.calculate_bytes(algorithm, &data).unwrap();
            assert_eq!(
                from_file.digest, from_bytes.digest,
                "{algorithm} at {size} bytes"
            );
            assert_eq!(from_file.input_size, size as u64);
        }
    }
}

#[tokio::test]
async fn test_chunk_size_does_not_change_digest() {
    let temp_dir = TempDir::new().unwrap();
    let data = generate_test_data(100_003);
    let path = write_fixture(&temp_dir, "odd_size.bin", &data);

    for algorithm in HashAlgorithm::ALL {
        let reference = FileHasher::new().hash_file(&path, algorithm).await.unwrap();
        for chunk_size in [1usize, 3, 1000, 65_536, 1 << 20] {
            let result = FileHasher::with_chunk_size(chunk_size)
                .hash_file(&path, algorithm)
                .await
                .unwrap();
            assert_eq!(
                result.digest, reference.digest,
                "{algorithm} with chunk size {chunk_size}"
            );
        }
    }
}

#[tokio::test]
async fn test_empty_file_matches_empty_input() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "empty.bin", b"");
    let hasher = FileHasher::new();

    let md5 = hasher.hash_file(&path, HashAlgorithm::MD5).await.unwrap();
    assert_eq!(md5.hex(LetterCase::Lower), "d41d8cd98f00b204e9800998ecf8427e");

    let crc32 = hasher.hash_file(&path, HashAlgorithm::CRC32).await.unwrap();
    assert_eq!(crc32.hex(LetterCase::Lower), "0");
    assert_eq!(crc32.input_size, 0);
}

#[tokio::test]
async fn test_progress_is_monotonic_and_ends_at_file_size() {
    let temp_dir = TempDir::new().unwrap();
    let size = 3 * 4096 + 17;
    let path = write_fixture(&temp_dir, "progress.bin", &generate_test_data(size));
    let provider = CollectingProvider::default();

    FileHasher::new()
        .hash_file_with_progress(
            &path,
            HashAlgorithm::SHA256,
            &provider,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let updates = provider.updates.lock().unwrap().clone();
    assert!(updates.len() >= 4, "one report per chunk: {updates:?}");
    assert!(updates.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(updates.iter().all(|&bytes| bytes <= size as u64));
    assert_eq!(updates.last().copied(), Some(size as u64));
}

#[tokio::test]
async fn test_cancelled_token_stops_hashing() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "cancel.bin", &generate_test_data(16_384));
    let provider = CollectingProvider::default();
    let token = CancellationToken::new();
    token.cancel();

    let err = FileHasher::new()
        .hash_file_with_progress(&path, HashAlgorithm::MD5, &provider, &token)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(provider.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_path_errors() {
    let temp_dir = TempDir::new().unwrap();
    let hasher = FileHasher::new();

    match hasher
        .hash_file(&temp_dir.path().join("nope.bin"), HashAlgorithm::SHA1)
        .await
    {
        Err(Error::Io(err)) => assert_eq!(err.kind, IoErrorKind::FileNotFound),
        other => panic!("expected FileNotFound, got {other:?}"),
    }

    match hasher.hash_file(temp_dir.path(), HashAlgorithm::SHA1).await {
        Err(Error::Io(err)) => assert_eq!(err.kind, IoErrorKind::NotAFile),
        other => panic!("expected NotAFile, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_hashes_are_independent() {
    let temp_dir = TempDir::new().unwrap();
    let calculator = HashCalculator::new();

    let mut expected = Vec::new();
    let mut handles = Vec::new();
    for i in 0..8usize {
        let data = generate_test_data(10_000 + i * 1_111);
        let path = write_fixture(&temp_dir, &format!("concurrent_{i}.bin"), &data);
        let algorithm = HashAlgorithm::ALL[i % HashAlgorithm::ALL.len()];
        expected.push(calculator.calculate_bytes(algorithm, &data).unwrap().digest);

        handles.push(tokio::spawn(async move {
            FileHasher::new().hash_file(&path, algorithm).await
        }));
    }

    let results = futures::future::join_all(handles).await;
    for (joined, expected) in results.into_iter().zip(expected) {
        let result = joined.unwrap().unwrap();
        assert_eq!(result.digest, expected);
    }
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "repeat.bin", &generate_test_data(50_000));
    let hasher = FileHasher::new();

    let first = hasher.hash_file(&path, HashAlgorithm::SHA512).await.unwrap();
    let second = hasher.hash_file(&path, HashAlgorithm::SHA512).await.unwrap();
    assert_eq!(first.hex(LetterCase::Upper), second.hex(LetterCase::Upper));
}

use std::fs::File;
use std::path::Path;

use ark_uasset::error::{DecompressionError, Error, Result};
use ark_uasset::{decompress, decompress_bytes, inspect, sidecar, DecompressOptions};
use tracing::info;
use tracing_test::traced_test;
use walkdir::WalkDir;

fn validate_container(path: &Path) -> Result<()> {
    info!("testing {}", &path.display());

    let original = sidecar::decompressed_path(path)
        .ok_or_else(|| Error::IOError(std::io::ErrorKind::InvalidInput.into()))?;
    info!("comparing to {}", original.display());

    let expected = std::fs::read(&original)?;

    let mut actual = Vec::new();
    let info = decompress(File::open(path)?, &mut actual, &DecompressOptions::default())?;

    assert_eq!(expected.len(), actual.len());
    assert_eq!(expected, actual);

    assert_eq!(info.header.uncompressed_total, actual.len() as u64);
    assert_eq!(sidecar::read_sidecar(path)?, actual.len() as u64);

    // every chunk but the last is exactly the nominal chunk size
    if let Some((last, rest)) = info.chunks.split_last() {
        assert!(rest
            .iter()
            .all(|c| c.uncompressed_size == info.header.chunk_size));
        assert!(last.uncompressed_size <= info.header.chunk_size);
    }

    Ok(())
}

fn containers() -> impl Iterator<Item = std::path::PathBuf> {
    WalkDir::new(format!("{}/resources/", env!("CARGO_MANIFEST_DIR")))
        .into_iter()
        // Filter out all those directory entries which couldn't be read
        .filter_map(|res| res.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| sidecar::is_compressed_path(path))
}

#[traced_test]
#[test]
fn validate_container_parsing() -> Result<()> {
    let mut count = 0;
    for path in containers() {
        validate_container(&path)?;
        count += 1;
    }
    assert!(count > 0);

    Ok(())
}

#[traced_test]
#[test]
fn exact_multiple_fixture_has_no_trailing_chunk() -> Result<()> {
    let path = format!(
        "{}/resources/Content/Dino_Character_BP.uasset.z",
        env!("CARGO_MANIFEST_DIR")
    );

    let info = inspect(File::open(path)?, &DecompressOptions::default())?;
    assert_eq!(info.chunks.len(), 2);
    assert_eq!(info.header.uncompressed_total, 2 * info.header.chunk_size);

    Ok(())
}

#[traced_test]
#[test]
fn corrupt_payload_never_decodes() -> Result<()> {
    let path = format!(
        "{}/resources/Content/PrimalItem_Saddle.uasset.z",
        env!("CARGO_MANIFEST_DIR")
    );
    let data = std::fs::read(path)?;
    let info = inspect(&data[..], &DecompressOptions::default())?;

    let first = info.payload_start() as usize;
    let second = first + info.chunks[0].compressed_size as usize;
    let end = second + info.chunks[1].compressed_size as usize;

    // zlib header, deflate body and adler32 trailer of both chunks
    for offset in [
        first,
        first + 1,
        first + 1000,
        second - 1,
        second,
        (second + end) / 2,
        end - 4,
        end - 1,
    ] {
        let mut corrupt = data.clone();
        corrupt[offset] ^= 0xFF;

        let result = decompress_bytes(&corrupt, &DecompressOptions::default());
        assert!(
            matches!(
                result,
                Err(Error::Decompression(
                    DecompressionError::CorruptChunk { .. }
                        | DecompressionError::SizeMismatch { .. }
                ))
            ),
            "offset {offset}: {result:?}"
        );
    }

    Ok(())
}

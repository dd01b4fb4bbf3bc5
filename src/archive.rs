//! Archive extraction into destination folders.
//!
//! Supports `.zip`, `.tar`, and compressed tarballs (`.tar.gz`, `.tar.xz`,
//! `.tar.bz`). A plain `.gz` holds a single compressed stream rather than a
//! file tree, so it reports an unsupported-format error, which propagates to
//! the top-level driver like any other unpack failure.

use crate::file_processor::{SortError, SortResult};
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use liblzma::read::XzDecoder;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tar::Archive as TarArchive;

/// Unpacks an archive into an existing destination directory.
///
/// The format is chosen from the filename suffix, checking the compound
/// tarball forms before the plain `.gz` one.
pub fn unpack(archive_path: &Path, dest_dir: &Path) -> SortResult<()> {
    let name = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if name.ends_with(".tar.gz") {
        unpack_compressed_tar(archive_path, dest_dir, "tar.gz", GzDecoder::new)
    } else if name.ends_with(".tar.xz") {
        unpack_compressed_tar(archive_path, dest_dir, "tar.xz", XzDecoder::new)
    } else if name.ends_with(".tar.bz") {
        unpack_compressed_tar(archive_path, dest_dir, "tar.bz", BzDecoder::new)
    } else if name.ends_with(".tar") {
        unpack_tar(archive_path, dest_dir)
    } else if name.ends_with(".zip") {
        unpack_zip(archive_path, dest_dir)
    } else {
        Err(unpack_error(
            archive_path,
            format!("unsupported archive format '{name}'"),
        ))
    }
}

fn unpack_error(archive_path: &Path, reason: String) -> SortError {
    SortError::ArchiveUnpackFailed {
        path: archive_path.to_path_buf(),
        reason,
    }
}

fn unpack_compressed_tar<D, F>(
    archive_path: &Path,
    dest_dir: &Path,
    format: &str,
    decoder: F,
) -> SortResult<()>
where
    D: Read,
    F: FnOnce(File) -> D,
{
    let file = File::open(archive_path)
        .map_err(|e| unpack_error(archive_path, format!("failed to open archive: {e}")))?;
    let mut archive = TarArchive::new(decoder(file));
    archive
        .unpack(dest_dir)
        .map_err(|e| unpack_error(archive_path, format!("failed to extract {format}: {e}")))
}

fn unpack_tar(archive_path: &Path, dest_dir: &Path) -> SortResult<()> {
    let tar = File::open(archive_path)
        .map_err(|e| unpack_error(archive_path, format!("failed to open archive: {e}")))?;
    let mut archive = TarArchive::new(tar);
    archive
        .unpack(dest_dir)
        .map_err(|e| unpack_error(archive_path, format!("failed to extract tar: {e}")))
}

fn unpack_zip(archive_path: &Path, dest_dir: &Path) -> SortResult<()> {
    let file = File::open(archive_path)
        .map_err(|e| unpack_error(archive_path, format!("failed to open archive: {e}")))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| unpack_error(archive_path, format!("failed to read zip archive: {e}")))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| unpack_error(archive_path, format!("failed to read zip entry: {e}")))?;

        // Entries with names that escape the destination are skipped.
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let out_path = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| {
                unpack_error(archive_path, format!("failed to create directory: {e}"))
            })?;
        } else {
            if let Some(parent) = out_path.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent).map_err(|e| {
                    unpack_error(archive_path, format!("failed to create parent directory: {e}"))
                })?;
            }
            let mut out_file = File::create(&out_path).map_err(|e| {
                unpack_error(archive_path, format!("failed to create file: {e}"))
            })?;
            io::copy(&mut entry, &mut out_file)
                .map_err(|e| unpack_error(archive_path, format!("failed to write file: {e}")))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).expect("Failed to create zip");
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).expect("start_file failed");
            writer.write_all(data).expect("write failed");
        }
        writer.finish().expect("finish failed");
    }

    fn fill_tar<W: Write>(writer: W, entries: &[(&str, &[u8])]) -> W {
        let mut builder = tar::Builder::new(writer);
        for (name, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, *data)
                .expect("append failed");
        }
        builder.into_inner().expect("into_inner failed")
    }

    fn write_tar_gz(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).expect("Failed to create tar.gz");
        fill_tar(GzEncoder::new(file, Compression::default()), entries)
            .finish()
            .expect("finish failed");
    }

    fn write_tar_xz(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).expect("Failed to create tar.xz");
        fill_tar(liblzma::write::XzEncoder::new(file, 6), entries)
            .finish()
            .expect("finish failed");
    }

    fn write_tar_bz(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).expect("Failed to create tar.bz");
        fill_tar(
            bzip2::write::BzEncoder::new(file, bzip2::Compression::default()),
            entries,
        )
        .finish()
        .expect("finish failed");
    }

    #[test]
    fn test_unpack_zip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let archive_path = temp_dir.path().join("data.zip");
        write_zip(
            &archive_path,
            &[("inner.txt", b"hello"), ("sub/nested.txt", b"deep")],
        );
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest).expect("mkdir failed");

        unpack(&archive_path, &dest).expect("unpack failed");

        assert_eq!(
            fs::read_to_string(dest.join("inner.txt")).expect("read failed"),
            "hello"
        );
        assert_eq!(
            fs::read_to_string(dest.join("sub").join("nested.txt")).expect("read failed"),
            "deep"
        );
    }

    #[test]
    fn test_unpack_tar_gz() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let archive_path = temp_dir.path().join("data.tar.gz");
        write_tar_gz(&archive_path, &[("inner.txt", b"hello")]);
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest).expect("mkdir failed");

        unpack(&archive_path, &dest).expect("unpack failed");

        assert_eq!(
            fs::read_to_string(dest.join("inner.txt")).expect("read failed"),
            "hello"
        );
    }

    #[test]
    fn test_unpack_tar_xz() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let archive_path = temp_dir.path().join("data.tar.xz");
        write_tar_xz(&archive_path, &[("inner.txt", b"pressed")]);
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest).expect("mkdir failed");

        unpack(&archive_path, &dest).expect("unpack failed");

        assert_eq!(
            fs::read_to_string(dest.join("inner.txt")).expect("read failed"),
            "pressed"
        );
    }

    #[test]
    fn test_unpack_tar_bz() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let archive_path = temp_dir.path().join("data.tar.bz");
        write_tar_bz(&archive_path, &[("inner.txt", b"squeezed")]);
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest).expect("mkdir failed");

        unpack(&archive_path, &dest).expect("unpack failed");

        assert_eq!(
            fs::read_to_string(dest.join("inner.txt")).expect("read failed"),
            "squeezed"
        );
    }

    #[test]
    fn test_unpack_unsupported_format() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let archive_path = temp_dir.path().join("data.gz");
        fs::write(&archive_path, b"not really gzip").expect("write failed");
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest).expect("mkdir failed");

        let result = unpack(&archive_path, &dest);
        assert!(matches!(
            result,
            Err(SortError::ArchiveUnpackFailed { .. })
        ));
    }

    #[test]
    fn test_unpack_corrupt_zip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let archive_path = temp_dir.path().join("broken.zip");
        fs::write(&archive_path, b"this is not a zip file").expect("write failed");
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest).expect("mkdir failed");

        let result = unpack(&archive_path, &dest);
        assert!(matches!(
            result,
            Err(SortError::ArchiveUnpackFailed { .. })
        ));
    }
}

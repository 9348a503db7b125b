//! Archive expansion into a scoped staging directory.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use nvmg_model::{ExtractError, InstallError};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    TarXz,
    TarBz2,
    Zip,
}

const SUFFIXES: [(&str, ArchiveFormat); 7] = [
    (".tar.gz", ArchiveFormat::TarGz),
    (".tgz", ArchiveFormat::TarGz),
    (".tar.xz", ArchiveFormat::TarXz),
    (".txz", ArchiveFormat::TarXz),
    (".tar.bz2", ArchiveFormat::TarBz2),
    (".tbz", ArchiveFormat::TarBz2),
    (".zip", ArchiveFormat::Zip),
];

impl ArchiveFormat {
    /// Detect the format from the file name suffix alone.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        SUFFIXES
            .iter()
            .find(|(suffix, _)| file_name.ends_with(suffix))
            .map(|(_, format)| *format)
    }
}

/// Extracted archive contents. Dropping this removes the whole staging tree,
/// including anything the caller did not move out of [`StagedArchive::root`].
#[derive(Debug)]
pub struct StagedArchive {
    dir: TempDir,
    root: PathBuf,
}

impl StagedArchive {
    /// The package's top level, with a single wrapper directory collapsed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The temporary directory the archive was expanded into.
    #[must_use]
    pub fn staging_dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Expand `archive` into a fresh staging directory under `temp_base`.
///
/// # Errors
/// Returns [`InstallError::UnsupportedFormat`] when the suffix is not
/// recognized and [`InstallError::Extract`] when the archive cannot be read
/// or written out. The staging directory is already removed when either is
/// returned.
pub fn extract(archive: &Path, temp_base: &Path) -> Result<StagedArchive, InstallError> {
    let file_name = archive
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = ArchiveFormat::from_file_name(&file_name)
        .ok_or(InstallError::UnsupportedFormat { file_name })?;

    let dir = tempfile::Builder::new()
        .prefix(".nvmg-staging")
        .tempdir_in(temp_base)
        .map_err(|error| ExtractError::new(archive, "create staging directory", error))?;

    debug!(
        "Extracting {} ({format:?}) into {}",
        archive.display(),
        dir.path().display()
    );

    match format {
        ArchiveFormat::TarGz => {
            unpack_tar(flate2::read::GzDecoder::new(open(archive)?), dir.path(), archive)?;
        }
        ArchiveFormat::TarXz => {
            unpack_tar(xz2::read::XzDecoder::new(open(archive)?), dir.path(), archive)?;
        }
        ArchiveFormat::TarBz2 => {
            unpack_tar(bzip2::read::BzDecoder::new(open(archive)?), dir.path(), archive)?;
        }
        ArchiveFormat::Zip => unpack_zip(open(archive)?, dir.path(), archive)?,
    }

    let root = effective_root(dir.path())
        .map_err(|error| ExtractError::new(archive, "read staging directory", error))?;

    Ok(StagedArchive { dir, root })
}

fn open(archive: &Path) -> Result<BufReader<File>, ExtractError> {
    File::open(archive)
        .map(BufReader::new)
        .map_err(|error| ExtractError::new(archive, "open archive", error))
}

fn unpack_tar<R: Read>(reader: R, dest: &Path, archive_path: &Path) -> Result<(), ExtractError> {
    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);
    // `unpack` refuses entries that would land outside `dest`.
    archive
        .unpack(dest)
        .map_err(|error| ExtractError::new(archive_path, "unpack tar archive", error))
}

fn unpack_zip(reader: BufReader<File>, dest: &Path, archive_path: &Path) -> Result<(), ExtractError> {
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|error| ExtractError::new(archive_path, "read zip archive", error))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|error| ExtractError::new(archive_path, "read zip entry", error))?;
        let Some(name) = entry.enclosed_name() else {
            warn!("Skipping zip entry with unsafe path: {}", entry.name());
            continue;
        };
        let out_path = dest.join(name);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(|error| {
                ExtractError::new(archive_path, "create extracted directory", error)
            })?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                ExtractError::new(archive_path, "create extracted directory", error)
            })?;
        }
        let mut outfile = File::create(&out_path)
            .map_err(|error| ExtractError::new(archive_path, "create extracted file", error))?;
        std::io::copy(&mut entry, &mut outfile)
            .map_err(|error| ExtractError::new(archive_path, "write extracted file", error))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                let _ = std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode));
            }
        }
    }

    Ok(())
}

/// A staging directory holding exactly one directory is a wrapper; its
/// contents are the real top level.
fn effective_root(staging: &Path) -> std::io::Result<PathBuf> {
    let mut entries = std::fs::read_dir(staging)?;
    let first = entries.next().transpose()?;
    let second = entries.next().transpose()?;

    match (first, second) {
        (Some(only), None) if only.file_type()?.is_dir() => Ok(only.path()),
        _ => Ok(staging.to_path_buf()),
    }
}

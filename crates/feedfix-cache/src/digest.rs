//! Source file digests for cache staleness reporting.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{CacheError, Result};

/// Compute the SHA-256 digest of a source file, hex-encoded.
///
/// The digest is stored alongside the normalized feed so a cache built
/// from an older copy of the export can be reported. Uses buffered
/// reading; exports can run to hundreds of megabytes.
pub fn source_digest(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| CacheError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| CacheError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn digest_matches_known_vector() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"<feed><entry/></feed>\n").unwrap();
        temp_file.flush().unwrap();

        let digest = source_digest(temp_file.path()).unwrap();
        assert_eq!(
            digest,
            "4ba42f8d03137adebe0d4f942f46621abdc137b57e3633f361f09c309e380d09"
        );
    }

    #[test]
    fn digest_of_missing_file_is_an_io_error() {
        let err = source_digest(Path::new("/nonexistent/blog.xml")).unwrap_err();
        assert!(matches!(err, CacheError::Io { operation: "read", .. }));
    }
}

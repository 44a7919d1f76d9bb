//! Digest computation over file contents.
//!
//! All algorithms stream the file through a fixed buffer, so memory use
//! is independent of file size. SHA variants come from the `sha2` crate,
//! XXH variants from `xxhash-rust`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use xxhash_rust::xxh32::Xxh32;
use xxhash_rust::xxh64::Xxh64;

use crate::config::HashAlgorithm;

const READ_BUF_LEN: usize = 64 * 1024;

enum Hasher {
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Xxh32(Xxh32),
    Xxh64(Xxh64),
}

impl Hasher {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha224 => Self::Sha224(Sha224::new()),
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Sha384 => Self::Sha384(Sha384::new()),
            HashAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
            HashAlgorithm::Xxh32 => Self::Xxh32(Xxh32::new(0)),
            HashAlgorithm::Xxh64 => Self::Xxh64(Xxh64::new(0)),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha224(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha384(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
            Self::Xxh32(h) => h.update(data),
            Self::Xxh64(h) => h.update(data),
        }
    }

    fn finish(self) -> String {
        match self {
            Self::Sha224(h) => hex(&h.finalize()),
            Self::Sha256(h) => hex(&h.finalize()),
            Self::Sha384(h) => hex(&h.finalize()),
            Self::Sha512(h) => hex(&h.finalize()),
            Self::Xxh32(h) => format!("{:08x}", h.digest()),
            Self::Xxh64(h) => format!("{:016x}", h.digest()),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Streams `path` through `algorithm` and returns the lowercase hex
/// digest.
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Hasher::new(algorithm);
    let mut buf = [0u8; READ_BUF_LEN];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hasher.finish())
}

//! Log file reader. Compressed logs (`.gz`) are inflated on the fly.
#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use crate::error::Error;

/// Plain or gzip compressed log, selected by file extension
#[derive(Debug)]
pub enum BufferedReader {
    PlainFile(BufReader<File>),
    #[cfg(feature = "flate2")]
    GzFile(BufReader<GzDecoder<File>>),
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

impl BufferedReader {
    /// Opens the log at `path`. A `.gz` log without the `flate2` feature
    /// is rejected with [Error::GzipNotSupported] before anything is opened.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !is_gzip(path) {
            return Ok(Self::PlainFile(BufReader::new(File::open(path)?)));
        }

        #[cfg(feature = "flate2")]
        {
            let fd = File::open(path)?;
            Ok(Self::GzFile(BufReader::new(GzDecoder::new(fd))))
        }
        #[cfg(not(feature = "flate2"))]
        {
            Err(Error::GzipNotSupported)
        }
    }
}

impl Read for BufferedReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, std::io::Error> {
        match self {
            Self::PlainFile(r) => r.read(buf),
            #[cfg(feature = "flate2")]
            Self::GzFile(r) => r.read(buf),
        }
    }
}

impl BufRead for BufferedReader {
    fn fill_buf(&mut self) -> Result<&[u8], std::io::Error> {
        match self {
            Self::PlainFile(r) => r.fill_buf(),
            #[cfg(feature = "flate2")]
            Self::GzFile(r) => r.fill_buf(),
        }
    }
    fn consume(&mut self, s: usize) {
        match self {
            Self::PlainFile(r) => r.consume(s),
            #[cfg(feature = "flate2")]
            Self::GzFile(r) => r.consume(s),
        }
    }
}

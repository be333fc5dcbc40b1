//! Re-openable image sources.
//!
//! Every pipeline step opens its own reader and drops it before returning,
//! so a source is opened once for the header, once for the EXIF block and
//! once for the full decode. Nothing keeps a handle open between steps.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A readable image resource that can be opened any number of times.
pub trait ImageSource {
    /// Reader returned by [`ImageSource::open`].
    type Reader: BufRead + Seek;

    /// Open a fresh reader positioned at the start of the image.
    fn open(&self) -> io::Result<Self::Reader>;

    /// Short label used in log messages.
    fn describe(&self) -> String;
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    type Reader = S::Reader;

    fn open(&self) -> io::Result<Self::Reader> {
        (**self).open()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// An image stored on disk, such as the file a camera app wrote to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileSource {
    type Reader = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader> {
        File::open(&self.path).map(BufReader::new)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Image bytes already held in memory.
///
/// Cloning is cheap; every reader shares the same buffer.
#[derive(Debug, Clone)]
pub struct BytesSource {
    bytes: Arc<[u8]>,
}

impl BytesSource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for BytesSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for BytesSource {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl ImageSource for BytesSource {
    type Reader = Cursor<Arc<[u8]>>;

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(Cursor::new(Arc::clone(&self.bytes)))
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.bytes.len())
    }
}

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

/// A byte stream with absolute seeking, big-endian integer reads and a
/// latching error indicator.
///
/// Texture decoders receive the stream positioned at the start of their
/// payload and may call [`SeekableStream::set_error`] to report a decode
/// failure back to the loader.
pub trait SeekableStream: Read + Send {
    fn seek_to(&mut self, offset: u64) -> std::io::Result<()>;

    fn position(&mut self) -> std::io::Result<u64>;

    fn read_be32(&mut self) -> std::io::Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf).inspect_err(|_| self.set_error())?;
        Ok(u32::from_be_bytes(buf))
    }

    fn read_be64(&mut self) -> std::io::Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf).inspect_err(|_| self.set_error())?;
        Ok(u64::from_be_bytes(buf))
    }

    fn has_error(&self) -> bool;

    fn set_error(&mut self);

    fn clear_error(&mut self);
}

pub struct StdioStream<R> {
    inner: R,
    error: bool,
}

impl StdioStream<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, buffer_size: usize) -> std::io::Result<Self> {
        debug!("Opening snapshot '{}'", path.as_ref().display());
        Ok(Self::new(BufReader::with_capacity(
            buffer_size,
            File::open(path)?,
        )))
    }
}

impl<R: Read + Seek + Send> StdioStream<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            error: false,
        }
    }
}

impl<R> std::fmt::Debug for StdioStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "StdioStream(error: {})", self.error)
    }
}

impl<R: Read + Seek + Send> Read for StdioStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf).inspect_err(|_| self.error = true)
    }
}

impl<R: Read + Seek + Send> SeekableStream for StdioStream<R> {
    fn seek_to(&mut self, offset: u64) -> std::io::Result<()> {
        self.inner
            .seek(SeekFrom::Start(offset))
            .inspect_err(|_| self.error = true)?;
        Ok(())
    }

    fn position(&mut self) -> std::io::Result<u64> {
        self.inner.stream_position()
    }

    fn has_error(&self) -> bool {
        self.error
    }

    fn set_error(&mut self) {
        self.error = true;
    }

    fn clear_error(&mut self) {
        self.error = false;
    }
}

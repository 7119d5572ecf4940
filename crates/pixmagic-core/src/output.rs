//! Streaming an encoded image to an output channel.
//!
//! An [`OutputSink`] receives a content-type marker and then the encoded
//! body. A successful render hands back a [`Rendered`] token; the only thing
//! to do with it is [`Rendered::halt`], which ends the process.

use std::io::{self, Stdout, StdoutLock, Write};

use log::{debug, info};

/// Destination of `RasterImage::output`.
pub trait OutputSink {
    /// Announce the MIME type of the body that follows.
    fn content_type(&mut self, mime: &str) -> io::Result<()>;

    /// Writer for the encoded body.
    fn body(&mut self) -> &mut dyn Write;
}

/// CGI-style stream: a `Content-type` header line and a blank line precede
/// the body.
#[derive(Debug)]
pub struct HeaderedStream<W: Write> {
    inner: W,
}

impl<W: Write> HeaderedStream<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl HeaderedStream<StdoutLock<'static>> {
    /// Headered stream over the locked process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout().lock())
    }
}

impl<W: Write> OutputSink for HeaderedStream<W> {
    fn content_type(&mut self, mime: &str) -> io::Result<()> {
        write!(self.inner, "Content-type: {mime}\r\n\r\n")
    }

    fn body(&mut self) -> &mut dyn Write {
        &mut self.inner
    }
}

/// Body-only stream. The marker goes to the log instead of the stream.
#[derive(Debug)]
pub struct RawStream<W: Write> {
    inner: W,
}

impl<W: Write> RawStream<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl RawStream<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink for RawStream<W> {
    fn content_type(&mut self, mime: &str) -> io::Result<()> {
        info!("Content-type: {mime}");
        Ok(())
    }

    fn body(&mut self) -> &mut dyn Write {
        &mut self.inner
    }
}

/// Proof that an image was fully written to a sink.
///
/// Rendering is terminal: nothing is meant to run after it except
/// [`Rendered::halt`].
#[must_use = "a rendered image must end the process with `halt()`"]
#[derive(Debug, PartialEq, Eq)]
pub struct Rendered {
    mime: &'static str,
    bytes: usize,
}

impl Rendered {
    pub(crate) fn new(mime: &'static str, bytes: usize) -> Self {
        Self { mime, bytes }
    }

    /// MIME type announced before the body.
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Length of the encoded body.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Flush stdout and exit the process with status 0.
    pub fn halt(self) -> ! {
        debug!("rendered {} bytes of {}, halting", self.bytes, self.mime);
        // Nothing useful can be done about a failed flush on the way out
        let _ = io::stdout().flush();
        std::process::exit(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headered_stream_writes_marker_then_body() {
        let mut sink = HeaderedStream::new(Vec::new());
        sink.content_type("image/png").unwrap();
        sink.body().write_all(b"BODY").unwrap();

        assert_eq!(sink.into_inner(), b"Content-type: image/png\r\n\r\nBODY".to_vec());
    }

    #[test]
    fn test_raw_stream_writes_body_only() {
        let mut sink = RawStream::new(Vec::new());
        sink.content_type("image/gif").unwrap();
        sink.body().write_all(b"GIF89a").unwrap();

        assert_eq!(sink.into_inner(), b"GIF89a".to_vec());
    }

    #[test]
    fn test_rendered_accessors() {
        let rendered = Rendered::new("image/jpeg", 42);
        assert_eq!(rendered.mime(), "image/jpeg");
        assert_eq!(rendered.bytes(), 42);
    }
}

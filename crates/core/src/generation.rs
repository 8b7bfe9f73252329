//! The content-generator boundary.
//!
//! Networking, authentication, and retries belong to implementors of
//! [`ContentGenerator`]. This module only defines the seam and how streamed
//! fragments are accumulated.

use crate::error::{Error, Result};
use crate::prompt::GenerationRequest;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ordered text fragments of a streamed response.
pub type FragmentStream<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// A language-model backend that turns prompts into text.
pub trait ContentGenerator {
    /// Return the complete response for `request`.
    fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Return the response as ordered fragments.
    ///
    /// The default implementation yields the single-shot response as one fragment.
    fn generate_stream(&self, request: &GenerationRequest) -> Result<FragmentStream<'_>> {
        let text = self.generate(request)?;
        Ok(Box::new(std::iter::once(Ok(text))))
    }
}

impl<G: ContentGenerator + ?Sized> ContentGenerator for &G {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        (**self).generate(request)
    }

    fn generate_stream(&self, request: &GenerationRequest) -> Result<FragmentStream<'_>> {
        (**self).generate_stream(request)
    }
}

impl<G: ContentGenerator + ?Sized> ContentGenerator for Box<G> {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        (**self).generate(request)
    }

    fn generate_stream(&self, request: &GenerationRequest) -> Result<FragmentStream<'_>> {
        (**self).generate_stream(request)
    }
}

/// Shared flag a caller sets to abandon a stream.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Visible to every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Concatenates streamed fragments in arrival order.
///
/// The accumulated text is only handed out by [`finish`](Self::finish);
/// an abandoned accumulator is simply dropped.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    text: String,
    fragments: usize,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment.
    pub fn push(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.fragments += 1;
        if self.fragments % 10 == 0 {
            log::debug!(
                "Received {} fragments, {} characters so far",
                self.fragments,
                self.text.chars().count()
            );
        }
    }

    /// Number of fragments received.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Complete the stream and return the accumulated text.
    pub fn finish(self) -> String {
        log::debug!("Stream complete after {} fragments", self.fragments);
        self.text
    }

    /// Drain `stream` into a complete response.
    ///
    /// Checks `cancel` before each fragment. Cancellation or a fragment error
    /// discards everything accumulated so far.
    pub fn collect(stream: FragmentStream<'_>, cancel: &CancellationToken) -> Result<String> {
        let mut acc = Self::new();

        for fragment in stream {
            if cancel.is_cancelled() {
                log::warn!(
                    "Stream cancelled after {} fragments; discarding partial text",
                    acc.fragment_count()
                );
                return Err(Error::Cancelled);
            }
            acc.push(&fragment?);
        }

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(acc.finish())
    }
}

/// Call the generator and reject blank responses.
pub fn generate_text<G: ContentGenerator + ?Sized>(
    generator: &G,
    request: &GenerationRequest,
) -> Result<String> {
    non_empty(generator.generate(request)?)
}

/// Stream from the generator, accumulate, and reject blank responses.
pub fn generate_text_streaming<G: ContentGenerator + ?Sized>(
    generator: &G,
    request: &GenerationRequest,
    cancel: &CancellationToken,
) -> Result<String> {
    let stream = generator.generate_stream(request)?;
    non_empty(StreamAccumulator::collect(stream, cancel)?)
}

fn non_empty(text: String) -> Result<String> {
    if text.trim().is_empty() {
        Err(Error::EmptyResponse)
    } else {
        Ok(text)
    }
}

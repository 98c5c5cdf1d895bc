/// Configuration options for a [`Decoder`].
///
/// # Examples
///
/// ```rust
/// use jsonpull::{Decoder, DecoderOptions};
///
/// let decoder = Decoder::with_options(DecoderOptions { max_depth: 8 });
/// ```
///
/// [`Decoder`]: crate::Decoder
#[derive(Debug, Clone, Copy)]
pub struct DecoderOptions {
    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// Entering a container beyond this depth fails with
    /// [`Error::DepthOverflow`]. The per-level phase storage is allocated
    /// once, at this size, when the decoder is constructed.
    ///
    /// # Default
    ///
    /// `64`
    ///
    /// [`Error::DepthOverflow`]: crate::Error::DepthOverflow
    pub max_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

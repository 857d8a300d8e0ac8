use thiserror::Error;

/// Pixel decode errors.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("expected byte length: {0}, actual byte length: {1}")]
    ExpectedByteMismatch(usize, usize),
    #[error("unsupported number of bits allocated per pixel: {0}")]
    UnsupportedNumberOfBits(u16),
    #[error("high bit for an 8-bit mask is out of bound: {0}")]
    U8MaskHighBitOutOfBound(u8),
    #[error("high bit for a 16-bit mask is out of bound: {0}")]
    U16MaskHighBitOutOfBound(u16),
}

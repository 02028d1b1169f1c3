use thiserror::Error;

/// Everything that can go wrong while turning bmp bytes into a raster.
///
/// None of these are recoverable by retrying; each one is terminal for the
/// call that produced it.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum Error {
    #[error( "Buffer truncated: need {offset} bytes, have {len}" )]
    Truncated { offset: usize, len: usize },

    #[error( "Invalid file signature 0x{0:04X}" )]
    InvalidSignature( u16 ),

    #[error( "Unsupported bits per pixel {0}" )]
    UnsupportedBitDepth( u16 ),

    #[error( "Invalid image dimensions {width}x{height}" )]
    InvalidDimensions { width: i32, height: i32 },

    #[error( "Pixel count mismatch: expected {expected}, got {actual}" )]
    LengthMismatch { expected: usize, actual: usize },

    #[error( "Read of {width} bytes at offset {offset} is out of range for {len} bytes" )]
    OutOfRange { offset: usize, width: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = Error::InvalidSignature( 0xFFFF );
        assert_eq!( err.to_string(), "Invalid file signature 0xFFFF" );

        let err = Error::OutOfRange { offset: 9, width: 2, len: 10 };
        assert_eq!(
            err.to_string(),
            "Read of 2 bytes at offset 9 is out of range for 10 bytes" );

        let err = Error::Truncated { offset: 14, len: 13 };
        assert_eq!( err.to_string(), "Buffer truncated: need 14 bytes, have 13" );

        let err = Error::InvalidDimensions { width: 2, height: -2 };
        assert_eq!( err.to_string(), "Invalid image dimensions 2x-2" );
    }
}

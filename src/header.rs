//! # header
//!
//! The 14 byte file header and the 40 byte info header that precede the
//! pixel data of a bmp file.
use log::{
    debug,
    warn,
};

use crate::endian::{
    read_i32_le,
    read_u16_le,
    read_u32_le,
};

use crate::error::{
    Error,
    Result,
};

/// "BM" read as a little-endian 16-bit value.
pub const SIGNATURE: u16 = 0x4D42;

/// The only bit depth this decoder understands.
pub const SUPPORTED_BIT_COUNT: u16 = 24;

pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;

/// Offset of the first pixel byte in a file without a palette or extra masks.
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

const SIGNATURE_POSITION: usize = 0x00;
const FILE_SIZE_POSITION: usize = 0x02;
const DATA_OFFSET_POSITION: usize = 0x0A;
const WIDTH_POSITION: usize = 0x12;
const HEIGHT_POSITION: usize = 0x16;
const BIT_COUNT_POSITION: usize = 0x1C;

#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct FileHeader {
    pub signature: u16,
    pub file_size: u32,
    /// Absolute offset of the pixel data from the start of the file.
    pub data_offset: u32,
}

#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct InfoHeader {
    pub width: i32,
    /// Positive for bottom-up storage, the only layout accepted.
    pub height: i32,
    pub bit_count: u16,
}

fn require( buf: &[u8], size: usize ) -> Result<()> {
    if buf.len() < size {
        warn!( "Rejecting header: {} bytes, need {}", buf.len(), size );
        return Err( Error::Truncated { offset: size, len: buf.len() } );
    }
    Ok( () )
}

/// Parses the file header at the start of `buf`.
pub fn parse_file_header( buf: &[u8] ) -> Result<FileHeader> {
    require( buf, FILE_HEADER_SIZE )?;

    let signature = read_u16_le( buf, SIGNATURE_POSITION )?;
    if signature != SIGNATURE {
        warn!( "Rejecting file: signature 0x{:04X}", signature );
        return Err( Error::InvalidSignature( signature ) );
    }

    let file_size = read_u32_le( buf, FILE_SIZE_POSITION )?;
    let data_offset = read_u32_le( buf, DATA_OFFSET_POSITION )?;

    debug!(
        "File header: signature 0x{:04X}, file size {}, data offset {}",
        signature, file_size, data_offset );

    Ok( FileHeader { signature, file_size, data_offset } )
}

/// Parses the info header that directly follows the file header.
///
/// Only 24-bit images stored bottom-up with a positive width pass; top-down
/// images (negative height) are reported as `InvalidDimensions`.
pub fn parse_info_header( buf: &[u8] ) -> Result<InfoHeader> {
    require( buf, HEADERS_SIZE )?;

    let width = read_i32_le( buf, WIDTH_POSITION )?;
    let height = read_i32_le( buf, HEIGHT_POSITION )?;
    let bit_count = read_u16_le( buf, BIT_COUNT_POSITION )?;

    debug!( "Info header: width {}, height {}, bit count {}", width, height, bit_count );

    if bit_count != SUPPORTED_BIT_COUNT {
        warn!( "Rejecting image: {} bits per pixel", bit_count );
        return Err( Error::UnsupportedBitDepth( bit_count ) );
    }

    if width <= 0 || height <= 0 {
        warn!( "Rejecting image: dimensions {}x{}", width, height );
        return Err( Error::InvalidDimensions { width, height } );
    }

    Ok( InfoHeader { width, height, bit_count } )
}

/// Cheap check for the "BM" magic without parsing anything else.
pub fn is_bmp( buf: &[u8] ) -> bool {
    buf.starts_with( b"BM" )
}

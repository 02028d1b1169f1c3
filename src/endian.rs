//! # endian
//!
//! Fixed-width little-endian integer reads at arbitrary offsets of a byte
//! buffer. The buffer is never modified and byte values are taken as-is.
use byteorder::{
    ByteOrder,
    LittleEndian,
};

use crate::error::{
    Error,
    Result,
};

fn field( buf: &[u8], offset: usize, width: usize ) -> Result<&[u8]> {
    offset.checked_add( width )
        .and_then( | end | buf.get( offset..end ) )
        .ok_or( Error::OutOfRange { offset, width, len: buf.len() } )
}

/// Reads an unsigned 16-bit value from `buf[offset..offset + 2]`.
pub fn read_u16_le( buf: &[u8], offset: usize ) -> Result<u16> {
    Ok( LittleEndian::read_u16( field( buf, offset, 2 )? ) )
}

/// Reads an unsigned 32-bit value from `buf[offset..offset + 4]`.
pub fn read_u32_le( buf: &[u8], offset: usize ) -> Result<u32> {
    Ok( LittleEndian::read_u32( field( buf, offset, 4 )? ) )
}

/// Reads a two's-complement signed 32-bit value from `buf[offset..offset + 4]`.
pub fn read_i32_le( buf: &[u8], offset: usize ) -> Result<i32> {
    Ok( LittleEndian::read_i32( field( buf, offset, 4 )? ) )
}

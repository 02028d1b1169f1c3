//! # pixels
//!
//! Pulls 24-bit pixel rows out of the bmp pixel data and puts them into
//! display order.
use std::convert::TryFrom;

use log::trace;

use crate::error::{
    Error,
    Result,
};

const BYTES_PER_PIXEL: u64 = 3;

#[derive( Debug, Default, Clone, Copy, PartialEq, Eq, Hash )]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new( r: u8, g: u8, b: u8 ) -> Pixel {
        Pixel { r, g, b }
    }

    /// Builds a pixel from the on-disk blue, green, red triple.
    fn from_bgr( bytes: &[u8] ) -> Pixel {
        Pixel { r: bytes[2], g: bytes[1], b: bytes[0] }
    }
}

/// Byte length of one stored scanline of `width` pixels, padding included.
///
/// Rows are padded to a multiple of four bytes.
pub fn stride( width: u32 ) -> u64 {
    ( ( u64::from( width ) * BYTES_PER_PIXEL + 3 ) / 4 ) * 4
}

/// Offset one past the last pixel byte, or `None` if it can't be represented.
fn pixel_data_end( data_offset: u32, width: u32, height: u32 ) -> Option<u64> {
    if width == 0 || height == 0 {
        return Some( u64::from( data_offset ) );
    }

    // The padding of the last stored row is never read.
    u64::from( height - 1 )
        .checked_mul( stride( width ) )?
        .checked_add( u64::from( width ) * BYTES_PER_PIXEL )?
        .checked_add( u64::from( data_offset ) )
}

/// Extracts `width * height` pixels starting at `data_offset`.
///
/// The result is row-major with the top-left pixel first. Stored row `r`
/// lands on display row `height - 1 - r`.
pub fn extract_pixels( buf: &[u8], data_offset: u32, width: u32, height: u32 ) -> Result<Vec<Pixel>> {
    let end = pixel_data_end( data_offset, width, height )
        .ok_or( Error::Truncated { offset: usize::max_value(), len: buf.len() } )?;

    if end > buf.len() as u64 {
        return Err( Error::Truncated {
            offset: usize::try_from( end ).unwrap_or( usize::max_value() ),
            len: buf.len(),
        } );
    }

    // Everything below is bounded by `end`, which fits in the buffer.
    let stride = stride( width ) as usize;
    let data_offset = data_offset as usize;
    let width = width as usize;
    let height = height as usize;
    let row_bytes = width * BYTES_PER_PIXEL as usize;

    trace!(
        "Extracting {}x{} pixels, stride {}, bytes {}..{}",
        width, height, stride, data_offset, end );

    let mut pixels = vec![ Pixel::default(); width * height ];

    for disk_row in 0..height {
        let display_row = height - 1 - disk_row;
        let start = data_offset + disk_row * stride;

        let source = buf[ start..start + row_bytes ].chunks( BYTES_PER_PIXEL as usize );
        let target = &mut pixels[ display_row * width..( display_row + 1 ) * width ];

        for ( pixel, bytes ) in target.iter_mut().zip( source ) {
            *pixel = Pixel::from_bgr( bytes );
        }
    }

    Ok( pixels )
}

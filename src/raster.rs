//! # raster
//!
//! Dense RGBA buffers ready to be handed to a display surface.
use log::trace;

use crate::error::{
    Error,
    Result,
};
use crate::pixels::Pixel;
use crate::Surface;

pub const CHANNELS: usize = 4;

const OPAQUE: u8 = 255;

/// Packs row-major pixels into `R, G, B, A` bytes with alpha fixed at 255.
pub fn pack_raster( pixels: &[Pixel], width: u32, height: u32 ) -> Result<Vec<u8>> {
    let expected = ( width as usize ).checked_mul( height as usize )
        .unwrap_or( usize::max_value() );

    if pixels.len() != expected {
        return Err( Error::LengthMismatch { expected, actual: pixels.len() } );
    }

    trace!( "Packing {}x{} pixels", width, height );

    let mut raster = Vec::with_capacity( pixels.len() * CHANNELS );
    for pixel in pixels {
        raster.extend_from_slice( &[ pixel.r, pixel.g, pixel.b, OPAQUE ] );
    }

    Ok( raster )
}

/// A surface that keeps whatever is drawn on it in memory.
#[derive( Debug, Default, Clone, PartialEq, Eq )]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new() -> Canvas {
        Canvas::default()
    }

    pub fn width( &self ) -> u32 {
        self.width
    }

    pub fn height( &self ) -> u32 {
        self.height
    }

    pub fn data( &self ) -> &[u8] {
        &self.data
    }

    /// The RGBA value at column `x` of row `y`, counted from the top-left.
    pub fn pixel( &self, x: u32, y: u32 ) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = ( y as usize * self.width as usize + x as usize ) * CHANNELS;
        let bytes = self.data.get( index..index + CHANNELS )?;

        Some( [ bytes[0], bytes[1], bytes[2], bytes[3] ] )
    }
}

impl Surface for Canvas {
    type TResult = Canvas;

    fn set_size( &mut self, width: u32, height: u32 ) {
        self.width = width;
        self.height = height;
        self.data.clear();
    }

    fn draw( &mut self, raster: &[u8] ) {
        self.data.clear();
        self.data.extend_from_slice( raster );
    }

    fn build( self ) -> Result<Canvas> {
        Ok( self )
    }
}

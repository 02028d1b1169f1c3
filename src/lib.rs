//! # bmp_view
//!
//! A decoder for 24-bit uncompressed Microsoft *bmp* files that turns the
//! stored pixel data into a top-down RGBA raster.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::fs;
//! use bmp_view::{
//!     Result,
//!     Surface,
//! };
//!
//! struct Window {
//!     // Your display surface
//! }
//!
//! impl Surface for Window {
//!     type TResult = ();
//!
//!     fn set_size( &mut self, width: u32, height: u32 ) {
//!         // Resize the surface to match the image
//!     }
//!
//!     fn draw( &mut self, raster: &[u8] ) {
//!         // Blit the RGBA bytes, row by row from the top-left
//!     }
//!
//!     fn build( self ) -> Result<Self::TResult> {
//!         Ok( () )
//!     }
//! }
//!
//! fn main() {
//!     let data = fs::read( "image.bmp" ).unwrap();
//!     bmp_view::render( &data, Window { } ).unwrap();
//! }
//! ```
//!
//! Every step is also available on its own: [`parse_file_header`],
//! [`parse_info_header`], [`extract_pixels`] and [`pack_raster`].
//!
extern crate byteorder;

mod endian;
mod error;
mod header;
mod pixels;
mod raster;

pub use crate::endian::{
    read_i32_le,
    read_u16_le,
    read_u32_le,
};
pub use crate::error::{
    Error,
    Result,
};
pub use crate::header::{
    is_bmp,
    parse_file_header,
    parse_info_header,
    FileHeader,
    InfoHeader,
    SIGNATURE,
};
pub use crate::pixels::{
    extract_pixels,
    stride,
    Pixel,
};
pub use crate::raster::{
    pack_raster,
    Canvas,
};

/// Something a decoded raster can be presented on.
pub trait Surface {
    type TResult;

    fn set_size( &mut self, width: u32, height: u32 );
    fn draw( &mut self, raster: &[u8] );
    fn build( self ) -> Result<Self::TResult>;
}

/// A fully decoded image.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Bitmap {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    pub fn width( &self ) -> u32 {
        self.info_header.width as u32
    }

    pub fn height( &self ) -> u32 {
        self.info_header.height as u32
    }

    /// Pixels in display order, top-left first.
    pub fn pixels( &self ) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels( self ) -> Vec<Pixel> {
        self.pixels
    }

    pub fn to_raster( &self ) -> Result<Vec<u8>> {
        pack_raster( &self.pixels, self.width(), self.height() )
    }
}

/// Parses both headers and extracts the pixels of a complete bmp file.
pub fn decode( buf: &[u8] ) -> Result<Bitmap> {
    let file_header = parse_file_header( buf )?;
    let info_header = parse_info_header( buf )?;

    // Both dimensions are known to be positive at this point.
    let pixels = extract_pixels(
        buf,
        file_header.data_offset,
        info_header.width as u32,
        info_header.height as u32 )?;

    Ok( Bitmap { file_header, info_header, pixels } )
}

/// Decodes `buf` and presents it on `surface`.
///
/// The surface is only touched once decoding and packing both succeeded.
pub fn render<TSurface: Surface>( buf: &[u8], mut surface: TSurface ) -> Result<TSurface::TResult> {
    let bitmap = decode( buf )?;
    let raster = bitmap.to_raster()?;

    surface.set_size( bitmap.width(), bitmap.height() );
    surface.draw( &raster );
    surface.build()
}

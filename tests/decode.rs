extern crate bmp_view;
extern crate byteorder;

use std::io::Write;

use byteorder::{
    LittleEndian,
    WriteBytesExt,
};

use bmp_view::{
    Canvas,
    Error,
    Pixel,
    Result,
    Surface,
};

const RED: Pixel = Pixel::new( 0xFF, 0x00, 0x00 );
const GREEN: Pixel = Pixel::new( 0x00, 0xFF, 0x00 );
const BLUE: Pixel = Pixel::new( 0x00, 0x00, 0xFF );
const WHITE: Pixel = Pixel::new( 0xFF, 0xFF, 0xFF );

/// Writes a complete 24-bit file; `rows` are given top row first.
fn encode( width: i32, height: i32, bit_count: u16, gap: usize, rows: &[Vec<Pixel>] ) -> Vec<u8> {
    let stride = bmp_view::stride( width.max( 0 ) as u32 ) as usize;
    let data_offset = 54 + gap;
    let image_size = stride * rows.len();

    let mut out = Vec::new();
    out.write_all( b"BM" ).unwrap();
    out.write_u32::<LittleEndian>( ( data_offset + image_size ) as u32 ).unwrap();
    out.write_u32::<LittleEndian>( 0 ).unwrap();
    out.write_u32::<LittleEndian>( data_offset as u32 ).unwrap();

    out.write_u32::<LittleEndian>( 40 ).unwrap();
    out.write_i32::<LittleEndian>( width ).unwrap();
    out.write_i32::<LittleEndian>( height ).unwrap();
    out.write_u16::<LittleEndian>( 1 ).unwrap();
    out.write_u16::<LittleEndian>( bit_count ).unwrap();
    out.write_u32::<LittleEndian>( 0 ).unwrap();
    out.write_u32::<LittleEndian>( image_size as u32 ).unwrap();
    for _ in 0..4 {
        out.write_u32::<LittleEndian>( 0 ).unwrap();
    }

    out.extend( std::iter::repeat( 0xCC ).take( gap ) );

    for row in rows.iter().rev() {
        let start = out.len();
        for pixel in row {
            out.write_all( &[ pixel.b, pixel.g, pixel.r ] ).unwrap();
        }
        while out.len() - start < stride {
            out.push( 0 );
        }
    }

    out
}

fn sample() -> Vec<u8> {
    encode( 2, 2, 24, 0, &[ vec![ GREEN, WHITE ], vec![ RED, BLUE ] ] )
}

#[test]
fn sample_layout_matches_the_reference_bytes() {
    let buf = sample();

    assert_eq!( buf.len(), 70 );
    assert_eq!( &buf[54..], &[
        0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00,
        0x00, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0x00, 0x00,
    ] );
}

#[test]
fn headers_of_the_sample() {
    let buf = sample();

    let file = bmp_view::parse_file_header( &buf ).unwrap();
    assert_eq!( file.signature, bmp_view::SIGNATURE );
    assert_eq!( file.data_offset, 54 );
    assert_eq!( file.file_size, 70 );

    let info = bmp_view::parse_info_header( &buf ).unwrap();
    assert_eq!( ( info.width, info.height, info.bit_count ), ( 2, 2, 24 ) );
}

#[test]
fn decodes_end_to_end() {
    let bitmap = bmp_view::decode( &sample() ).unwrap();

    assert_eq!( bitmap.width(), 2 );
    assert_eq!( bitmap.height(), 2 );
    assert_eq!( bitmap.pixels(), &[ GREEN, WHITE, RED, BLUE ] );
    assert_eq!( bitmap.to_raster().unwrap(), vec![
        0, 255, 0, 255,
        255, 255, 255, 255,
        255, 0, 0, 255,
        0, 0, 255, 255,
    ] );
}

#[test]
fn step_by_step_matches_decode() {
    let buf = sample();

    let file = bmp_view::parse_file_header( &buf ).unwrap();
    let info = bmp_view::parse_info_header( &buf ).unwrap();
    let pixels = bmp_view::extract_pixels(
        &buf, file.data_offset, info.width as u32, info.height as u32 ).unwrap();

    assert_eq!( pixels, bmp_view::decode( &buf ).unwrap().into_pixels() );
}

#[test]
fn pixel_data_after_a_gap() {
    let buf = encode( 2, 2, 24, 10, &[ vec![ GREEN, WHITE ], vec![ RED, BLUE ] ] );
    let bitmap = bmp_view::decode( &buf ).unwrap();

    assert_eq!( bitmap.file_header.data_offset, 64 );
    assert_eq!( bitmap.pixels(), &[ GREEN, WHITE, RED, BLUE ] );
}

#[test]
fn odd_width_image() {
    // 3 pixels per row, 9 bytes, stride 12
    let rows: Vec<Vec<Pixel>> = ( 0..5u8 )
        .map( | y | ( 0..3u8 ).map( | x | Pixel::new( y, x, y ^ x ) ).collect() )
        .collect();
    let buf = encode( 3, 5, 24, 0, &rows );

    assert_eq!( buf.len(), 54 + 12 * 5 );

    let bitmap = bmp_view::decode( &buf ).unwrap();
    let expected: Vec<Pixel> = rows.into_iter().flatten().collect();
    assert_eq!( bitmap.pixels(), &expected[..] );
}

#[test]
fn missing_final_padding_still_decodes() {
    let mut buf = sample();
    buf.truncate( buf.len() - 2 );

    let bitmap = bmp_view::decode( &buf ).unwrap();
    assert_eq!( bitmap.pixels(), &[ GREEN, WHITE, RED, BLUE ] );
}

#[test]
fn cut_inside_a_pixel() {
    let mut buf = sample();
    buf.truncate( buf.len() - 3 );

    assert_eq!( bmp_view::decode( &buf ), Err( Error::Truncated { offset: 68, len: 67 } ) );
}

#[test]
fn header_errors_stop_decoding() {
    let mut buf = sample();
    buf[0] = 0xFF;
    buf[1] = 0xFF;
    assert_eq!( bmp_view::decode( &buf ), Err( Error::InvalidSignature( 0xFFFF ) ) );

    let buf = encode( 2, 2, 16, 0, &[] );
    assert_eq!( bmp_view::decode( &buf ), Err( Error::UnsupportedBitDepth( 16 ) ) );

    let buf = encode( 2, -2, 24, 0, &[ vec![ GREEN, WHITE ], vec![ RED, BLUE ] ] );
    assert_eq!(
        bmp_view::decode( &buf ),
        Err( Error::InvalidDimensions { width: 2, height: -2 } ) );

    assert_eq!(
        bmp_view::decode( &sample()[..20] ),
        Err( Error::Truncated { offset: 54, len: 20 } ) );
}

#[test]
fn header_says_more_rows_than_stored() {
    let buf = encode( 2, 3, 24, 0, &[ vec![ GREEN, WHITE ], vec![ RED, BLUE ] ] );

    match bmp_view::decode( &buf ) {
        Err( Error::Truncated { len: 70, .. } ) => {},
        other => panic!( "unexpected {:?}", other ),
    }
}

#[test]
fn renders_onto_a_canvas() {
    let canvas = bmp_view::render( &sample(), Canvas::new() ).unwrap();

    assert_eq!( ( canvas.width(), canvas.height() ), ( 2, 2 ) );
    assert_eq!( canvas.pixel( 0, 0 ), Some( [ 0, 255, 0, 255 ] ) );
    assert_eq!( canvas.pixel( 1, 0 ), Some( [ 255, 255, 255, 255 ] ) );
    assert_eq!( canvas.pixel( 0, 1 ), Some( [ 255, 0, 0, 255 ] ) );
    assert_eq!( canvas.pixel( 1, 1 ), Some( [ 0, 0, 255, 255 ] ) );
}

struct Recorder<'a> {
    calls: &'a mut Vec<&'static str>,
}

impl<'a> Surface for Recorder<'a> {
    type TResult = ();

    fn set_size( &mut self, _: u32, _: u32 ) {
        self.calls.push( "set_size" );
    }

    fn draw( &mut self, _: &[u8] ) {
        self.calls.push( "draw" );
    }

    fn build( mut self ) -> Result<()> {
        self.calls.push( "build" );
        Ok( () )
    }
}

#[test]
fn failed_decode_never_touches_the_surface() {
    let mut calls = Vec::new();
    let mut buf = sample();
    buf.truncate( 60 );

    let result = bmp_view::render( &buf, Recorder { calls: &mut calls } );
    assert!( result.is_err() );
    assert!( calls.is_empty() );

    let result = bmp_view::render( &sample(), Recorder { calls: &mut calls } );
    assert!( result.is_ok() );
    assert_eq!( calls, vec![ "set_size", "draw", "build" ] );
}

#[test]
fn independent_buffers_decode_in_parallel() {
    let handles: Vec<_> = ( 1..5u8 )
        .map( | n | std::thread::spawn( move || {
            let row = vec![ Pixel::new( n, n, n ); n as usize ];
            let rows = vec![ row; n as usize ];
            let buf = encode( n as i32, n as i32, 24, 0, &rows );
            bmp_view::decode( &buf ).map( | b | b.into_pixels() )
        } ) )
        .collect();

    for ( n, handle ) in ( 1..5u8 ).zip( handles ) {
        let pixels = handle.join().unwrap().unwrap();
        assert_eq!( pixels.len(), ( n as usize ) * ( n as usize ) );
        assert!( pixels.iter().all( | p | *p == Pixel::new( n, n, n ) ) );
    }
}

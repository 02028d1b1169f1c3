#[macro_use] extern crate log;
extern crate bmp_view;
extern crate clap;
extern crate env_logger;

use std::error::Error;
use std::fs::{
    self,
    File,
};
use std::io::{
    self,
    BufRead,
    Read,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::exit;

use clap::Parser;

use bmp_view::{
    Canvas,
    Pixel,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

/// A 2x2 image: green and white on top, red and blue below.
const SAMPLE: [u8; 70] = [
    // file header
    0x42, 0x4D,
    0x46, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x36, 0x00, 0x00, 0x00,
    // info header
    0x28, 0x00, 0x00, 0x00,
    0x02, 0x00, 0x00, 0x00,
    0x02, 0x00, 0x00, 0x00,
    0x01, 0x00,
    0x18, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x10, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    // bottom row: red, blue, padding
    0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00,
    // top row: green, white, padding
    0x00, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0x00, 0x00,
];

/// Without arguments an interactive menu is read from stdin.
#[derive( Debug, Parser )]
#[command( name = "bmpview" )]
#[command( version, about = "Bitmap viewer for 24-bit uncompressed bmp files", long_about = None )]
#[command( after_help = "Set RUST_LOG=debug to see the parsed headers." )]
struct Args {
    /// List the bmp files in a directory
    #[arg( short, long, value_name = "DIR", conflicts_with_all = [ "test", "files" ] )]
    list: Option<PathBuf>,

    /// Decode a built-in 2x2 sample image
    #[arg( short, long, conflicts_with = "files" )]
    test: bool,

    /// Bmp files to decode
    files: Vec<PathBuf>,
}

fn format_pixel( pixel: &Pixel ) -> String {
    format!( "({}, {}, {})", pixel.r, pixel.g, pixel.b )
}

fn has_bmp_extension( path: &Path ) -> bool {
    path.extension()
        .map( | ext | ext.eq_ignore_ascii_case( "bmp" ) )
        .unwrap_or( false )
}

fn has_bmp_signature( path: &Path ) -> io::Result<bool> {
    let mut magic = Vec::with_capacity( 2 );
    File::open( path )?.take( 2 ).read_to_end( &mut magic )?;
    Ok( bmp_view::is_bmp( &magic ) )
}

/// The `*.bmp` files of `dir`, sorted by name.
fn bmp_files( dir: &Path ) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir( dir )? {
        let path = entry?.path();
        if path.is_file() && has_bmp_extension( &path ) {
            files.push( path );
        }
    }

    if files.is_empty() {
        return Err( format!( "No bmp files found in {}", dir.display() ).into() );
    }

    files.sort();
    Ok( files )
}

fn list<W: Write>( dir: &Path, out: &mut W ) -> CliResult<Vec<PathBuf>> {
    let files = bmp_files( dir )?;

    writeln!( out, "Bmp files in {}:", dir.display() )?;
    for ( i, path ) in files.iter().enumerate() {
        let size = fs::metadata( path )?.len();
        let note = if has_bmp_signature( path )? { "" } else { ", no bmp signature" };
        writeln!( out, "  {}. {} ({} bytes{})", i + 1, path.display(), size, note )?;
    }

    Ok( files )
}

fn self_test<W: Write>( out: &mut W ) -> CliResult<()> {
    let bitmap = bmp_view::decode( &SAMPLE )?;
    let width = bitmap.width() as usize;

    writeln!( out, "Sample: {}x{}", bitmap.width(), bitmap.height() )?;
    for ( y, row ) in bitmap.pixels().chunks( width ).enumerate() {
        let row: Vec<String> = row.iter().map( format_pixel ).collect();
        writeln!( out, "  row {}: {}", y, row.join( " " ) )?;
    }

    let raster = bitmap.to_raster()?;
    writeln!( out, "  raster: {:?}", raster )?;
    Ok( () )
}

fn show<W: Write>( path: &Path, out: &mut W ) -> CliResult<()> {
    let data = fs::read( path )?;
    debug!( "Read {} bytes from {}", data.len(), path.display() );

    let canvas = bmp_view::render( &data, Canvas::new() )?;
    let pixels = canvas.data().len() / 4;

    writeln!( out, "{}: {}x{}, {} pixels", path.display(), canvas.width(), canvas.height(), pixels )?;
    if let Some( [ r, g, b, _ ] ) = canvas.pixel( 0, 0 ) {
        writeln!( out, "  top-left: ({}, {}, {})", r, g, b )?;
    }
    Ok( () )
}

fn read_choice<R: BufRead>( input: &mut R ) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line( &mut line )? == 0 {
        return Ok( None );
    }
    Ok( Some( line.trim().to_string() ) )
}

fn pick_and_show<R: BufRead, W: Write>( dir: &Path, input: &mut R, out: &mut W ) -> CliResult<()> {
    let files = list( dir, out )?;

    write!( out, "Enter file number: " )?;
    out.flush()?;

    let choice = read_choice( input )?.unwrap_or_default();
    let path = choice.parse::<usize>().ok()
        .and_then( | n | n.checked_sub( 1 ) )
        .and_then( | i | files.get( i ) )
        .ok_or_else( || format!( "Invalid file number {:?}", choice ) )?;

    show( path, out )
}

/// Menu loop over `input`; ends on "4" or end of input.
fn interactive<R: BufRead, W: Write>( dir: &Path, input: &mut R, out: &mut W ) -> CliResult<()> {
    loop {
        writeln!( out )?;
        writeln!( out, "Options:" )?;
        writeln!( out, "  1. List bmp files in {}", dir.display() )?;
        writeln!( out, "  2. Load a file" )?;
        writeln!( out, "  3. Decode the built-in sample" )?;
        writeln!( out, "  4. Exit" )?;
        write!( out, "Enter your choice (1-4): " )?;
        out.flush()?;

        let choice = match read_choice( input )? {
            Some( choice ) => choice,
            None => break,
        };

        let result = match choice.as_str() {
            "1" => list( dir, out ).map( | _ | () ),
            "2" => pick_and_show( dir, input, out ),
            "3" => self_test( out ),
            "4" => break,
            _ => Err( format!( "Invalid choice {:?}, enter 1-4", choice ).into() ),
        };

        if let Err( err ) = result {
            writeln!( out, "Error: {}", err )?;
        }
    }

    writeln!( out, "Goodbye" )?;
    Ok( () )
}

fn run( args: Args ) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some( dir ) = args.list {
        return list( &dir, &mut out ).map( | _ | () );
    }

    if args.test {
        return self_test( &mut out );
    }

    if args.files.is_empty() {
        let stdin = io::stdin();
        return interactive( Path::new( "." ), &mut stdin.lock(), &mut out );
    }

    for file in &args.files {
        show( file, &mut out )
            .map_err( | err | format!( "{}: {}", file.display(), err ) )?;
    }
    Ok( () )
}

fn main() {
    env_logger::init();

    if let Err( err ) = run( Args::parse() ) {
        eprintln!( "Error: {}", err );
        exit( 1 );
    }
}

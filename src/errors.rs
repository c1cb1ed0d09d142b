// The Error, ErrorKind, ResultExt and Result types for the library.
// Other modules `use crate::errors::*;` to get at everything `error_chain!` creates.
#![allow(deprecated)]

use error_chain::*;

error_chain! {

    errors {
        InvalidDimension(columns: usize, rows: usize) {
            description("maze dimensions must be positive")
            display("invalid maze dimensions {} columns x {} rows, both must be positive", columns, rows)
        }
        CanvasTooLarge(columns: usize, rows: usize, cell_width: u32, cell_height: u32) {
            description("maze does not fit on a canvas")
            display("{} columns x {} rows of {}x{} pixel cells do not fit on a canvas", columns, rows, cell_width, cell_height)
        }
    }

    foreign_links {
        Io(::std::io::Error);
        ImageWrite(::image::ImageError);
    }
}

//! Just main(). Keep as small as possible.

// Attributes in `main.rs` have no effect on the library, so lint groups can be
// blanket-allowed here as long as the file stays minimal.
#![allow(clippy::cargo)]
#![allow(clippy::restriction)]

use postboard::utils::cli::run;

fn main() -> std::io::Result<()> {
    run()
}

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use waypoint_engine::{Snapshot, TextBuffer};

#[allow(dead_code)]
pub fn generate_text(lines: usize) -> String {
    "The quick brown fox jumps over the lazy dog.\n".repeat(lines)
}

/// Buffer with `versions` typing-style edits applied after the initial snapshot
#[allow(dead_code)]
pub fn edited_buffer(lines: usize, versions: usize) -> (TextBuffer, Snapshot) {
    let mut buffer = TextBuffer::new(&generate_text(lines));
    let initial = buffer.current_snapshot();

    for step in 0..versions {
        let at = (step * 37) % buffer.len();
        if step % 3 == 2 {
            buffer.delete(at..at + 1).unwrap();
        } else {
            buffer.insert(at, "x").unwrap();
        }
    }

    (buffer, initial)
}

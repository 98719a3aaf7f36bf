//! Indentation-aware line writer for emitted Rust.

const INDENT: &str = "    ";

/// Accumulates emitted lines at the current indentation.
///
/// Text passed to [`CodeWriter::line`] may span several lines (nested
/// closures, match arms); every line of it is indented, so compilers can
/// build multi-line expressions relative to column zero.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    indent: usize,
    lines: u32,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` followed by a line break.
    pub fn line(&mut self, text: &str) {
        for line in text.split('\n') {
            if !line.is_empty() {
                for _ in 0..self.indent {
                    self.buf.push_str(INDENT);
                }
                self.buf.push_str(line);
            }
            self.buf.push('\n');
            self.lines += 1;
        }
    }

    pub fn blank_line(&mut self) {
        self.buf.push('\n');
        self.lines += 1;
    }

    /// Run `f` one indentation level deeper.
    pub fn indented<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        result
    }

    /// 1-based number of the next line to be written.
    pub fn current_line(&self) -> u32 {
        self.lines + 1
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

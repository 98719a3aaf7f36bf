//! Append-only HTML sink.

use crate::escape::escape_into;
use std::fmt;
use std::rc::Rc;

/// Accumulates the HTML produced by one render.
///
/// One writer backs one render and is discarded afterwards; it is never
/// shared between threads.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: String,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that starts with `<!DOCTYPE html>`.
    pub fn with_doctype() -> Self {
        Self {
            buf: String::from("<!DOCTYPE html>"),
        }
    }

    /// Append markup exactly as given.
    pub fn append_raw(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Append text, HTML-escaped.
    pub fn append_text(&mut self, s: &str) -> &mut Self {
        escape_into(&mut self.buf, s);
        self
    }

    /// Append any renderable value.
    pub fn append<T: Render + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.render(self);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the accumulated HTML.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Render
// ══════════════════════════════════════════════════════════════════════════════

/// A value that can be written into markup.
///
/// Booleans and absent values write nothing, text is escaped, numbers use
/// their display form.
pub trait Render {
    fn render(&self, w: &mut Writer);

    /// Write the value inside an attribute. Only differs for booleans,
    /// which print `true` / `false` there.
    fn render_attr(&self, w: &mut Writer) {
        self.render(w);
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, w: &mut Writer) {
        (**self).render(w);
    }

    fn render_attr(&self, w: &mut Writer) {
        (**self).render_attr(w);
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, w: &mut Writer) {
        (**self).render(w);
    }

    fn render_attr(&self, w: &mut Writer) {
        (**self).render_attr(w);
    }
}

impl<T: Render + ?Sized> Render for Rc<T> {
    fn render(&self, w: &mut Writer) {
        (**self).render(w);
    }

    fn render_attr(&self, w: &mut Writer) {
        (**self).render_attr(w);
    }
}

impl Render for bool {
    fn render(&self, _w: &mut Writer) {}

    fn render_attr(&self, w: &mut Writer) {
        w.append_raw(if *self { "true" } else { "false" });
    }
}

impl Render for () {
    fn render(&self, _w: &mut Writer) {}
}

impl Render for str {
    fn render(&self, w: &mut Writer) {
        w.append_text(self);
    }
}

impl Render for String {
    fn render(&self, w: &mut Writer) {
        w.append_text(self);
    }
}

impl Render for char {
    fn render(&self, w: &mut Writer) {
        let mut buf = [0u8; 4];
        w.append_text(self.encode_utf8(&mut buf));
    }
}

macro_rules! render_integer {
    ($($t:ty),*) => {
        $(
            impl Render for $t {
                fn render(&self, w: &mut Writer) {
                    use std::fmt::Write as _;
                    let _ = write!(w, "{}", self);
                }
            }
        )*
    };
}

render_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! render_float {
    ($($t:ty),*) => {
        $(
            impl Render for $t {
                fn render(&self, w: &mut Writer) {
                    use std::fmt::Write as _;
                    if *self == 0.0 {
                        // Covers -0, which JavaScript prints as 0.
                        w.append_raw("0");
                    } else if self.is_infinite() {
                        w.append_raw(if *self > 0.0 { "Infinity" } else { "-Infinity" });
                    } else {
                        let _ = write!(w, "{}", self);
                    }
                }
            }
        )*
    };
}

render_float!(f32, f64);

impl<T: Render> Render for Option<T> {
    fn render(&self, w: &mut Writer) {
        if let Some(v) = self {
            v.render(w);
        }
    }

    fn render_attr(&self, w: &mut Writer) {
        if let Some(v) = self {
            v.render_attr(w);
        }
    }
}

impl<T: Render> Render for [T] {
    fn render(&self, w: &mut Writer) {
        for item in self {
            item.render(w);
        }
    }
}

impl<T: Render> Render for Vec<T> {
    fn render(&self, w: &mut Writer) {
        self.as_slice().render(w);
    }
}

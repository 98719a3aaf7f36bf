//! Entry points that turn an [`Element`] into HTML.

use crate::{Element, Writer};
use std::future::Future;
use std::io;
use std::pin::Pin;

/// A boxed future, used for `Promise<T>` values outside return position.
pub type Task<T> = Pin<Box<dyn Future<Output = T>>>;

/// Box a future as a [`Task`].
pub fn task<F>(future: F) -> Task<F::Output>
where
    F: Future + 'static,
{
    Box::pin(future)
}

/// Render an element to a string.
pub fn render(element: &Element) -> String {
    let mut w = Writer::new();
    element.write_to(&mut w);
    w.finish()
}

/// Render an element as a full document, prefixed with `<!DOCTYPE html>`.
pub fn render_document(element: &Element) -> String {
    let mut w = Writer::with_doctype();
    element.write_to(&mut w);
    w.finish()
}

/// Render an element and write the HTML to `out`.
pub fn render_to(element: &Element, mut out: impl io::Write) -> io::Result<()> {
    out.write_all(render(element).as_bytes())?;
    out.flush()
}

/// Await an element, then render it synchronously.
pub async fn render_task(element: Task<Element>) -> String {
    let element = element.await;
    render(&element)
}

/// Receiver of the fragments a pass extracts.
///
/// A pass calls [`content`](ContentSink::content) once per matched element in
/// document order and then [`finished`](ContentSink::finished) exactly once.
/// A pass that fails does not call `finished`.
pub trait ContentSink {
    fn content(&mut self, html: &str, url: &str);

    fn finished(&mut self);
}

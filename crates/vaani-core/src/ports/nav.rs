//! Navigation port: how flows move the host to another page.

/// Browser-style navigation.
///
/// `go` is fire-and-forget: the host performs the navigation on its own
/// schedule, and the assistant session ends with the page it was started
/// on. A new session is activated after the next page settles.
pub trait Navigator: Send + Sync {
    fn go(&self, path: &str);
}

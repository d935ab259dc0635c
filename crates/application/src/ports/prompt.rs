//! Name prompt port

use std::future::Future;

/// Port for interactive name input.
///
/// Add and rename commands suspend until the user answers. `None`
/// means the prompt was cancelled; the router also treats an empty
/// answer as cancellation, aborting the command with no state change.
pub trait NamePrompt: Send + Sync {
    /// Asks the host to prompt the user for a name.
    ///
    /// `initial` pre-fills the input where the host supports it.
    fn request_name(
        &self,
        prompt: &str,
        initial: Option<&str>,
    ) -> impl Future<Output = Option<String>> + Send;
}

//! View sink port

use std::future::Future;

use crate::protocol::ViewPush;

/// Port for pushing state to the rendering surface.
///
/// Delivery is fire-and-forget: the router never waits for the view to
/// acknowledge, and a disconnected view must not fail a command.
pub trait ViewSink: Send + Sync {
    /// Delivers one push to the view.
    fn push(&self, push: ViewPush) -> impl Future<Output = ()> + Send;
}

//! Page-level side effects
//!
//! Login and logout leave the current page: login hands control to the
//! backend's login endpoint, logout throws away all client state. Front
//! ends decide what that means for them by implementing [`Navigator`].

/// Whole-page navigation performed on behalf of the session store
pub trait Navigator: Send + Sync {
    /// Leave the client and go to `url`
    fn redirect(&self, url: &str);

    /// Discard all in-memory client state and start over
    fn reload(&self);
}

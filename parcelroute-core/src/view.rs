//! Seam to whatever draws the route.

use crate::RouteResult;

/// Presents route results, typically as a map overlay.
///
/// The session always calls [`RouteView::retract`] before presenting a new
/// result, and whenever the current result becomes stale.
pub trait RouteView {
    /// Remove any route currently shown.
    fn retract(&mut self);

    /// Show `route`.
    fn present(&mut self, route: &RouteResult);
}

impl<V: RouteView + ?Sized> RouteView for Box<V> {
    fn retract(&mut self) {
        (**self).retract();
    }

    fn present(&mut self, route: &RouteResult) {
        (**self).present(route);
    }
}

/// View that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRouteView;

impl RouteView for NullRouteView {
    fn retract(&mut self) {}

    fn present(&mut self, _route: &RouteResult) {}
}

/// Constructs registry products.
///
/// Any `Fn() -> Box<P> + Send + Sync` closure is a factory, so most
/// registrations are one-liners:
///
/// ```rust,ignore
/// registry.register_element("circle", || Box::new(CircleRenderer) as Box<dyn GoalRenderer>);
/// ```
pub trait ElementFactory<P: ?Sized>: Send + Sync + 'static {
    fn construct(&self) -> Box<P>;
}

impl<P: ?Sized, F> ElementFactory<P> for F
where
    F: Fn() -> Box<P> + Send + Sync + 'static,
{
    fn construct(&self) -> Box<P> {
        self()
    }
}

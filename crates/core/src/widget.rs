/// Name-based lookup of toolkit widgets, supplied by the GUI collaborator.
///
/// The telemetry and rotation engines never see this trait; only the host
/// uses it to resolve the handful of widgets it needs (demo selectors,
/// graph areas) once at startup.
pub trait WidgetRegistry {
    /// Opaque toolkit handle.
    type Handle;

    /// Look up a widget by its layout name, e.g. `"demo_selection0"`.
    fn get(&self, name: &str) -> Option<Self::Handle>;

    /// Like [`get`](Self::get) but turns a missing widget into an error.
    fn require(&self, name: &str) -> crate::Result<Self::Handle> {
        self.get(name)
            .ok_or_else(|| crate::KioskError::Render(format!("widget '{name}' not found")))
    }
}

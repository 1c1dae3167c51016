//! The `Plugin` trait — the entry point every plugin implements.

use cs_task::TaskList;

use crate::{PluginRegistrar, PluginResult};

/// A bundle of extensions activated at start-up.
///
/// Plugins are linked into the host binary and handed to a
/// [`PluginLoader`][crate::PluginLoader]; a plugin becomes active only when a
/// manifest naming it is found on the plugin path.
///
/// Lifecycle:
///
/// 1. [`register`][Self::register] once, before the behavior is built: bind
///    goal renderers, task factories and pedestrian models.
/// 2. [`attach`][Self::attach] once per behavior graph, after it is built:
///    add tasks that should run regardless of what the behavior file says.
pub trait Plugin: Send + Sync + 'static {
    /// Name manifests refer to.  Must be unique among available plugins.
    fn name(&self) -> &str;

    /// Bind this plugin's extensions.  An error deactivates the plugin; the
    /// loader logs it and carries on.
    fn register(&self, registrar: &mut PluginRegistrar<'_>) -> PluginResult<()>;

    fn attach(&self, _tasks: &mut TaskList) {}
}

//! Init scripts for background services.
//!
//! Each service gets `etc/init.d/<unix-name>`, registered as a conffile,
//! enabled for the default runlevels on install and deregistered on purge.

use anyhow::Result;
use std::collections::BTreeMap;

use super::context::BuildContext;
use super::control::{ControlBuilder, Script};
use crate::common::create_file;
use crate::manifest::Service;
use crate::template::{self, INIT_SERVICE};

/// Seconds the init script waits between stop and start on restart.
pub const RESTART_WAIT_SECS: u32 = 2;

/// Staged path of the init script for `unix_name`.
pub fn init_script_path(unix_name: &str) -> String {
    format!("etc/init.d/{}", unix_name)
}

/// postinst fragment enabling the service.
pub fn enable_fragment(unix_name: &str) -> String {
    format!("update-rc.d {} defaults 91 09 >/dev/null", unix_name)
}

/// postrm fragment removing the runlevel links, only on purge.
pub fn purge_fragment(unix_name: &str) -> String {
    format!(
        "if [ \"$1\" = \"purge\" ] ; then\n    update-rc.d {} remove >/dev/null\nfi",
        unix_name
    )
}

/// Render the init script for `service`.
pub fn render_init_script(ctx: &BuildContext<'_>, service: &Service) -> String {
    let package = &ctx.manifest.package;
    let mut placeholders = BTreeMap::new();
    placeholders.insert("name", service.unix_name());
    placeholders.insert("displayName", package.application.clone());
    placeholders.insert("description", service.description.clone());
    placeholders.insert("wait", RESTART_WAIT_SECS.to_string());
    placeholders.insert("java", ctx.java.clone());
    placeholders.insert("startArguments", service.launch.runtime_arguments(package));
    template::render(INIT_SERVICE, &placeholders)
}

/// Stage the init script and register its control fragments.
///
/// Two services with the same unix name overwrite each other's script.
pub fn setup_service(
    ctx: &BuildContext<'_>,
    control: &mut ControlBuilder,
    service: &Service,
) -> Result<()> {
    let unix_name = service.unix_name();
    let script_path = init_script_path(&unix_name);

    create_file(&ctx.staging, &script_path, true, render_init_script(ctx, service))?;

    control.add_conf_file(script_path);
    control.add_fragment(Script::PostInst, enable_fragment(&unix_name));
    control.add_fragment(Script::PostRm, purge_fragment(&unix_name));

    tracing::info!("service '{}' -> etc/init.d/{}", service.name, unix_name);
    Ok(())
}

//! Desktop starters: a launcher in `usr/bin` plus a menu entry in
//! `usr/share/applications`.
//!
//! Starters contribute no conffiles and no maintainer script fragments.

use anyhow::Result;

use super::context::BuildContext;
use crate::common::create_file;
use crate::manifest::DesktopStarter;

pub fn launcher_path(unix_name: &str) -> String {
    format!("usr/bin/{}", unix_name)
}

pub fn desktop_entry_path(unix_name: &str) -> String {
    format!("usr/share/applications/{}.desktop", unix_name)
}

/// Shell launcher forwarding any caller arguments to the application.
pub fn render_launcher(ctx: &BuildContext<'_>, starter: &DesktopStarter) -> String {
    format!(
        "#!/bin/bash\n{} {} \"$@\"\n",
        ctx.java,
        starter.launch.runtime_arguments(&ctx.manifest.package)
    )
}

/// Menu entry. All lines use `\n`.
pub fn render_desktop_entry(starter: &DesktopStarter) -> String {
    let unix_name = starter.unix_name();
    format!(
        "[Desktop Entry]\n\
         Name={}\n\
         Comment={}\n\
         Exec=/{} %F\n\
         Terminal=false\n\
         StartupNotify=true\n\
         Type=Application\n",
        starter.name,
        starter.description.replace('\n', " "),
        launcher_path(&unix_name)
    )
}

pub fn setup_starter(ctx: &BuildContext<'_>, starter: &DesktopStarter) -> Result<()> {
    let unix_name = starter.unix_name();

    create_file(
        &ctx.staging,
        &launcher_path(&unix_name),
        true,
        render_launcher(ctx, starter),
    )?;
    create_file(
        &ctx.staging,
        &desktop_entry_path(&unix_name),
        false,
        render_desktop_entry(starter),
    )?;

    tracing::info!("starter '{}' -> usr/bin/{}", starter.name, unix_name);
    Ok(())
}

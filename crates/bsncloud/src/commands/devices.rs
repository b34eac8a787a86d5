//! Device (player) command handlers.

use tabled::Tabled;

use bsncloud_api::models::{NetworkInterfaceStatus, Player};
use bsncloud_api::{BsnClient, CancellationToken};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, or_dash};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Health")]
    health: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
    #[tabled(rename = "Presentation")]
    presentation: String,
    #[tabled(rename = "External IP")]
    external_ip: String,
}

impl From<&Player> for PlayerRow {
    fn from(p: &Player) -> Self {
        let status = p.status.as_ref();
        Self {
            serial: p.serial.clone(),
            name: p.display_name().to_owned(),
            model: p.model.to_string(),
            health: status.map_or_else(|| "-".into(), |s| s.health.to_string()),
            firmware: status
                .map(|s| or_dash(&s.firmware.version).to_owned())
                .unwrap_or_else(|| "-".into()),
            presentation: status
                .and_then(|s| s.presentation.first())
                .map_or_else(|| "-".into(), |pr| pr.name.clone()),
            external_ip: status
                .map(|s| or_dash(&s.network.external_ip).to_owned())
                .unwrap_or_else(|| "-".into()),
        }
    }
}

fn interface_line(iface: &NetworkInterfaceStatus) -> String {
    let ips = iface.ip();
    format!(
        "  {:<10} {:<9} {}",
        iface.name(),
        iface.type_name(),
        if ips.is_empty() {
            "-".to_owned()
        } else {
            ips.join(", ")
        }
    )
}

fn detail(p: &Player) -> String {
    let mut lines = vec![
        format!("ID:           {}", p.id),
        format!("Serial:       {}", p.serial),
        format!("Name:         {}", p.display_name()),
        format!("Model:        {}", p.model),
        format!("Family:       {}", p.family),
        format!("Registered:   {}", p.registration_date),
    ];

    if let Some(ref settings) = p.settings {
        lines.push(format!("Setup:        {}", settings.setup_type));
        lines.push(format!("Timezone:     {}", or_dash(&settings.timezone)));
        if let Some(ref group) = settings.group {
            lines.push(format!("Group:        {}", or_dash(&group.name)));
        }
        if !settings.beacons.is_empty() {
            let beacons: Vec<String> = settings
                .beacons
                .iter()
                .map(|b| format!("{} ({})", b.name(), b.mode()))
                .collect();
            lines.push(format!("Beacons:      {}", beacons.join(", ")));
        }
    }

    if let Some(ref status) = p.status {
        lines.push(format!("Health:       {}", status.health));
        lines.push(format!("Firmware:     {}", or_dash(&status.firmware.version)));
        lines.push(format!(
            "Script:       {} {}",
            status.script.script_type, status.script.version
        ));
        lines.push(format!("Uptime:       {}", or_dash(status.uptime.as_str())));
        for presentation in &status.presentation {
            lines.push(format!("Presentation: {}", presentation.name));
        }
        for storage in &status.storage {
            let access: Vec<String> = storage.access.iter().map(ToString::to_string).collect();
            lines.push(format!(
                "Storage:      {} {} [{}]",
                storage.interface,
                storage.system,
                access.join(", ")
            ));
        }
        lines.push(format!(
            "External IP:  {}",
            or_dash(&status.network.external_ip)
        ));
        if !status.network.interfaces.is_empty() {
            lines.push("Interfaces:".into());
            lines.extend(status.network.interfaces.iter().map(interface_line));
        }
    }

    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &BsnClient,
    cancel: &CancellationToken,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let players = client.list_devices_cancellable(cancel).await?;
            let out = output::render_list(&global.output, &players, |p| PlayerRow::from(p), |p| {
                p.serial.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { serial } => {
            let player = client
                .find_device_cancellable(&serial, cancel)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "device".into(),
                    identifier: serial.clone(),
                    list_command: "devices list".into(),
                })?;
            let out = output::render_single(&global.output, &player, detail, |p| {
                p.serial.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

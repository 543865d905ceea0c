//! storage-init-rs - boot-time storage provisioning planner
//!
//! Validates RAID/LVM topologies, renders the user-data scripts that set them
//! up at instance boot, and emits the matching block-storage volume requests.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use storage_init_rs::config::PlanConfig;
use storage_init_rs::topology::{self, Filesystem, RaidLevel, presets};
use storage_init_rs::{ProvisioningPlan, script, volume};

#[derive(Parser)]
#[command(name = "storage-init-rs")]
#[command(author, version, about = "Boot-time RAID/LVM provisioning planner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show capability metadata for a RAID level
    Describe {
        /// RAID level (0, 1, 5, 6, 10)
        level: u8,
    },
    /// Render the user-data script for a preset topology
    Preset {
        /// RAID level (0, 1, 5, 6, 10)
        level: u8,
        /// Write the script to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
        /// Emit the base64-encoded payload instead of plain text
        #[arg(long)]
        base64: bool,
    },
    /// Render a user-data script for a custom RAID topology
    Raid {
        /// RAID level (0, 1, 5, 6, 10)
        #[arg(long)]
        level: u8,
        /// Attachment device name (repeat per device)
        #[arg(long = "device", required = true)]
        devices: Vec<String>,
        #[arg(long, default_value = "/mnt/raid")]
        mount_point: String,
        #[arg(long, default_value = "ext4")]
        filesystem: Filesystem,
        #[arg(long)]
        output: Option<String>,
    },
    /// Render a user-data script for LVM capacity aggregation
    Lvm {
        /// Attachment device name (repeat per device)
        #[arg(long = "device", required = true)]
        devices: Vec<String>,
        #[arg(long, default_value = "/mnt/logical-volume")]
        mount_point: String,
        #[arg(long, default_value = "ext4")]
        filesystem: Filesystem,
        /// Volume group name
        #[arg(long, default_value = "storage_vg")]
        vg: String,
        /// Logical volume name
        #[arg(long, default_value = "storage_lv")]
        lv: String,
        #[arg(long)]
        output: Option<String>,
    },
    /// Emit volume requests as JSON
    Volumes {
        /// RAID level; omit with --device for an LVM volume set
        #[arg(long)]
        level: Option<u8>,
        /// Attachment device names for an LVM volume set
        #[arg(long = "device")]
        devices: Vec<String>,
        /// Size of each volume in GiB
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Member count (defaults to the level's recommended count)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Assemble a full provisioning plan from a plan file
    Plan {
        /// Path to the YAML plan file
        #[arg(long)]
        config: String,
        /// Write the plan JSON to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Render the RAID health-monitoring script
    Monitor {
        #[arg(long, default_value = "/dev/md0")]
        array_device: String,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

async fn emit(content: &str, output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Failed to write {path}"))?;
            info!("Wrote {path}");
        }
        None => print!("{content}"),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Describe { level } => {
            let caps = RaidLevel::try_from(level)?.capabilities();
            println!("{}", caps.description);
            println!("  Minimum volumes: {}", caps.min_volumes);
            println!("  Usable capacity: {}", caps.usable_capacity);
            println!("  Fault tolerance: {}", caps.fault_tolerance);
            println!("  Performance:     {}", caps.performance);
        }
        Commands::Preset {
            level,
            output,
            base64,
        } => {
            let topology = presets::for_level(RaidLevel::try_from(level)?);
            let user_data = script::raid::user_data(&topology);
            let payload = if base64 {
                script::user_data_base64(&user_data)
            } else {
                user_data
            };
            emit(&payload, output.as_deref()).await?;
        }
        Commands::Raid {
            level,
            devices,
            mount_point,
            filesystem,
            output,
        } => {
            let topology = presets::custom(
                RaidLevel::try_from(level)?,
                devices,
                mount_point,
                filesystem,
            )?;
            emit(&script::raid::user_data(&topology), output.as_deref()).await?;
        }
        Commands::Lvm {
            devices,
            mount_point,
            filesystem,
            vg,
            lv,
            output,
        } => {
            let topology =
                topology::LvmTopology::with_names(devices, mount_point, filesystem, vg, lv)?;
            emit(&script::lvm::user_data(&topology), output.as_deref()).await?;
        }
        Commands::Volumes {
            level,
            devices,
            size,
            count,
        } => {
            let volumes = match level {
                Some(level) => {
                    volume::volumes_for_raid(RaidLevel::try_from(level)?, size, count)?
                }
                None if !devices.is_empty() => volume::volumes_for_lvm(&devices, size),
                None => anyhow::bail!("Specify --level for RAID or --device for LVM volumes"),
            };
            println!("{}", serde_json::to_string_pretty(&volumes)?);
        }
        Commands::Plan { config, output } => {
            let content = tokio::fs::read_to_string(&config)
                .await
                .with_context(|| format!("Failed to read {config}"))?;
            let plan = ProvisioningPlan::from_config(PlanConfig::from_yaml(&content)?)?;
            info!(layout = %plan.layout, "Plan assembled");
            emit(&plan.to_json()?, output.as_deref()).await?;
        }
        Commands::Monitor { array_device } => {
            print!("{}", script::raid::monitoring_script(&array_device));
        }
    }

    Ok(())
}

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use unicode_width::UnicodeWidthStr;

use amiivault::api::VaultApi;
use amiivault::config::VaultConfig;
use amiivault::error::{Result, VaultError};
use amiivault::model::APPLICATION_AREA_SIZE;
use amiivault::store::fs::FileStore;
use amiivault::store::AmiiboStore;
use amiivault::tag_uuid;

mod args;

use args::{Cli, Commands};

struct AppContext {
    api: VaultApi<FileStore>,
    config: VaultConfig,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Show { amiibo_id } => handle_show(&ctx, &amiibo_id),
        Commands::List => handle_list(&ctx),
        Commands::Uuid { amiibo_id, random } => handle_uuid(&ctx, &amiibo_id, random),
        Commands::Register { amiibo_id, nickname } => handle_register(&ctx, &amiibo_id, nickname),
        Commands::AreaCreate {
            amiibo_id,
            area_id,
            data,
            file,
        } => handle_area_create(&ctx, &amiibo_id, area_id, data, file),
        Commands::AreaRead {
            amiibo_id,
            area_id,
            out,
        } => handle_area_read(&ctx, &amiibo_id, area_id, out),
        Commands::AreaWrite {
            amiibo_id,
            area_id,
            data,
            file,
        } => handle_area_write(&ctx, &amiibo_id, area_id, data, file),
        Commands::Path { amiibo_id } => handle_path(&ctx, &amiibo_id),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let base_dir = resolve_base_dir(cli)?;
    let config = VaultConfig::load(&base_dir)?;
    let api = VaultApi::new(FileStore::new(base_dir));
    Ok(AppContext { api, config })
}

/// Precedence: `--root`, then `$AMIIVAULT_HOME`, then the platform data dir.
fn resolve_base_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }
    if let Ok(home) = std::env::var("AMIIVAULT_HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    let dirs = ProjectDirs::from("com", "amiivault", "amiivault")
        .ok_or_else(|| VaultError::Usage("could not determine a data directory".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn handle_show(ctx: &AppContext, amiibo_id: &str) -> Result<()> {
    let record = ctx.api.store().load(amiibo_id)?;
    let info = ctx.api.get_common_info(amiibo_id)?;

    println!("{}", record.amiibo_id.bold());

    let uuid_line = if record.tag_uuid.is_empty() {
        "unassigned".dimmed().to_string()
    } else if tag_uuid::is_well_formed(&record.tag_uuid) {
        format!("{} {}", hex::encode(&record.tag_uuid), "(checksum ok)".green())
    } else {
        format!(
            "{} {}",
            hex::encode(&record.tag_uuid),
            "(checksum mismatch)".red()
        )
    };
    println!("  uuid:          {uuid_line}");
    println!("  write counter: {}", info.write_counter);
    println!(
        "  first write:   {}",
        record.first_write_date.format("%Y-%m-%d %H:%M")
    );
    println!(
        "  last write:    {} {}",
        record.last_write_date.format("%Y-%m-%d %H:%M"),
        format_time_ago(record.last_write_date).dimmed()
    );
    println!("  areas:         {}", record.application_areas.len());
    for area in &record.application_areas {
        println!("    {:#010x}  {} bytes", area.id, area.data.len());
    }
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let ids = ctx.api.store().list_ids()?;
    if ids.is_empty() {
        println!("No amiibo records found.");
        return Ok(());
    }

    let id_width = ids.iter().map(|id| id.width()).max().unwrap_or(0).max(12);
    for id in &ids {
        let record = ctx.api.store().load(id)?;
        let padding = " ".repeat(id_width.saturating_sub(id.width()));
        println!(
            "  {}{}  {:>2} areas  {:>5} writes  {}",
            id.bold(),
            padding,
            record.application_areas.len(),
            record.write_counter,
            format_time_ago(record.last_write_date).dimmed()
        );
    }
    Ok(())
}

fn handle_uuid(ctx: &AppContext, amiibo_id: &str, random: bool) -> Result<()> {
    let use_random = random || ctx.config.random_uuid;
    let uuid = ctx.api.generate_uuid(amiibo_id, use_random)?;
    println!("{}", hex::encode(uuid));
    Ok(())
}

fn handle_register(ctx: &AppContext, amiibo_id: &str, nickname: Option<String>) -> Result<()> {
    let nickname = nickname.unwrap_or_else(|| ctx.config.nickname.clone());
    let info = ctx.api.get_register_info(amiibo_id, &nickname)?;

    println!("mii nickname:  {}", info.mii.nickname.bold());
    println!("mii create id: {:#018x}", info.mii.create_id);
    println!("tag nickname:  {}", info.nickname_str());
    println!(
        "first write:   {:04}-{:02}-{:02}",
        info.first_write_year, info.first_write_month, info.first_write_day
    );
    println!("font region:   {}", info.font_region);
    Ok(())
}

fn handle_area_create(
    ctx: &AppContext,
    amiibo_id: &str,
    area_id: u32,
    data: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let payload = read_payload(data, file)?;
    if payload.len() > APPLICATION_AREA_SIZE {
        eprintln!(
            "Warning: payload is {} bytes, advertised area size is {}.",
            payload.len(),
            APPLICATION_AREA_SIZE
        );
    }

    if ctx.api.create_application_area(amiibo_id, area_id, payload)? {
        println!(
            "{}",
            format!("Created area {area_id:#010x} on '{amiibo_id}'.").green()
        );
    } else {
        println!(
            "{}",
            format!("Area {area_id:#010x} already exists on '{amiibo_id}'; nothing written.")
                .yellow()
        );
    }
    Ok(())
}

fn handle_area_read(
    ctx: &AppContext,
    amiibo_id: &str,
    area_id: u32,
    out: Option<PathBuf>,
) -> Result<()> {
    if !ctx.api.open_application_area(amiibo_id, area_id)? {
        return Err(VaultError::Usage(format!(
            "no area {area_id:#010x} on '{amiibo_id}'"
        )));
    }
    let data = ctx.api.get_application_area(amiibo_id)?;

    match out {
        Some(path) => {
            fs::write(&path, &data)?;
            println!("Wrote {} bytes to {}.", data.len(), path.display());
        }
        None => println!("{}", hex::encode(&data)),
    }
    Ok(())
}

fn handle_area_write(
    ctx: &AppContext,
    amiibo_id: &str,
    area_id: u32,
    data: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let payload = read_payload(data, file)?;

    if !ctx.api.open_application_area(amiibo_id, area_id)? {
        println!(
            "{}",
            format!("No area {area_id:#010x} on '{amiibo_id}'; nothing written.").yellow()
        );
        return Ok(());
    }
    ctx.api.set_application_area(amiibo_id, &payload)?;
    println!(
        "{}",
        format!(
            "Wrote {} bytes to area {area_id:#010x} on '{amiibo_id}'.",
            payload.len()
        )
        .green()
    );
    Ok(())
}

fn handle_path(ctx: &AppContext, amiibo_id: &str) -> Result<()> {
    let path = ctx.api.store().record_path(amiibo_id)?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = ctx.config.clone();
    match (key.as_deref(), value) {
        (None, _) => {
            println!("random-uuid = {}", config.random_uuid);
            println!("nickname = {}", config.nickname);
        }
        (Some("random-uuid"), None) => println!("random-uuid = {}", config.random_uuid),
        (Some("random-uuid"), Some(v)) => {
            config.random_uuid = v
                .parse()
                .map_err(|_| VaultError::Usage(format!("expected true or false, got '{v}'")))?;
            config.save(ctx.api.store().base_dir())?;
            println!("random-uuid = {}", config.random_uuid);
        }
        (Some("nickname"), None) => println!("nickname = {}", config.nickname),
        (Some("nickname"), Some(v)) => {
            config.nickname = v;
            config.save(ctx.api.store().base_dir())?;
            println!("nickname = {}", config.nickname);
        }
        (Some(other), _) => println!("Unknown config key: {other}"),
    }
    Ok(())
}

fn read_payload(data: Option<String>, file: Option<PathBuf>) -> Result<Vec<u8>> {
    match (data, file) {
        (Some(hex_str), None) => hex::decode(hex_str.trim())
            .map_err(|e| VaultError::Usage(format!("invalid hex payload: {e}"))),
        (None, Some(path)) => Ok(fs::read(path)?),
        (None, None) => Err(VaultError::Usage(
            "provide a payload with --data or --file".to_string(),
        )),
        (Some(_), Some(_)) => Err(VaultError::Usage(
            "use either --data or --file, not both".to_string(),
        )),
    }
}

fn format_time_ago(timestamp: NaiveDateTime) -> String {
    let now = Local::now().naive_local();
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

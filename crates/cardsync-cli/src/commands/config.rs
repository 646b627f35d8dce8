use cardsync_core::ResolutionStrategy;
use uuid::Uuid;

use crate::cli::ConfigCommands;
use crate::config_profiles::{default_config_path, normalize_text_option, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            device_id,
            strategy,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            device_id,
            strategy,
            no_activate,
        ),
        ConfigCommands::Show => run_config_show(global_profile),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run_config_init(
    profile_name: Option<&str>,
    device_id: Option<String>,
    strategy: Option<ResolutionStrategy>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let profile = config.profile_mut_or_default(&profile_name);
    let device_id = normalize_text_option(device_id)
        .or_else(|| profile.device_id())
        .unwrap_or_else(generate_device_id);
    profile.device_id = Some(device_id.clone());
    if let Some(strategy) = strategy {
        profile.default_strategy = Some(strategy);
    }

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {} (device {})",
        profile_name,
        path.display(),
        device_id
    );
    Ok(())
}

pub fn run_config_show(global_profile: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();

    println!("config: {}", default_config_path().display());
    println!("profile: {profile_name}");
    println!(
        "device id: {}",
        profile.device_id().unwrap_or_else(|| "(not set)".to_string())
    );
    println!(
        "default strategy: {}",
        profile
            .default_strategy
            .map_or_else(|| "(not set)".to_string(), |strategy| strategy.to_string())
    );
    Ok(())
}

pub fn generate_device_id() -> String {
    format!("device-{}", Uuid::now_v7().simple())
}

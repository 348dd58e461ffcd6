//! Command handlers. Each one maps to a screen of the tablet app.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use orderpad_client::{ClientConfig, ListSnapshot, LoadOutcome, Notifier, Services};
use orderpad_core::{Area, OrderSelection, OrderType, UserInfo};

use crate::SettingsAction;

pub async fn login(
    services: &Services,
    user_name: &str,
    password: &str,
    quiet: bool,
) -> anyhow::Result<()> {
    let user = services.auth.login(user_name, password).await?;
    let token = services
        .session()
        .token()
        .context("login succeeded but no token was stored")?;

    if !quiet {
        print_identity(&user);
        if let Some(expires_at) = services.session().expires_at() {
            println!("Expires:  {}", expires_at.to_rfc3339());
        }
        println!();
    }
    println!("{}", token);
    Ok(())
}

pub fn whoami(services: &Services) -> anyhow::Result<()> {
    let user = services.auth.current_user()?;
    print_identity(&user);
    if let Some(expires_at) = services.session().expires_at() {
        println!("Expires:  {}", expires_at.to_rfc3339());
    }
    Ok(())
}

pub async fn menu(services: &Services, category: Option<&str>) -> anyhow::Result<()> {
    if let Some(category) = category {
        let products = services.products.list(Some(category)).await?;
        for product in products.iter().filter(|p| p.is_active) {
            println!("  {:<32} {:>10}", product.name, product.price_display());
        }
        return Ok(());
    }

    let sections = services.menu().await?;
    if sections.is_empty() {
        println!("The menu is empty.");
    }
    for section in sections {
        println!("{}", section.category.name);
        if section.products.is_empty() {
            println!("  (no products)");
        }
        for product in section.products {
            println!("  {:<32} {:>10}", product.name, product.price_display());
        }
    }
    Ok(())
}

pub async fn areas(
    services: &Services,
    notifier: Arc<dyn Notifier>,
    refresh: bool,
) -> anyhow::Result<()> {
    let (areas, initial) = services.areas_data(notifier);
    initial.await?;
    if refresh {
        areas.refresh().await;
    }

    let snapshot = areas.snapshot();
    print_areas(&snapshot);
    if let Some(error) = snapshot.last_error {
        bail!(error);
    }
    Ok(())
}

pub async fn warehouses(services: &Services) -> anyhow::Result<()> {
    for warehouse in services.warehouses.list().await? {
        match warehouse.code {
            Some(code) => println!("{:<8} {} ({})", warehouse.id, warehouse.name, code),
            None => println!("{:<8} {}", warehouse.id, warehouse.name),
        }
    }
    Ok(())
}

pub async fn order_type(
    services: &Services,
    config: &ClientConfig,
    notifier: Arc<dyn Notifier>,
    order_type: Option<&str>,
    area: Option<String>,
) -> anyhow::Result<()> {
    let order_type: OrderType = match order_type {
        Some(raw) => raw.parse()?,
        None => config.device.default_order_type,
    };
    let selection = OrderSelection::new(order_type, area)?;

    if let Some(area_id) = selection.area_id() {
        let (areas, initial) = services.areas_data(notifier);
        if let LoadOutcome::Failed { message } = initial.await? {
            bail!("could not check area: {}", message);
        }
        let known = areas
            .items()
            .into_iter()
            .any(|a| a.id == area_id && a.is_active);
        if !known {
            bail!("unknown or inactive area: {}", area_id);
        }
    }

    println!("{}", serde_json::to_string_pretty(&selection)?);
    Ok(())
}

pub fn settings(config_path: Option<PathBuf>, action: &SettingsAction) -> anyhow::Result<()> {
    match action {
        SettingsAction::Show => {
            let config = ClientConfig::load(config_path)?;
            if let Some(path) = ClientConfig::default_config_path() {
                println!("# default file: {}", path.display());
            }
            print!("{}", toml::to_string_pretty(&config)?);
        }
        SettingsAction::SetUrl { url } => {
            let mut config = ClientConfig::read_file(config_path.clone())?;
            config.api.base_url = url.clone();
            config.validate()?;
            config.save(config_path)?;
            println!("Backend URL set to {}", url);
        }
        SettingsAction::SetWindow { millis } => {
            let mut config = ClientConfig::read_file(config_path.clone())?;
            config.cache.freshness_window_ms = *millis;
            config.validate()?;
            config.save(config_path)?;
            println!("Freshness window set to {} ms", millis);
        }
    }
    Ok(())
}

fn print_identity(user: &UserInfo) {
    println!("User:     {}", user.user_name.as_deref().unwrap_or("-"));
    println!("Name:     {}", user.user_full_name.as_deref().unwrap_or("-"));
    println!("Company:  {}", user.company_name.as_deref().unwrap_or("-"));
}

fn print_areas(snapshot: &ListSnapshot<Area>) {
    if snapshot.items.is_empty() && snapshot.last_error.is_none() {
        println!("No areas.");
    }
    for area in &snapshot.items {
        let tables = area
            .table_count
            .map(|n| format!("{} tables", n))
            .unwrap_or_default();
        let status = if area.is_active { "" } else { " (inactive)" };
        println!("{:<12} {:<24} {}{}", area.id, area.name, tables, status);
    }
}

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use myweather::Desk;
use myweather_alerts::DialogSink;
use myweather_core::{AppError, Config, ProviderKind};
use myweather_settings::{SettingsStore, UserPreferences, CHARACTER_SKINS};
use myweather_weather::{CityLookup, DemoProvider, QWeatherProvider, WeatherSource};

#[derive(Parser)]
#[command(author, version, about = "MyWeather - current conditions and alerts for your city", long_about = None)]
struct Cli {
    /// Use random demo readings instead of the weather API
    #[arg(long, action)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and show the weather for the selected city (default)
    Show,
    /// List supported cities
    Cities,
    /// Select a city, then show its weather
    City { name: String },
    /// Enable or disable the banner and popup alerts
    Alerts {
        #[arg(long)]
        banner: bool,
        #[arg(long)]
        popup: bool,
    },
    /// Change the name used in the greeting
    User { name: String },
    /// Choose the character skin
    Skin { name: String },
    /// Restore default settings
    Reset,
}

/// Stands in for the informational dialog box
struct TerminalDialogs;

impl DialogSink for TerminalDialogs {
    fn show_information(&mut self, message: &str) {
        println!("[!] {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    myweather_core::init()?;

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if cli.demo {
        config.weather.provider = ProviderKind::Demo;
    }
    let (config, _validation) = config.into_validated()?;
    let store = SettingsStore::new(config.settings_path()?);

    let command = cli.command.unwrap_or(Command::Show);
    let Some(prefs) = update_settings(&store, command)? else {
        return Ok(());
    };

    let provider = config.weather.provider;
    tracing::info!("MyWeather started with {:?} provider", provider);

    match provider {
        ProviderKind::QWeather => {
            let source = QWeatherProvider::new(&config.weather).map_err(AppError::from)?;
            show(source, prefs).await
        }
        ProviderKind::Demo => show(DemoProvider::new(), prefs).await,
    }
}

/// Apply a settings command; `None` means there is nothing to display afterwards
fn update_settings(store: &SettingsStore, command: Command) -> Result<Option<UserPreferences>> {
    let mut prefs = store.load();

    match command {
        Command::Show => return Ok(Some(prefs)),
        Command::Cities => {
            for name in CityLookup::display_names() {
                println!("{}", name);
            }
            return Ok(None);
        }
        Command::City { name } => {
            if !CityLookup::new().contains(&name) {
                bail!(
                    "Unsupported city '{}'. Run `myweather cities` for the list.",
                    name
                );
            }
            prefs.selected_city = name;
        }
        Command::Alerts { banner, popup } => prefs.alert_toggles = [banner, popup],
        Command::User { name } => prefs.username = name,
        Command::Skin { name } => {
            if !CHARACTER_SKINS.contains(&name.as_str()) {
                bail!(
                    "Unknown skin '{}'. Choose one of: {}",
                    name,
                    CHARACTER_SKINS.join(", ")
                );
            }
            prefs.character_skin = name;
        }
        Command::Reset => {
            let prefs = store.reset().map_err(AppError::from)?;
            println!("Settings restored to defaults");
            return Ok(Some(prefs));
        }
    }

    store
        .save(&prefs)
        .map_err(AppError::from)
        .with_context(|| format!("Could not save {}", store.path().display()))?;
    Ok(Some(prefs))
}

async fn show<S: WeatherSource>(source: S, prefs: UserPreferences) -> Result<()> {
    let mut desk = Desk::new(source, prefs, TerminalDialogs);
    let labels = desk.refresh().await;

    println!("{}", labels.greeting);
    println!("{}", labels.city);
    println!("{}  {}", labels.temperature, labels.description);
    println!("{}", labels.humidity_wind);
    println!("Next two hours: {}", labels.forecast);

    if desk.banner().visible {
        println!("** {} **", desk.banner().text);
    }
    if let Some(status) = desk.status() {
        println!("({})", status);
    }

    Ok(())
}

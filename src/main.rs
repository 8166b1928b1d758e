//! House Price Predictor CLI
//!
//! Collects property details and estimates the sale price with a pre-trained model.

use clap::{Parser, Subcommand};
use house_price::{Config, Result};

#[derive(Parser)]
#[command(name = "house-price")]
#[command(about = "Estimate a property's sale price from its details", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive form (default)
    Form,
    /// Predict once from the default inputs plus overrides
    Predict {
        /// Override a control, e.g. --set bedrooms=4 --set suburb="Mairangi Bay"
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// List the model columns in order
    Schema,
    /// Model management commands
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// Write a default config file
    Init,
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show model information
    Info,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command.unwrap_or(Commands::Form) {
        Commands::Form => commands::form(&config),
        Commands::Predict { set, format } => commands::predict(&config, &set, format),
        Commands::Schema => commands::schema(),
        Commands::Model { action } => match action {
            ModelCommands::Info => commands::model_info(&config),
        },
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use house_price::features::{Column, FeatureRecord, PropertyInputs};
    use house_price::form::InteractiveForm;
    use house_price::model::Model;
    use house_price::predict::inference::{format_prediction, format_price};
    use house_price::predict::Predictor;

    /// Load the model before anything is served; failure aborts the command
    fn load_model(config: &Config) -> Result<Model> {
        Model::load(&config.model.path)
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Place the trained model at {}", config.model.path);
        println!("  2. Run 'house-price' to open the form");
        println!("  3. Or run 'house-price predict --set bedrooms=4' for a one-off estimate");

        Ok(())
    }

    pub fn form(config: &Config) -> Result<()> {
        let model = load_model(config)?;
        let predictor = Predictor::new(&model);

        let mut form = InteractiveForm::new(&predictor, config.display.currency_symbol.clone());
        form.run()
    }

    pub fn predict(config: &Config, assignments: &[String], format: OutputFormat) -> Result<()> {
        let model = load_model(config)?;
        let predictor = Predictor::new(&model);

        let mut inputs = PropertyInputs::default();
        for assignment in assignments {
            let field = inputs.apply_assignment(assignment)?;
            log::debug!("{} = {}", field.key(), inputs.display_value(field));
        }

        let prediction = predictor.predict(&inputs)?;
        let symbol = &config.display.currency_symbol;

        match format {
            OutputFormat::Table => {
                print!("{}", format_prediction(&prediction, symbol));
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "price": prediction.price,
                    "display": format_price(prediction.price, symbol),
                    "inputs": inputs,
                    "record": prediction.record,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Csv => {
                let header: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
                println!("{},price", header.join(","));
                let values: Vec<String> = prediction
                    .record
                    .entries()
                    .map(|(_, v)| v.to_string())
                    .collect();
                println!("{},{:.2}", values.join(","), prediction.price);
            }
        }

        Ok(())
    }

    pub fn schema() -> Result<()> {
        println!("Model Columns ({})", FeatureRecord::DIM);
        println!("───────────────────────────────");
        for (i, column) in Column::ALL.iter().enumerate() {
            println!(
                "  {:>2}. {:<26} <- {}",
                i + 1,
                column.name(),
                column.source().label()
            );
        }
        Ok(())
    }

    pub fn model_info(config: &Config) -> Result<()> {
        let model = load_model(config)?;

        println!("Model Information");
        println!("───────────────────────────────");
        println!("  Path:      {}", config.model.path);
        println!("  Name:      {}", model.name().unwrap_or("-"));
        println!("  Estimator: {}", model.kind());
        println!("  Columns:   {}", model.feature_names().len());
        for name in model.feature_names() {
            let marker = if Column::from_name(name).is_some() { " " } else { "?" };
            println!("   {} {}", marker, name);
        }

        Ok(())
    }
}

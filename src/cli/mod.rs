//! DC-009: CLI subcommands — init, validate, compare, classify, index.

use crate::core::aggregator::RecipeCostAggregator;
use crate::core::classifier::IngredientClassifier;
use crate::core::pipeline::{self, CompareConfig, CompareOutcome};
use crate::core::types::{
    DishcostConfig, PriceFamily, PriceIndex, RecipeRef, ReportFormat, SourceKind,
};
use crate::core::{estimator, parser};
use crate::report::{self, ComparisonReport};
use crate::sources::{self, fixture::FixtureSource, http::NumbeoSource, EconomicDataSource};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new dishcost project
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate dishcost.yaml without fetching any data
    Validate {
        /// Path to dishcost.yaml
        #[arg(short, long, default_value = "dishcost.yaml")]
        file: PathBuf,
    },

    /// Compare recipe candidates for a dish and write a report
    Compare {
        /// Path to dishcost.yaml
        #[arg(short, long, default_value = "dishcost.yaml")]
        file: PathBuf,

        /// Override the city
        #[arg(long)]
        city: Option<String>,

        /// Override the dish
        #[arg(long)]
        dish: Option<String>,

        /// Use this fixture file instead of the configured sources
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Override the report directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Override the report format
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },

    /// Classify and price ingredients against the default index
    Classify {
        /// Raw ingredient labels, e.g. "200g de boeuf"
        #[arg(required = true)]
        ingredients: Vec<String>,
    },

    /// Show the reconciled price index for a city
    Index {
        /// City name
        #[arg(long)]
        city: String,

        /// Read observations from a fixture file
        #[arg(long, conflicts_with = "live")]
        fixture: Option<PathBuf>,

        /// Fetch observations from numbeo.com
        #[arg(long)]
        live: bool,

        /// HTTP timeout in seconds for --live
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Compare {
            file,
            city,
            dish,
            fixture,
            output_dir,
            format,
        } => cmd_compare(
            &file,
            &CompareOverrides {
                city,
                dish,
                fixture,
                output_dir,
                format,
            },
        ),
        Commands::Classify { ingredients } => cmd_classify(&ingredients),
        Commands::Index {
            city,
            fixture,
            live,
            timeout_secs,
        } => cmd_index(&city, fixture.as_deref(), live, timeout_secs),
    }
}

const CONFIG_TEMPLATE: &str = r#"version: "1.0"
city: Paris
dish: lasagnes
max_candidates: 3

sources:
  kind: fixture
  fixture: data.yaml

report:
  format: html
  output_dir: reports
  breakdown_limit: 6

taxonomy: {}
"#;

const FIXTURE_TEMPLATE: &str = r#"cities:
  paris:
    - label: Chicken Fillets (1kg)
      price: "11.20 €"
    - label: Beef Round (1kg) (or Equivalent Back Leg Red Meat)
      price: "19.50 €"
    - label: Rice (white), (1kg)
      price: "2.40 €"
    - label: Local Cheese (1kg)
      price: "17.80 €"
    - label: Tomato (1kg)
      price: "3.60 €"
    - label: Potato (1kg)
      price: "1.90 €"
    - label: Onion (1kg)
      price: "2.30 €"

recipes:
  lasagnes:
    - name: Lasagnes à la bolognaise
      url: https://www.marmiton.org/recettes/recette_lasagnes-a-la-bolognaise_18215.aspx
      ingredients:
        - 500 g de boeuf haché
        - 2 oignons
        - 1 gousse d'ail
        - 800 g de tomates concassées
        - 12 feuilles de lasagne
        - 50 cl de lait
        - 60 g de beurre
        - 50 g de farine
        - 100 g de gruyère râpé
        - sel
        - poivre
    - name: Lasagnes aux légumes du soleil
      url: https://www.marmiton.org/recettes/recette_lasagnes-aux-legumes_37406.aspx
      ingredients:
        - 2 courgettes
        - 1 aubergine
        - 1 poivron rouge
        - 12 feuilles de lasagne
        - 200 g de mozzarella
        - huile d'olive
        - basilic
"#;

fn cmd_init(path: &Path) -> Result<(), String> {
    let config_path = path.join("dishcost.yaml");
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()));
    }
    let fixture_path = path.join("data.yaml");
    if fixture_path.exists() {
        return Err(format!("{} already exists", fixture_path.display()));
    }

    std::fs::create_dir_all(path)
        .map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    std::fs::write(&config_path, CONFIG_TEMPLATE)
        .map_err(|e| format!("cannot write {}: {}", config_path.display(), e))?;
    std::fs::write(&fixture_path, FIXTURE_TEMPLATE)
        .map_err(|e| format!("cannot write {}: {}", fixture_path.display(), e))?;

    println!("Initialized dishcost project at {}", path.display());
    println!("  Created: {}", config_path.display());
    println!("  Created: {}", fixture_path.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let config = parser::parse_config_file(file)?;
    let errors = parser::validate_config(&config);

    if errors.is_empty() {
        println!(
            "OK: {} in {} ({} source, up to {} candidates)",
            config.dish, config.city, config.sources.kind, config.max_candidates
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

/// Command-line overrides applied on top of dishcost.yaml.
#[derive(Debug, Default)]
struct CompareOverrides {
    city: Option<String>,
    dish: Option<String>,
    fixture: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    format: Option<ReportFormat>,
}

/// Resolve a command-line path against the working directory.
fn from_cwd(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| format!("cannot read working dir: {}", e))?;
    Ok(cwd.join(path))
}

fn apply_overrides(config: &mut DishcostConfig, o: &CompareOverrides) -> Result<(), String> {
    if let Some(ref city) = o.city {
        config.city.clone_from(city);
    }
    if let Some(ref dish) = o.dish {
        config.dish.clone_from(dish);
    }
    if let Some(ref fixture) = o.fixture {
        config.sources.kind = SourceKind::Fixture;
        config.sources.fixture = Some(from_cwd(fixture)?.display().to_string());
    }
    if let Some(ref dir) = o.output_dir {
        config.report.output_dir = from_cwd(dir)?.display().to_string();
    }
    if let Some(format) = o.format {
        config.report.format = format;
    }
    Ok(())
}

/// Parse a config, apply overrides, and validate, returning errors if invalid.
fn parse_and_validate(file: &Path, o: &CompareOverrides) -> Result<DishcostConfig, String> {
    let mut config = parser::parse_config_file(file)?;
    apply_overrides(&mut config, o)?;
    let errors = parser::validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err("validation failed".to_string())
}

fn cmd_compare(file: &Path, overrides: &CompareOverrides) -> Result<(), String> {
    let config = parse_and_validate(file, overrides)?;
    let base_dir = file.parent().unwrap_or_else(|| Path::new("."));

    let classifier = IngredientClassifier::new(parser::keyword_table(&config)?);
    let (economic, recipes) = sources::from_config(&config, base_dir)?;

    let cfg = CompareConfig {
        city: &config.city,
        dish: &config.dish,
        max_candidates: config.max_candidates,
        classifier: &classifier,
    };

    // NoCandidates stops here, before any report is written
    let outcome = pipeline::compare(&cfg, economic.as_ref(), recipes.as_ref())
        .map_err(|e| e.to_string())?;

    print_outcome(&outcome);

    let report = ComparisonReport::from_outcome(&outcome, config.report.breakdown_limit);
    let output_dir = base_dir.join(&config.report.output_dir);
    let path = report::sink_for(config.report.format, &output_dir).write(&report)?;

    println!();
    println!("Report written to {}", path.display());
    Ok(())
}

/// Display a comparison to stdout.
fn print_outcome(outcome: &CompareOutcome) {
    println!(
        "Comparing: {} in {} ({} candidates)",
        outcome.dish,
        outcome.city,
        outcome.comparison.candidates.len()
    );
    println!();
    print_index(&outcome.city, &outcome.index);
    println!();
    println!("Ranking:");
    // ordered() is stable, so the winner is always first
    for (rank, result) in outcome.comparison.ordered().into_iter().enumerate() {
        let marker = if rank == 0 { "*" } else { " " };
        println!(
            "  {} {}. {:>8} €  {} ({} ingredients)",
            marker,
            rank + 1,
            result.display_total(),
            result.recipe.name,
            result.items.len()
        );
    }
    let winner = outcome.comparison.winner();
    println!();
    println!(
        "Cheapest: {} at {} €",
        winner.recipe.name,
        winner.display_total()
    );
}

fn cmd_classify(ingredients: &[String]) -> Result<(), String> {
    let classifier = IngredientClassifier::default();
    let index = PriceIndex::default();
    let aggregator = RecipeCostAggregator::new(&classifier, &index);
    let result = aggregator.aggregate(RecipeRef::new("command line", ""), ingredients);

    for item in &result.items {
        println!("  {:<14} {:>6.2} €  {}", item.family.to_string(), item.cost, item.name);
    }
    println!();
    println!("Total: {} € ({} ingredients)", result.display_total(), result.items.len());
    Ok(())
}

fn cmd_index(
    city: &str,
    fixture: Option<&Path>,
    live: bool,
    timeout_secs: u64,
) -> Result<(), String> {
    if live && timeout_secs == 0 {
        return Err("--timeout-secs must be at least 1".to_string());
    }
    let source: Box<dyn EconomicDataSource> = match (fixture, live) {
        (Some(path), _) => Box::new(FixtureSource::load(path)?),
        (None, true) => Box::new(NumbeoSource::new(Duration::from_secs(timeout_secs))?),
        (None, false) => Box::new(FixtureSource::default()),
    };
    let index = pipeline::price_index_for(city, source.as_ref());
    print_index(city, &index);
    Ok(())
}

fn print_index(city: &str, index: &PriceIndex) {
    println!("Price index for {} (EUR/kg):", city);
    println!("  red meat   {:>7.2}", index.red_meat);
    println!("  poultry    {:>7.2}", index.poultry);
    println!("  vegetable  {:>7.2}", index.vegetable);
    println!("  starch     {:>7.2}", index.starch);
    println!("  dairy      {:>7.2}", index.dairy);
    println!("  fruit      {:>7.2}", index.fruit);
    let fish = estimator::estimate(PriceFamily::Fish, index);
    println!("  (fish portion {:.2} €)", fish);
}

use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use env_logger::{Env, Target};
use log::info;

use starminal::config::{Cli, Commands, Site, SnapshotArgs};
use starminal::geocode::Geocoder;
use starminal::screenshot::save_screenshot;
use starminal::terminal::{self, Session};
use starminal::{compute_visible, ObserverLocation, StarCatalog, StarminalError};

fn init_logging(cli: &Cli, command: &Commands) -> Result<(), StarminalError> {
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.to_string()));

    // the interactive session owns the terminal, so logs go to a file
    if *command == Commands::Sky {
        std::fs::create_dir_all(&cli.output_dir)?;
        let log_file = File::create(cli.output_dir.join("starminal.log"))?;
        builder.target(Target::Pipe(Box::new(log_file)));
    }
    builder.init();
    Ok(())
}

fn snapshot(cli: &Cli, args: &SnapshotArgs, catalog: &StarCatalog) -> Result<(), StarminalError> {
    let taken_at = args.instant()?;
    let (location, label) = match args.site()? {
        Site::PostalCode(code) => {
            let geocoder = Geocoder::new(cli.geocoder_options());
            (geocoder.locate_blocking(&code)?, code)
        }
        Site::Coordinates {
            latitude,
            longitude,
        } => (
            ObserverLocation::new(latitude, longitude, "")?,
            format!("{latitude:.4}_{longitude:.4}"),
        ),
    };

    let stars = compute_visible(catalog.entries(), &location, &taken_at);
    let path = save_screenshot(
        &stars,
        args.width,
        args.height,
        &label,
        &cli.output_dir,
        &taken_at,
    )?;

    println!("{path}");
    println!("{} visible stars", stars.len());
    Ok(())
}

fn main() -> Result<(), StarminalError> {
    let cli = Cli::parse();
    let command = cli.selected_command();
    init_logging(&cli, &command)?;

    let catalog = StarCatalog::from_csv_path(&cli.catalog_options())?;
    info!("starting {command:?}");

    match command {
        Commands::Sky => terminal::run(Session {
            catalog: Arc::new(catalog),
            geocoder: Geocoder::new(cli.geocoder_options()),
            output_dir: cli.output_dir.clone(),
        }),
        Commands::Snapshot(args) => snapshot(&cli, &args, &catalog),
    }
}

#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::process::exit;

use clap::{Args, Parser, Subcommand};
use log::{error, info};

use crate::planner::{build_graph, plan};
use crate::serialization::itinerary::export_itinerary;
use crate::serialization::network::parse_network;
use crate::serialization::request::parse_request;
use crate::serialization::response::write_response;

mod col;
mod enumerate;
mod graph;
mod indexer;
mod planner;
mod primitives;
mod reconstruct;
mod serialization;
mod solver;
mod station_set;
mod test;

#[derive(Parser, Debug)]
#[command(
    version,
    author,
    about = "Exact maximum-satisfaction tour planning on public-transit networks under a travel-time budget"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    #[command(about = "Plan a tour for a request against a network file")]
    Plan(PlanArgs),

    #[command(about = "Run random sample instances")]
    RunRandom,
}

#[derive(Args, Clone, Debug)]
struct PlanArgs {
    #[arg(
        short = 'n',
        long,
        default_value = "network.json",
        help = "The transit network file."
    )]
    network_filename: String,

    #[arg(
        short = 'r',
        long,
        default_value = "request.json",
        help = "The planning request file."
    )]
    request_filename: String,

    #[arg(
        short = 'o',
        long,
        default_value = "tour.json",
        help = "The file to write the planned tour to."
    )]
    out_filename: String,

    #[arg(
        long = "csv-out",
        help = "Additionally write the station-by-station itinerary to this CSV file."
    )]
    csv_out_filename: Option<String>,
}

fn main_plan(args: &PlanArgs) {
    if Path::new(&args.out_filename).exists() {
        error!("Output file already exists: {}", args.out_filename);
        exit(1);
    }

    let network_file = File::open(&args.network_filename).unwrap_or_else(|it| {
        error!("Could not open network file {}: {}", args.network_filename, it);
        exit(1);
    });
    let lines = parse_network(network_file).unwrap_or_else(|it| {
        error!("Could not parse network:\n{:#?}", it);
        exit(1);
    });
    let graph = build_graph(&lines);
    info!("Number stations: {}", graph.num_stations());

    let request_file = File::open(&args.request_filename).unwrap_or_else(|it| {
        error!("Could not open request file {}: {}", args.request_filename, it);
        exit(1);
    });
    let request = parse_request(request_file).unwrap_or_else(|it| {
        error!("Could not parse request:\n{:#?}", it);
        exit(1);
    });

    let result = plan(&graph, &request).unwrap_or_else(|it| {
        error!("Could not plan tour:\n{:#?}", it);
        exit(1);
    });

    let out_file = File::create(&args.out_filename).unwrap_or_else(|it| {
        error!("Could not create {}: {}", args.out_filename, it);
        exit(1);
    });
    write_response(&result, out_file).unwrap_or_else(|it| {
        error!("Could not write tour:\n{:#?}", it);
        exit(1);
    });

    if let Some(csv_filename) = &args.csv_out_filename {
        let csv_file = File::create(csv_filename).unwrap_or_else(|it| {
            error!("Could not create {}: {}", csv_filename, it);
            exit(1);
        });
        export_itinerary(&result, csv_file).unwrap_or_else(|it| {
            error!("Could not write itinerary CSV:\n{:#?}", it);
            exit(1);
        });
    }
}

fn main() {
    env_logger::builder().parse_env("LOG").init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan(args) => main_plan(&args),
        Commands::RunRandom => test::random_samples::run_samples(),
    }
}

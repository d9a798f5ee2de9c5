use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use primer_cli::commands::descend::run_descent;
use primer_cli::commands::describe::run_describe;
use primer_cli::commands::hypothesis::run_hypothesis;
use primer_cli::commands::kids::run_kids;
use primer_cli::commands::regression::{load_regression_config, run_regression, RegressionConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(
            env_logger::Env::default()
                .filter_or("PRIMER_LOG", "error,primer=info,primer_cli=info,primer_math=info"),
        )
        .init();

    let matches = Command::new("primer")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("Worked examples for vectors, probability, statistics and gradient descent")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("regression")
                .about("Fit a line to synthetic data with gradient descent")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON regression configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("strategy")
                        .short('s')
                        .long("strategy")
                        .help("Override the descent strategy from the config.")
                        .value_parser(["batch", "minibatch", "stochastic"]),
                )
                .arg(
                    Arg::new("epochs")
                        .short('e')
                        .long("epochs")
                        .help("Override the number of epochs.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("learning_rate")
                        .short('l')
                        .long("learning-rate")
                        .help("Override the learning rate.")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("descend")
                .about("Minimise the sum of squares from a random starting point")
                .arg(
                    Arg::new("dim")
                        .long("dim")
                        .default_value("3")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("iterations")
                        .short('n')
                        .long("iterations")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("step_size")
                        .long("step-size")
                        .default_value("-0.01")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("estimated")
                        .long("estimated")
                        .help("Use finite-difference gradients instead of the exact gradient.")
                        .action(ArgAction::SetTrue),
                )
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("hypothesis")
                .about("Test whether a coin is fair from the number of heads observed")
                .arg(
                    Arg::new("trials")
                        .short('n')
                        .long("trials")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("p")
                        .short('p')
                        .long("p")
                        .help("Success probability under the null hypothesis")
                        .default_value("0.5")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("observed")
                        .short('x')
                        .long("observed")
                        .help("Number of successes observed")
                        .required(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("significance")
                        .long("significance")
                        .default_value("0.05")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("alt_p")
                        .long("alt-p")
                        .help("Alternative success probability used to report power")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("kids")
                .about("Simulate the boy-or-girl conditional probability paradox")
                .arg(
                    Arg::new("trials")
                        .short('n')
                        .long("trials")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("describe")
                .about("Print descriptive statistics for a list of numbers")
                .arg(
                    Arg::new("values")
                        .help("Numbers, separated by spaces or commas")
                        .required(true)
                        .num_args(1..)
                        .allow_negative_numbers(true),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let outcome = match matches.subcommand() {
        Some(("regression", sub_m)) => handle_regression(sub_m),
        Some(("descend", sub_m)) => handle_descend(sub_m),
        Some(("hypothesis", sub_m)) => handle_hypothesis(sub_m),
        Some(("kids", sub_m)) => handle_kids(sub_m),
        Some(("describe", sub_m)) => handle_describe(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    if let Err(e) = outcome {
        log::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .help("Seed for the random number generator")
        .value_parser(clap::value_parser!(u64))
}

fn handle_regression(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[Primer::Regression] Using config: {:?}", path);
            load_regression_config(path)?
        }
        None => {
            log::info!("[Primer::Regression] No config provided; using defaults.");
            RegressionConfig::default()
        }
    };

    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.override_strategy(strategy)?;
    }
    if let Some(&epochs) = matches.get_one::<usize>("epochs") {
        config.training.epochs = epochs;
    }
    if let Some(&learning_rate) = matches.get_one::<f64>("learning_rate") {
        config.training.learning_rate = learning_rate;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.training.seed = Some(seed);
    }

    let model = run_regression(&config)?;
    println!("slope = {:.4}", model.slope);
    println!("intercept = {:.4}", model.intercept);
    Ok(())
}

fn handle_descend(matches: &ArgMatches) -> Result<()> {
    let report = run_descent(
        *matches.get_one::<usize>("dim").unwrap_or(&3),
        *matches.get_one::<usize>("iterations").unwrap_or(&1000),
        *matches.get_one::<f64>("step_size").unwrap_or(&-0.01),
        matches.get_flag("estimated"),
        matches.get_one::<u64>("seed").copied(),
    )?;
    println!("start = {}", report.start);
    println!("end = {}", report.end);
    println!("distance to origin = {:e}", report.distance_to_origin);
    Ok(())
}

fn handle_hypothesis(matches: &ArgMatches) -> Result<()> {
    let report = run_hypothesis(
        *matches.get_one::<u64>("trials").unwrap_or(&1000),
        *matches.get_one::<f64>("p").unwrap_or(&0.5),
        *matches
            .get_one::<f64>("observed")
            .ok_or_else(|| anyhow::anyhow!("--observed is required"))?,
        *matches.get_one::<f64>("significance").unwrap_or(&0.05),
        matches.get_one::<f64>("alt_p").copied(),
    )?;
    println!("mu = {:.4}, sigma = {:.4}", report.mu, report.sigma);
    println!("acceptance region = ({:.2}, {:.2})", report.lower, report.upper);
    println!("two-sided p-value = {:.4}", report.p_value);
    println!(
        "{}",
        if report.reject {
            "reject the null hypothesis"
        } else {
            "fail to reject the null hypothesis"
        }
    );
    if let Some(power) = report.power {
        println!("power = {:.4}", power);
    }
    Ok(())
}

fn handle_kids(matches: &ArgMatches) -> Result<()> {
    let counts = run_kids(
        *matches.get_one::<u32>("trials").unwrap_or(&1000),
        matches.get_one::<u64>("seed").copied(),
    );
    let fmt = |p: Option<f64>| p.map_or_else(|| "n/a".to_string(), |p| format!("{:.4}", p));
    println!("P(both | older): {}", fmt(counts.both_given_older()));
    println!("P(both | either): {}", fmt(counts.both_given_either()));
    Ok(())
}

fn handle_describe(matches: &ArgMatches) -> Result<()> {
    let raw: Vec<&String> = matches
        .get_many::<String>("values")
        .map(|v| v.collect())
        .unwrap_or_default();
    let summary = run_describe(&raw)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

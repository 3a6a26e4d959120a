#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use touban::{
    io, missing_submissions, render, parse_counts, parse_table, recover_counts, render_counts,
    totals_with_travel, travel_days, ConflictKind, RosterConfig, StaffRequest, TargetMonth,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de tableau de service (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer le fichier de configuration depuis des fichiers texte
    Init {
        /// Un nom par ligne (ou séparés par `,` / `、`)
        #[arg(long)]
        staff: String,
        /// Règles individuelles, une par ligne
        #[arg(long)]
        rules: Option<String>,
        #[arg(long, default_value = "touban.json")]
        out: String,
    },

    /// Générer le tableau d'un mois
    Generate {
        /// ex. "2026年4月"
        #[arg(long)]
        month: String,
        /// Fichier JSON de configuration (roster, règles)
        #[arg(long, default_value = "touban.json")]
        config: String,
        /// CSV `staff,request_text[,note]`
        #[arg(long)]
        requests: Option<String>,
        #[arg(long)]
        out_table: Option<String>,
        #[arg(long)]
        out_counts: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Recompter les postes d'un tableau retouché
    Recover {
        #[arg(long)]
        table: String,
        #[arg(long)]
        out: Option<String>,
    },

    /// Vérifier un tableau retouché contre les contraintes
    Check {
        #[arg(long)]
        month: String,
        #[arg(long, default_value = "touban.json")]
        config: String,
        #[arg(long)]
        table: String,
        #[arg(long)]
        requests: Option<String>,
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Souhaits manquants et totaux avec déplacements
    Status {
        #[arg(long)]
        month: String,
        #[arg(long, default_value = "touban.json")]
        config: String,
        #[arg(long)]
        requests: Option<String>,
        /// Récapitulatif CSV déjà rendu
        #[arg(long)]
        counts: Option<String>,
    },
}

fn load_requests(path: Option<&str>) -> Result<Vec<StaffRequest>> {
    match path {
        Some(p) => io::import_requests_csv(p),
        None => Ok(Vec::new()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Init { staff, rules, out } => {
            let config = RosterConfig {
                staff: io::import_staff(&staff)?,
                individual_rules: match rules {
                    Some(path) => io::read_rule_lines(path)?,
                    None => Vec::new(),
                },
                ..Default::default()
            };
            config.save(&out)?;
            println!("Wrote {} ({} staff)", out, config.staff.len());
            0
        }
        Commands::Generate {
            month,
            config,
            requests,
            out_table,
            out_counts,
            out_json,
        } => {
            let month = TargetMonth::parse(&month)?;
            let config = RosterConfig::load(&config)?;
            let requests = load_requests(requests.as_deref())?;
            let generated = config.scheduler(month).with_requests(&requests).run();

            let table = generated.table_text();
            let counts = generated.counts_text();
            match out_table {
                Some(path) => io::write_atomic(path, table.as_bytes())?,
                None => println!("{table}\n"),
            }
            match out_counts {
                Some(path) => io::write_atomic(path, counts.as_bytes())?,
                None => println!("{counts}"),
            }
            if let Some(path) = out_json {
                io::export_generated_json(path, &generated)?;
            }
            let vacant = generated.grid.vacancies();
            if !vacant.is_empty() {
                eprintln!("{} vacant slot(s)", vacant.len());
            }
            0
        }
        Commands::Recover { table, out } => {
            let text = std::fs::read_to_string(&table)?;
            let counts = render_counts(&recover_counts(&text));
            match out {
                Some(path) => io::write_atomic(path, counts.as_bytes())?,
                None => println!("{counts}"),
            }
            0
        }
        Commands::Check {
            month,
            config,
            table,
            requests,
            report,
        } => {
            let month = TargetMonth::parse(&month)?;
            let config = RosterConfig::load(&config)?;
            let requests = load_requests(requests.as_deref())?;
            let text = std::fs::read_to_string(&table)?;
            let months = render::table_months(&text);
            if let Some(other) = months.iter().find(|m| **m != month.month) {
                bail!("{table} has dates for month {other}, expected {month}");
            }
            let grid = parse_table(&text);
            let scheduler = config.scheduler(month).with_requests(&requests);
            let conflicts = scheduler.detect_conflicts(&grid);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    let kind = match &c.kind {
                        ConflictKind::DoubleAssignment => "double assignment".to_string(),
                        ConflictKind::UnknownStaff => "unknown staff".to_string(),
                        ConflictKind::Violation(reason) => reason.to_string(),
                    };
                    eprintln!("  {}/{} {} {}: {}", month.month, c.day, c.shift, c.staff, kind);
                }
                if let Some(path) = report {
                    io::export_conflicts_csv(path, &conflicts)?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Status {
            month,
            config,
            requests,
            counts,
        } => {
            let month = TargetMonth::parse(&month)?;
            let config = RosterConfig::load(&config)?;
            let requests = load_requests(requests.as_deref())?;
            let missing = missing_submissions(config.staff.as_slice(), &requests);
            if missing.is_empty() {
                println!("{month}: all requests submitted");
            } else {
                println!("{month}: missing requests from {}", missing.join("、"));
            }
            if let Some(path) = counts {
                let counts = parse_counts(&std::fs::read_to_string(&path)?);
                for row in totals_with_travel(&counts, &travel_days(&requests)) {
                    println!(
                        "{},{},{},{}",
                        row.staff, row.shifts, row.travel, row.total
                    );
                }
            }
            0
        }
    };

    std::process::exit(code);
}

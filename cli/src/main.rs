//! NCI CLI — command-line access to the Neighborhood Complaint Index
//!
//! Runs the same pipeline as the dashboard server and prints the results.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use nci::{Breakdown, Dashboard, DashboardConfig, RenderedChart, SourceConfig, Visualization};
use nci_graph::ConnectionConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nci", version, about = "Neighborhood Complaint Index CLI")]
struct Cli {
    /// Complaint CSV file
    #[arg(long, default_value = "Cleaned_data.csv", global = true, env = "NCI_CSV")]
    csv: PathBuf,

    /// Where complaint records come from
    #[arg(long, default_value = "file", global = true)]
    source: SourceKind,

    /// Neo4j HTTP URL; enables the graph source and the `graph` command
    #[arg(long, global = true, env = "NCI_GRAPH_URL")]
    graph_url: Option<String>,

    /// Neo4j database
    #[arg(long, default_value = "neo4j", global = true)]
    database: String,

    /// Neo4j user
    #[arg(long, default_value = "neo4j", global = true)]
    user: String,

    /// Neo4j password
    #[arg(long, global = true, env = "NCI_GRAPH_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum SourceKind {
    File,
    Graph,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable zip codes
    Zips,
    /// List visualization choices
    Visualizations,
    /// Show the complaint records of a zip
    Records {
        #[arg(long)]
        zip: String,
    },
    /// Show a chart's data for a zip
    Chart {
        #[arg(long)]
        zip: String,

        /// Visualization slug or label (see `visualizations`)
        #[arg(long, default_value = "bar-by-type")]
        viz: Visualization,
    },
    /// Show the complaint graph of a zip
    Graph {
        #[arg(long)]
        zip: String,
    },
    /// Write the records of a zip to complaints_<zip>.csv
    Export {
        #[arg(long)]
        zip: String,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

impl Cli {
    fn config(&self) -> DashboardConfig {
        let graph = self.graph_url.as_ref().map(|uri| ConnectionConfig {
            uri: uri.clone(),
            database: self.database.clone(),
            username: self.user.clone(),
            password: self.password.clone(),
            ..ConnectionConfig::default()
        });
        let source = match self.source {
            SourceKind::File => SourceConfig::File { path: self.csv.clone() },
            SourceKind::Graph => SourceConfig::Graph,
        };
        DashboardConfig { source, graph, ..DashboardConfig::default() }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(&cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Visualizations = cli.command {
        let rows = Visualization::ALL.iter()
            .map(|v| vec![v.slug().to_string(), v.label().to_string()])
            .collect();
        return print_rows(&["id", "label"], rows, &cli.format);
    }

    let dashboard = Dashboard::from_config(&cli.config()).await?;

    match &cli.command {
        Commands::Zips => {
            let rows = dashboard.zip_codes().await?.into_iter().map(|z| vec![z]).collect();
            print_rows(&["zip"], rows, &cli.format)
        }
        Commands::Records { zip } => {
            let rows = dashboard.records(zip).await?.into_iter()
                .map(|r| vec![r.zip, r.complaint_type, r.borough, r.created_date.to_string()])
                .collect();
            print_rows(&nci::data::COLUMNS, rows, &cli.format)
        }
        Commands::Chart { zip, viz } => {
            let chart = dashboard.chart(zip, *viz).await?;
            print_chart(&chart, &cli.format)
        }
        Commands::Graph { zip } => {
            let rows = dashboard.edges(zip).await?.into_iter()
                .map(|e| vec![e.source, e.target, e.weight.to_string()])
                .collect();
            print_rows(&["zip", "complaint", "count"], rows, &cli.format)
        }
        Commands::Export { zip, out } => {
            let export = dashboard.export(zip).await?;
            let path = out.join(&export.file_name);
            std::fs::write(&path, export.body)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Visualizations => Ok(()),
    }
}

fn print_chart(chart: &RenderedChart, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(chart)?);
        return Ok(());
    }

    println!("{}", chart.title());
    if chart.is_empty() {
        println!("(no complaints for this selection)");
        return Ok(());
    }

    match chart {
        RenderedChart::Bar { x_label, y_label, bars, .. } => {
            let rows = bars.iter().map(|b| vec![b.label.clone(), b.count.to_string()]).collect();
            print_rows(&[x_label, y_label], rows, format)
        }
        RenderedChart::Pie { slices, .. } => {
            let rows = slices.iter().map(|s| vec![s.label.clone(), s.count.to_string()]).collect();
            print_rows(&["Complaint Type", "Count"], rows, format)
        }
        RenderedChart::Sunburst { root, .. } => {
            print_rows(&["Borough", "Complaint Type", "Count"], flatten(root), format)
        }
        RenderedChart::Line { x_label, y_label, points, .. } => {
            let rows = points.iter().map(|p| vec![p.week_start.to_string(), p.count.to_string()]).collect();
            print_rows(&[x_label, y_label], rows, format)
        }
    }
}

fn flatten(root: &Breakdown) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for outer in &root.children {
        for inner in &outer.children {
            rows.push(vec![outer.label.clone(), inner.label.clone(), inner.count.to_string()]);
        }
    }
    rows
}

fn print_rows<S: AsRef<str>>(
    header: &[S],
    rows: Vec<Vec<String>>,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let header: Vec<&str> = header.iter().map(|h| h.as_ref()).collect();

    match format {
        OutputFormat::Json => {
            let objects: Vec<serde_json::Value> = rows.iter()
                .map(|row| {
                    let map: serde_json::Map<String, serde_json::Value> = header.iter()
                        .zip(row)
                        .map(|(h, v)| (h.to_string(), serde_json::Value::String(v.clone())))
                        .collect();
                    serde_json::Value::Object(map)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&objects)?);
        }
        OutputFormat::Csv => {
            println!("{}", header.join(","));
            for row in &rows {
                let cells: Vec<String> = row.iter().map(|v| format_csv_value(v)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&header);

            for row in &rows {
                table.add_row(row);
            }

            println!("{}", table);
            println!("{} row(s)", rows.len());
        }
    }

    Ok(())
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// Entry point and interactive menu.
//
// The table is loaded and cleaned once at start-up. Every menu action that
// changes the selection builds a new `Selection` value and re-runs the
// pipeline over the same immutable table.
use log::{error, info};
use prefecture_dashboard::config::AppConfig;
use prefecture_dashboard::selection::Selection;
use prefecture_dashboard::types::{Metric, Outcome, Table};
use prefecture_dashboard::util::format_int;
use prefecture_dashboard::{loader, output, pipeline};
use std::io::{self, BufRead, Write};

const NO_DATA_WARNING: &str = "条件に一致するデータがありません";

/// One trimmed line from `reader`, or `None` once input is closed or broken.
fn next_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut buf = String::new();
    match reader.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    next_line(&mut io::stdin().lock())
}

fn read_choice() -> Option<String> {
    read_line("Enter choice: ")
}

/// Parse a region answer: comma/space separated names, or 1-based numbers
/// into `available`. Unknown numbers are ignored; unknown names are kept and
/// simply match nothing.
fn parse_regions(input: &str, available: &[String]) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c == '、' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|token| match token.parse::<usize>() {
            Ok(n) => available.get(n.wrapping_sub(1)).cloned(),
            Err(_) => Some(token.to_string()),
        })
        .collect()
}

fn parse_metric(input: &str) -> Option<Metric> {
    match input.parse::<usize>() {
        Ok(n) if (1..=Metric::ALL.len()).contains(&n) => Some(Metric::ALL[n - 1]),
        _ => Metric::from_label(input),
    }
}

fn choose_regions(table: &Table, current: &Selection) -> Option<Selection> {
    let available = table.region_names();
    println!("\n都道府県を選択（複数可）:");
    for (idx, name) in available.iter().enumerate() {
        print!("[{:>2}] {}  ", idx + 1, name);
        if (idx + 1) % 6 == 0 {
            println!();
        }
    }
    println!("\n");
    let picked = parse_regions(&read_line("Regions (numbers or names): ")?, &available);
    info!("selected {} region(s)", picked.len());
    Some(current.with_regions(picked))
}

fn choose_metric(current: &Selection) -> Option<Selection> {
    println!("\n人口区分を選択:");
    for (idx, m) in Metric::ALL.iter().enumerate() {
        let marker = if *m == current.metric { "*" } else { " " };
        println!("{}[{:>2}] {}", marker, idx + 1, m);
    }
    println!();
    let next = match parse_metric(&read_choice()?) {
        Some(m) => current.with_metric(m),
        None => {
            println!("Invalid choice. Keeping {}.\n", current.metric);
            current.clone()
        }
    };
    Some(next)
}

fn show(table: &Table, selection: &Selection) {
    match pipeline::run(table, selection) {
        Ok(Outcome::Ready(out)) => output::print_output(&out),
        Ok(Outcome::NoData) => println!("\n{}\n", NO_DATA_WARNING),
        Err(e) => eprintln!("Error: {}\n", e),
    }
}

fn export_json(table: &Table, selection: &Selection) {
    match pipeline::run(table, selection) {
        Ok(Outcome::Ready(out)) => match output::to_json(&out) {
            Ok(json) => println!("{}\n", json),
            Err(e) => eprintln!("Error: {}\n", e),
        },
        Ok(Outcome::NoData) => println!("\n{}\n", NO_DATA_WARNING),
        Err(e) => eprintln!("Error: {}\n", e),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default();
    println!("都道府県別人口動態");
    println!("出典：e-Stat 人口推計（表番号 25-01）\n");

    let (table, report) = match loader::load_and_clean(&config.csv_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Processing dataset... ({} rows loaded, {} prefectures kept)",
        format_int(report.total_rows),
        format_int(report.kept_rows)
    );
    if report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse errors.",
            format_int(report.parse_errors)
        );
    }

    let mut selection = Selection::from_config(&config);
    show(&table, &selection);

    loop {
        println!("[1] Show result");
        println!("[2] Choose regions");
        println!("[3] Choose metric");
        println!("[4] Export JSON");
        println!("[5] Exit\n");
        let Some(choice) = read_choice() else {
            println!("\nInput closed. Exiting the program.");
            break;
        };
        match choice.as_str() {
            "1" => show(&table, &selection),
            "2" => {
                let Some(next) = choose_regions(&table, &selection) else {
                    break;
                };
                selection = next;
                show(&table, &selection);
            }
            "3" => {
                let Some(next) = choose_metric(&selection) else {
                    break;
                };
                selection = next;
                show(&table, &selection);
            }
            "4" => export_json(&table, &selection),
            "5" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1-5.\n"),
        }
    }
}

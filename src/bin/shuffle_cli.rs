use clap::{ArgGroup, Parser};
use shuffle_lunch::domain::model::parse_participants;
use shuffle_lunch::utils::logger;
use shuffle_lunch::{GroupingRequest, GroupingResult, ShuffleApiClient};
use std::io::Read;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "shuffle-cli")]
#[command(about = "Split a list of names into random lunch groups")]
#[command(group(ArgGroup::new("mode").required(true).args(["group_size", "num_groups"])))]
struct Args {
    /// File with one participant per line; reads stdin when omitted
    #[arg(short, long)]
    file: Option<String>,

    /// Maximum members per group
    #[arg(short = 's', long)]
    group_size: Option<i64>,

    /// Number of groups to form
    #[arg(short = 'n', long)]
    num_groups: Option<i64>,

    /// Edge base URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Spreadsheet-style label: 0 -> "A", 25 -> "Z", 26 -> "AA".
fn group_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

fn render(result: &GroupingResult) -> String {
    let mut out = String::new();
    for (index, group) in result.groups.iter().enumerate() {
        out.push_str(&format!(
            "Group {} ({} members)\n",
            group_label(index),
            group.len()
        ));
        for member in group {
            out.push_str(&format!("  - {}\n", member));
        }
    }
    out
}

fn read_input(file: Option<&str>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let participants = parse_participants(&read_input(args.file.as_deref())?);
    tracing::debug!("read {} participants", participants.len());

    let request = GroupingRequest {
        participants,
        group_size: args.group_size,
        num_groups: args.num_groups,
    };

    let client = ShuffleApiClient::new(&args.url, Duration::from_secs(args.timeout))?;
    match client.shuffle(&request).await {
        Ok(result) => {
            print!("{}", render(&result));
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ shuffle failed: {} (category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_labels() {
        assert_eq!(group_label(0), "A");
        assert_eq!(group_label(2), "C");
        assert_eq!(group_label(25), "Z");
        assert_eq!(group_label(26), "AA");
        assert_eq!(group_label(27), "AB");
    }

    #[test]
    fn test_render() {
        let result = GroupingResult {
            groups: vec![
                vec!["Alice".to_string(), "Bob".to_string()],
                vec!["Charlie".to_string()],
            ],
        };
        assert_eq!(
            render(&result),
            "Group A (2 members)\n  - Alice\n  - Bob\nGroup B (1 members)\n  - Charlie\n"
        );
    }
}

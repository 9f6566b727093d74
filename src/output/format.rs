//! Path formatting for terminal output

use crate::crawler::PathResult;

/// Separator between hops of a formatted path
const HOP_SEPARATOR: &str = " => ";

/// Width of the results banner rule
const BANNER_WIDTH: usize = 50;

/// Formats a path for display
///
/// The endpoints are shown verbatim and intermediate hops in brackets:
/// `start => [hop] => target`. A single-article path is printed bare.
///
/// # Examples
///
/// ```
/// use wiki_pathfinder::output::format_path;
///
/// let path = vec!["A".to_string(), "B".to_string(), "C".to_string()];
/// assert_eq!(format_path(&path), "A => [B] => C");
/// ```
pub fn format_path(path: &[String]) -> String {
    let last = path.len().saturating_sub(1);

    path.iter()
        .enumerate()
        .map(|(i, url)| {
            if i == 0 || i == last {
                url.clone()
            } else {
                format!("[{}]", url)
            }
        })
        .collect::<Vec<_>>()
        .join(HOP_SEPARATOR)
}

/// Formats the outcome of one directional search
pub fn format_result(result: &PathResult, from: &str, to: &str) -> String {
    match result {
        PathResult::Found(path) => format_path(path),
        PathResult::NotFound { max_depth } => {
            format!(
                "Path from {} to {} not found within {} hops",
                from, to, max_depth
            )
        }
    }
}

/// Formats both directions under a results banner
pub fn format_results(forward: &PathResult, backward: &PathResult, from: &str, to: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);

    format!(
        "{rule}\nRESULTS:\n{rule}\n{}\n{}",
        format_result(forward, from, to),
        format_result(backward, to, from),
    )
}

/// Prints both directions to stdout
pub fn print_results(forward: &PathResult, backward: &PathResult, from: &str, to: &str) {
    println!();
    println!("{}", format_results(forward, backward, from, to));
}

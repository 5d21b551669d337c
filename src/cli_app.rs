//! Terminal front end.
//!
//! Each input line maps onto one window action:
//!
//! ```text
//! open <path>        choose a CSV file
//! fit <x> <y>        Calculate with the two column labels
//! fit <x>,<y>        same, for labels containing spaces
//! predict <value>    Predict for an integer x
//! plot               describe the current figure
//! status             window state, file and fitted line
//! help               list commands
//! q                  quit
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::engine::Figure;
use crate::session::{Notification, Session};

pub const HELP: &str =
    "commands: open <path> | fit <x> <y> | fit <x>,<y> | predict <value> | plot | status | help | q";
pub const FIT_USAGE: &str = "usage: fit <x> <y> | fit <x>,<y>";

/// Split `fit` arguments into the two labels.
///
/// A comma separates labels verbatim (header names never contain one);
/// otherwise exactly two whitespace-separated words are expected.
pub fn split_fit_args(rest: &str) -> Option<(&str, &str)> {
    if let Some((x, y)) = rest.split_once(',') {
        return Some((x, y));
    }
    let mut words = rest.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(x), Some(y), None) => Some((x, y)),
        _ => None,
    }
}

fn render_notification(n: &Notification) -> String {
    format!("[{}] {}", n.title, n.message)
}

fn fmt_point(p: &[f64; 2]) -> String {
    format!("({}, {})", p[0], p[1])
}

/// Text description of a figure.
pub fn describe_figure(figure: &Figure) -> String {
    match figure {
        Figure::Placeholder { points } => {
            let pts: Vec<String> = points.iter().map(fmt_point).collect();
            format!("placeholder: {}", pts.join(" "))
        }
        Figure::Fitted {
            x_label,
            y_label,
            points,
            line,
        } => {
            let mut out = format!("scatter: {} points of {} vs {}", points.len(), y_label, x_label);
            if let (Some(first), Some(last)) = (line.first(), line.last()) {
                out.push_str(&format!("\nline: {} -> {}", fmt_point(first), fmt_point(last)));
            }
            out
        }
    }
}

fn describe_status(session: &Session) -> String {
    let mut out = format!("state: {}", session.state());
    if let Some(path) = session.file_path() {
        out.push_str(&format!("\nfile: {}", path.display()));
    }
    if let Some(fit) = session.last_fit() {
        out.push_str(&format!(
            "\nfit: {} (n = {}, r² = {:.4})",
            fit.equation(),
            fit.n,
            fit.r_squared
        ));
    }
    out
}

/// Run one command against the session.
///
/// Returns the text to print, if any. `status_msg` is set to `ok` or `error`
/// for the prompt.
pub fn process_command(session: &mut Session, cmd: &str, status_msg: &mut String) -> Option<String> {
    let cmd = cmd.trim();
    let (word, rest) = match cmd.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim_start()),
        None => (cmd, ""),
    };

    *status_msg = "ok".to_string();
    let notification = match word {
        "open" => {
            let path = if rest.is_empty() {
                None
            } else {
                Some(PathBuf::from(rest))
            };
            Some(session.select_file(path))
        }
        "fit" => {
            let Some((x, y)) = split_fit_args(rest) else {
                *status_msg = "Invalid command".to_string();
                return Some(FIT_USAGE.to_string());
            };
            match session.calculate(x, y) {
                Some(n) => Some(n),
                None => {
                    return session
                        .last_fit()
                        .map(|fit| format!("fitted: {}", fit.equation()))
                }
            }
        }
        "predict" => Some(session.predict(rest)),
        "plot" => return Some(describe_figure(session.figure())),
        "status" => return Some(describe_status(session)),
        "help" => return Some(HELP.to_string()),
        _ => {
            *status_msg = "unrecognized cmd".to_string();
            return None;
        }
    };

    notification.map(|n| {
        if n.is_error() {
            *status_msg = "error".to_string();
        }
        render_notification(&n)
    })
}

/// Read commands from stdin until EOF or `q`.
pub fn run(mut session: Session) -> io::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut status_msg = String::from("ok");

    if interactive {
        println!("{}", HELP);
        print!("({}) > ", status_msg);
        stdout.flush()?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = line.trim();
        if cmd == "q" {
            break;
        }
        if cmd.is_empty() {
            if interactive {
                print!("({}) > ", status_msg);
                stdout.flush()?;
            }
            continue;
        }

        if let Some(out) = process_command(&mut session, cmd, &mut status_msg) {
            println!("{}", out);
        } else if status_msg == "unrecognized cmd" {
            println!("unrecognized cmd");
        }
        if interactive {
            print!("({}) > ", status_msg);
            stdout.flush()?;
        }
    }
    Ok(())
}

use std::io::{BufRead, Write};

use crate::nav::{Intent, Navigator, View};
use crate::report;
use crate::roster::Roster;

const HELP: &str = "Commands: member <id>, status <on-track|at-risk|blocked|completed>, back, help, quit";

/// Line-driven dashboard session. Each accepted command re-renders the
/// current screen; rejected ones leave it in place.
pub fn run<R: BufRead, W: Write>(roster: &Roster, input: R, mut output: W) -> anyhow::Result<()> {
    let mut nav = Navigator::new(roster);

    write!(output, "{}", report::render_screen(roster, &nav.screen()))?;
    writeln!(output, "{HELP}")?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();

        match command {
            "" => continue,
            "quit" | "q" | "exit" => break,
            "help" | "h" | "?" => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            _ => {}
        }

        let intent = match command.parse::<Intent>() {
            Ok(intent) => intent,
            Err(err) => {
                writeln!(output, "error: {err}")?;
                continue;
            }
        };

        let requested = match &intent {
            Intent::SelectMember(id) => Some(id.clone()),
            _ => None,
        };

        match nav.apply(intent) {
            Ok(view) => {
                if let (Some(id), View::Overview) = (requested, view) {
                    writeln!(output, "No team member with id '{id}'.")?;
                }
                writeln!(output)?;
                write!(output, "{}", report::render_screen(roster, &nav.screen()))?;
            }
            Err(err) => writeln!(output, "error: {err}")?,
        }
    }

    output.flush()?;
    Ok(())
}

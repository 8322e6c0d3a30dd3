//! Interactive query menu over a generated tree

use std::io::{self, BufRead, Write};

use crate::tree::FamilyTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Total,
    ByDecade,
    DuplicateNames,
    Quit,
}

impl MenuCommand {
    /// Single letter, case-insensitive, surrounding whitespace ignored
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "T" => Some(MenuCommand::Total),
            "D" => Some(MenuCommand::ByDecade),
            "N" => Some(MenuCommand::DuplicateNames),
            "Q" => Some(MenuCommand::Quit),
            _ => None,
        }
    }
}

fn print_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Are you interested in:")?;
    writeln!(out, "(T)otal number of people in the tree")?;
    writeln!(out, "Total number of people in the tree by (D)ecade")?;
    writeln!(out, "(N)ames duplicated")?;
    writeln!(out, "(Q)uit")?;
    write!(out, "> ")?;
    out.flush()
}

/// Write the answer to one query
pub fn answer<W: Write>(tree: &FamilyTree, command: MenuCommand, out: &mut W) -> io::Result<()> {
    match command {
        MenuCommand::Total => {
            writeln!(out, "The tree contains {} people total", tree.total_count())?;
        }
        MenuCommand::ByDecade => {
            for (decade, count) in tree.count_by_decade() {
                writeln!(out, "{}: {}", decade, count)?;
            }
        }
        MenuCommand::DuplicateNames => {
            let duplicates = tree.duplicate_names();
            if duplicates.is_empty() {
                writeln!(out, "There are no duplicate names in the tree.")?;
            } else {
                writeln!(out, "There are {} duplicate name(s) in the tree:", duplicates.len())?;
                for name in duplicates {
                    writeln!(out, "* {}", name)?;
                }
            }
        }
        MenuCommand::Quit => {}
    }
    Ok(())
}

/// Prompt, read and answer until the user quits or input ends
pub fn run_menu<R: BufRead, W: Write>(tree: &FamilyTree, input: R, mut out: W) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        print_prompt(&mut out)?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        match MenuCommand::parse(&line) {
            Some(MenuCommand::Quit) => break,
            Some(command) => answer(tree, command, &mut out)?,
            None => writeln!(out, "Invalid choice. Please enter T, D, N, or Q.")?,
        }
    }

    tracing::debug!("Menu session ended");
    Ok(())
}

use anyhow::{Context, Result};
use linetool::args::{self, Command};
use linetool::{
    add_new_to_file, create_or_expect, overwrite_file, read_file, read_lines, remove_from_file, Limit, Lines,
};
use std::io::{self, BufWriter, Write};

fn main() -> Result<()> {
    let args = args::parsed();
    linetool::logging::init(&args.config)?;

    match args.command {
        Command::Add { file } => add_new_to_file(&file, &stdin_lines()?)?,
        Command::Remove { file, delete_if_empty } => {
            remove_from_file(&file, &stdin_lines()?, delete_if_empty)?;
        }
        Command::Expect { file, allow_empty } => create_or_expect(&file, &stdin_lines()?, allow_empty)?,
        Command::Set { file } => overwrite_file(&file, &stdin_lines()?)?,
        Command::Show { file, limit } => {
            let mut out = BufWriter::new(io::stdout().lock());
            for line in read_file(&file, limit)? {
                out.write_all(&line)?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

fn stdin_lines() -> Result<Lines> {
    read_lines(io::stdin().lock(), Limit::Unlimited).context("Can't read lines from standard input")
}

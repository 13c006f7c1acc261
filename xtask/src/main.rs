//! Development tasks: man pages and shell completions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "summark development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and each subcommand.
    Man {
        /// Output directory.
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate shell completion scripts.
    Completions {
        /// Output directory.
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => generate_man(&out),
        Task::Completions { out } => generate_completions(&out),
    }
}

fn generate_man(out: &Path) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let cmd = summark::command();
    let name = cmd.get_name().to_string();

    write_man_page(&cmd, &out.join(format!("{name}.1")))?;
    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let page = out.join(format!("{name}-{}.1", sub.get_name()));
        write_man_page(&sub.clone().name(format!("{name}-{}", sub.get_name())), &page)?;
    }

    println!("man pages written to {}", out.display());
    Ok(())
}

fn write_man_page(cmd: &clap::Command, path: &Path) -> io::Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(path, buffer)
}

fn generate_completions(out: &Path) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let mut cmd = summark::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let path = clap_complete::generate_to(shell, &mut cmd, "summark", out)?;
        println!("{shell}: {}", path.display());
    }
    Ok(())
}

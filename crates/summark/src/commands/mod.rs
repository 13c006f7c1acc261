//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod info;
pub mod keywords;
pub mod render;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod table;

/// Path argument meaning standard input.
pub const STDIN_PATH: &str = "-";

/// Read an input file (or stdin for `-`) and validate its size against the
/// configured limit.
///
/// Files are checked via metadata before reading. Stdin is read up to one
/// byte past the limit so oversized input is rejected without buffering it
/// all.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_limited(std::io::stdin().lock(), "stdin", max_bytes);
    }

    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

fn read_limited(mut reader: impl Read, name: &str, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    match max_bytes {
        Some(max) => {
            reader
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .with_context(|| format!("failed to read {name}"))?;
            if content.len() > max {
                anyhow::bail!("input too large: {name} exceeds {max} bytes");
            }
        }
        None => {
            reader
                .read_to_string(&mut content)
                .with_context(|| format!("failed to read {name}"))?;
        }
    }
    Ok(content)
}

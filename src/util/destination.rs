use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{RecrepoError, Result};

pub const STDOUT_SENTINEL: &str = "-";

/// Where the JSON records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn parse(value: &str) -> Self {
        if value == STDOUT_SENTINEL {
            Destination::Stdout
        } else {
            Destination::File(PathBuf::from(value))
        }
    }

    /// Relative file paths are taken against `base`.
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            Destination::File(path) if path.is_relative() => Destination::File(base.join(path)),
            other => other,
        }
    }

    fn path(&self) -> PathBuf {
        match self {
            Destination::Stdout => PathBuf::from(STDOUT_SENTINEL),
            Destination::File(path) => path.clone(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => write!(f, "stdout"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    Compact,
    /// Four-space indentation.
    Pretty,
}

impl JsonStyle {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            JsonStyle::Pretty
        } else {
            JsonStyle::Compact
        }
    }
}

/// Single-line JSON with a space after `,` and `:`.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// No trailing newline in either style.
pub fn render_json<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let serialized = match style {
        JsonStyle::Compact => {
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
            value.serialize(&mut serializer)
        }
        JsonStyle::Pretty => {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut serializer)
        }
    };
    serialized.map_err(|err| RecrepoError::Other(anyhow::Error::new(err)))?;
    Ok(buf)
}

/// Serialize `value` and write it out. Nothing is opened until rendering
/// succeeded; files are created or truncated.
pub fn write_json<T: Serialize + ?Sized>(
    destination: &Destination,
    value: &T,
    style: JsonStyle,
) -> Result<()> {
    let bytes = render_json(value, style)?;
    let written = match destination {
        Destination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes).and_then(|_| stdout.flush())
        }
        Destination::File(path) => fs::write(path, &bytes),
    };
    written.map_err(|source| RecrepoError::Destination {
        path: destination.path(),
        source,
    })
}

//! Error taxonomy for mesh loading.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which attribute array an index stream points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Position => "position",
            Attribute::Texcoord => "texcoord",
            Attribute::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Every way a load can fail. None of them yield a partial mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The source could not be opened or read.
    #[error("failed to read OBJ source{}: {source}", describe_path(.path))]
    File {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// A record is malformed: wrong token count, bad number, bad face arity.
    #[error("malformed OBJ line {line}: {reason} ('{content}')")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    /// A face corner references an attribute that does not exist.
    #[error("{attribute} index {index} out of bounds (len={len}) at corner {corner}")]
    Index {
        attribute: Attribute,
        index: usize,
        len: usize,
        corner: usize,
    },

    /// An index stream broke the whole-triangle layout.
    #[error("{stream} stream has length {len}, expected {expected}")]
    Shape {
        stream: &'static str,
        len: usize,
        expected: String,
    },
}

pub type MeshResult<T> = Result<T, MeshError>;

fn describe_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" '{}'", p.display()),
        None => String::new(),
    }
}

// src/resources/kind.rs

use std::fmt;
use std::str::FromStr;

use crate::errors::TaskguardError;

/// What a resolved path must be for a resource check to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceKind {
    File,
    Directory,
    #[default]
    FileOrDirectory,
}

impl ResourceKind {
    /// Human-readable noun used in "does not exist" messages.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::File => "File",
            ResourceKind::Directory => "Directory",
            ResourceKind::FileOrDirectory => "File or directory",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::File => "file",
            ResourceKind::Directory => "dir",
            ResourceKind::FileOrDirectory => "fileAndDir",
        };
        f.write_str(s)
    }
}

impl FromStr for ResourceKind {
    type Err = TaskguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "file" => Ok(ResourceKind::File),
            "dir" | "directory" => Ok(ResourceKind::Directory),
            "fileAndDir" | "file_or_dir" | "any" => Ok(ResourceKind::FileOrDirectory),
            other => Err(TaskguardError::InvalidArgument(format!(
                "Invalid resource check of type \"{other}\" used!"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("file".parse::<ResourceKind>().unwrap(), ResourceKind::File);
        assert_eq!("dir".parse::<ResourceKind>().unwrap(), ResourceKind::Directory);
        assert_eq!(
            " fileAndDir ".parse::<ResourceKind>().unwrap(),
            ResourceKind::FileOrDirectory
        );
    }

    #[test]
    fn unknown_kind_is_invalid_argument() {
        match "folder".parse::<ResourceKind>() {
            Err(TaskguardError::InvalidArgument(msg)) => {
                assert!(msg.contains("\"folder\""));
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in [
            ResourceKind::File,
            ResourceKind::Directory,
            ResourceKind::FileOrDirectory,
        ] {
            assert_eq!(kind.to_string().parse::<ResourceKind>().unwrap(), kind);
        }
    }
}

// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use std::str::FromStr;

/// Which store adapter backs the handyman and booking collaborators.
///
/// Memory: records live in process, optionally loaded from a JSON seed file.
/// Used for local development, demos and tests.
///
/// Postgres: records are read from the marketplace database through `sqlx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl StoreBackend {
    pub fn requires_database(&self) -> bool {
        matches!(self, StoreBackend::Postgres)
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" => Ok(StoreBackend::Postgres),
            _ => Err(format!(
                "STORE_BACKEND must be 'memory' or 'postgres', got: {}",
                s
            )),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Postgres => write!(f, "postgres"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory() {
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
    }

    #[test]
    fn test_parse_postgres() {
        assert_eq!(
            "postgres".parse::<StoreBackend>(),
            Ok(StoreBackend::Postgres)
        );
    }

    #[test]
    fn test_parse_invalid_is_error() {
        let err = "mongo".parse::<StoreBackend>().unwrap_err();
        assert!(err.contains("STORE_BACKEND must be 'memory' or 'postgres'"));
    }

    #[test]
    fn test_only_postgres_requires_database() {
        assert!(!StoreBackend::Memory.requires_database());
        assert!(StoreBackend::Postgres.requires_database());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for backend in [StoreBackend::Memory, StoreBackend::Postgres] {
            assert_eq!(backend.to_string().parse::<StoreBackend>(), Ok(backend));
        }
    }
}

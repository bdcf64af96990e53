//! Dialect Registry - SQL dialect profiles for transfer targets
//!
//! Each driver maps to a `DialectProfile` that declares the insert/replace
//! strategies a data load may use when a row collides with an existing key.
//!
//! Key principles:
//! - Dialect metadata is explicit, not inferred
//! - Non-SQL drivers (Redis, MongoDB) are simply not registered
//! - Insert methods are listed in the order the UI should present them

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// A dialect-specific strategy for inserting rows whose key already exists
/// (e.g. `INSERT IGNORE`, `ON CONFLICT DO UPDATE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReplaceMethod {
    /// Stable identifier persisted in load settings
    pub id: Cow<'static, str>,
    /// Label shown in the UI
    pub label: Cow<'static, str>,
}

impl InsertReplaceMethod {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id: Cow::Borrowed(id),
            label: Cow::Borrowed(label),
        }
    }

    /// Create a method from owned strings (plugins, tests)
    pub fn custom(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Cow::Owned(id.into()),
            label: Cow::Owned(label.into()),
        }
    }
}

const NO_INSERT_METHODS: &[InsertReplaceMethod] = &[];

const POSTGRES_INSERT_METHODS: &[InsertReplaceMethod] = &[
    InsertReplaceMethod::new("pgOnConflictDoNothing", "ON CONFLICT DO NOTHING"),
    InsertReplaceMethod::new("pgOnConflictDoUpdate", "ON CONFLICT DO UPDATE"),
];

const MYSQL_INSERT_METHODS: &[InsertReplaceMethod] = &[
    InsertReplaceMethod::new("mysqlInsertIgnore", "INSERT IGNORE"),
    InsertReplaceMethod::new("mysqlReplace", "REPLACE INTO"),
    InsertReplaceMethod::new("mysqlOnDuplicateKeyUpdate", "ON DUPLICATE KEY UPDATE"),
];

const SQLITE_INSERT_METHODS: &[InsertReplaceMethod] = &[
    InsertReplaceMethod::new("sqliteInsertOrIgnore", "INSERT OR IGNORE"),
    InsertReplaceMethod::new("sqliteInsertOrReplace", "INSERT OR REPLACE"),
];

/// Dialect profile for a database driver
#[derive(Debug, Clone)]
pub struct DialectProfile {
    /// Unique identifier (matches driver id)
    pub id: Cow<'static, str>,

    /// Human-readable language name
    pub language_name: Cow<'static, str>,

    /// Supported insert/replace methods, in presentation order
    pub insert_replace_methods: Cow<'static, [InsertReplaceMethod]>,
}

impl DialectProfile {
    /// Create a SQL dialect profile with no insert/replace methods
    pub const fn new(id: &'static str, language_name: &'static str) -> Self {
        Self {
            id: Cow::Borrowed(id),
            language_name: Cow::Borrowed(language_name),
            insert_replace_methods: Cow::Borrowed(NO_INSERT_METHODS),
        }
    }

    /// Set the supported insert/replace methods
    pub fn with_insert_methods(
        mut self,
        methods: impl Into<Cow<'static, [InsertReplaceMethod]>>,
    ) -> Self {
        self.insert_replace_methods = methods.into();
        self
    }

    /// Supported insert/replace methods, in presentation order
    pub fn insert_replace_methods(&self) -> &[InsertReplaceMethod] {
        &self.insert_replace_methods
    }
}

/// Dialect registry
///
/// Maps driver IDs to their dialect profiles. This is the central source of truth
/// for which insert/replace strategies a load into a given target may use.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    profiles: HashMap<String, DialectProfile>,
}

impl DialectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in profiles
    pub fn with_builtin_profiles() -> Self {
        let mut registry = Self::new();

        registry.register(
            DialectProfile::new("postgres", "PostgreSQL").with_insert_methods(POSTGRES_INSERT_METHODS),
        );
        registry.register(
            DialectProfile::new("mysql", "MySQL").with_insert_methods(MYSQL_INSERT_METHODS),
        );
        registry.register(
            DialectProfile::new("sqlite", "SQLite").with_insert_methods(SQLITE_INSERT_METHODS),
        );
        registry.register(DialectProfile::new("clickhouse", "ClickHouse"));
        registry.register(DialectProfile::new("ansi", "ANSI SQL"));

        registry
    }

    /// Register a dialect profile, replacing any profile with the same id
    pub fn register(&mut self, profile: DialectProfile) {
        self.profiles.insert(profile.id.to_string(), profile);
    }

    /// Get a dialect profile by driver ID
    pub fn get(&self, driver_id: &str) -> Option<&DialectProfile> {
        self.profiles.get(driver_id)
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global dialect registry instance
///
/// This is initialized with default profiles for all supported SQL drivers.
pub static DIALECT_REGISTRY: LazyLock<Arc<DialectRegistry>> =
    LazyLock::new(|| Arc::new(DialectRegistry::with_builtin_profiles()));

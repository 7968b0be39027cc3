//! Session scope id generation.
//!
//! Ids are 8 lowercase characters drawn from a unique-id source. Ids that
//! collide with a reserved token are discarded and drawn again.

use tracing::debug;

use crate::error::{Result, ScopeError};
use crate::scope::reserved_scope_ids;

/// Length of every generated scope id.
pub const SCOPE_ID_LEN: usize = 8;

/// Upper bound on draws before generation gives up.
/// A healthy source hits a reserved token roughly once in 2^31 draws.
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 64;

/// Character used to pad short ids up to [`SCOPE_ID_LEN`].
const PAD_CHAR: char = 'f';

/// Source of fresh unique tokens.
pub trait UniqueIdSource {
    fn next_id(&self) -> String;
}

impl<F> UniqueIdSource for F
where
    F: Fn() -> String,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Random v4 UUIDs rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl UniqueIdSource for UuidIdSource {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Lowercases `raw` and forces it to exactly [`SCOPE_ID_LEN`] characters,
/// truncating long input and right-padding short input with `f`.
pub fn normalize_scope_id(raw: &str) -> String {
    let mut id: String = raw.to_lowercase().chars().take(SCOPE_ID_LEN).collect();
    let len = id.chars().count();
    if len < SCOPE_ID_LEN {
        id.extend(std::iter::repeat(PAD_CHAR).take(SCOPE_ID_LEN - len));
    }
    id
}

/// Draws scope ids from a [`UniqueIdSource`], skipping reserved tokens.
#[derive(Debug, Clone)]
pub struct ScopeIdGenerator<S = UuidIdSource> {
    source: S,
    max_attempts: u32,
}

impl Default for ScopeIdGenerator<UuidIdSource> {
    fn default() -> Self {
        Self::new(UuidIdSource)
    }
}

impl<S: UniqueIdSource> ScopeIdGenerator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }

    /// Overrides the retry cap. A cap of zero is treated as one attempt.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Generates an id that is not a member of `reserved`.
    ///
    /// Fails with [`ScopeError::IdSpaceExhausted`] only when every draw up to
    /// the retry cap was reserved, which means the source is broken.
    pub fn generate<R: AsRef<str>>(&self, reserved: &[R]) -> Result<String> {
        for attempt in 1..=self.max_attempts {
            let id = normalize_scope_id(&self.source.next_id());
            if !reserved.iter().any(|r| r.as_ref() == id) {
                return Ok(id);
            }
            debug!(id = %id, attempt, "Generated scope id is reserved; drawing again");
        }

        Err(ScopeError::IdSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Generates an id that is neither a sentinel nor a member of `taken`.
    pub fn generate_unused<R: AsRef<str>>(&self, taken: &[R]) -> Result<String> {
        let mut reserved: Vec<&str> = reserved_scope_ids().to_vec();
        reserved.extend(taken.iter().map(|t| t.as_ref()));
        self.generate(&reserved)
    }
}

/// Generates a scope id avoiding the built-in sentinel tokens.
pub fn generate_scope_id() -> Result<String> {
    ScopeIdGenerator::default().generate(&reserved_scope_ids())
}

/// Generates a scope id avoiding exactly the tokens in `reserved`.
pub fn generate_scope_id_with<R: AsRef<str>>(reserved: &[R]) -> Result<String> {
    ScopeIdGenerator::default().generate(reserved)
}

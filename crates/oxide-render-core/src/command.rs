//! Command plans.
//!
//! Some statements expand to several physical commands. The plan is
//! computed once per statement and handed to every render step, so a
//! provider keeps no per-statement state of its own.

use crate::ast::Field;

/// Identity emulation state carried between render steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityState {
    /// The statement involves no identity emulation.
    NotIdentity,
    /// The identity field whose generator and trigger must be emitted.
    Pending(Field),
}

/// How many commands a statement renders to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    count: usize,
    identity: IdentityState,
}

impl CommandPlan {
    /// A plan with one command and no identity.
    #[must_use]
    pub const fn single() -> Self {
        Self {
            count: 1,
            identity: IdentityState::NotIdentity,
        }
    }

    /// A plan of `count` commands emulating `field`.
    #[must_use]
    pub const fn with_identity(count: usize, field: Field) -> Self {
        Self {
            count,
            identity: IdentityState::Pending(field),
        }
    }

    /// Number of commands.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// The identity state.
    #[must_use]
    pub const fn identity(&self) -> &IdentityState {
        &self.identity
    }

    /// The recorded identity field, if any.
    #[must_use]
    pub const fn identity_field(&self) -> Option<&Field> {
        match &self.identity {
            IdentityState::Pending(field) => Some(field),
            IdentityState::NotIdentity => None,
        }
    }
}

impl Default for CommandPlan {
    fn default() -> Self {
        Self::single()
    }
}

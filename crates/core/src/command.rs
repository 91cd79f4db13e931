// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tradegate_domain::TransitionKind;

/// A requested ad status change, expressed as data only.
///
/// Deletion is not a command: it bypasses the state guard and goes through
/// [`crate::apply_ad_delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdCommand {
    /// Accept a pending ad.
    Approve,
    /// Make an approved or paused ad visible to traders.
    Publish,
    /// Reject an ad from any non-terminal status.
    Reject {
        /// Reason shown to the owner. A default note is used when absent.
        reason: Option<String>,
    },
    /// Temporarily hide a published ad.
    Pause,
    /// Close a published ad as fulfilled.
    Complete,
    /// Withdraw a published ad.
    Cancel,
}

impl AdCommand {
    /// Builds the command for a transition kind.
    ///
    /// Returns `None` for kinds that are not ad status changes.
    #[must_use]
    pub fn for_kind(kind: TransitionKind, reason: Option<String>) -> Option<Self> {
        match kind {
            TransitionKind::Approve => Some(Self::Approve),
            TransitionKind::Publish => Some(Self::Publish),
            TransitionKind::Reject => Some(Self::Reject { reason }),
            TransitionKind::Pause => Some(Self::Pause),
            TransitionKind::Complete => Some(Self::Complete),
            TransitionKind::Cancel => Some(Self::Cancel),
            TransitionKind::Delete | TransitionKind::MarkPaid | TransitionKind::ReleaseFunds => {
                None
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TransitionKind {
        match self {
            Self::Approve => TransitionKind::Approve,
            Self::Publish => TransitionKind::Publish,
            Self::Reject { .. } => TransitionKind::Reject,
            Self::Pause => TransitionKind::Pause,
            Self::Complete => TransitionKind::Complete,
            Self::Cancel => TransitionKind::Cancel,
        }
    }

    /// Name recorded in the audit log.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Approve => "ApproveAd",
            Self::Publish => "PublishAd",
            Self::Reject { .. } => "RejectAd",
            Self::Pause => "PauseAd",
            Self::Complete => "CompleteAd",
            Self::Cancel => "CancelAd",
        }
    }
}

/// A requested transaction status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionCommand {
    /// Confirm the buyer's payment.
    MarkPaid {
        /// External payment reference, if one was supplied.
        payment_reference: Option<String>,
    },
    /// Release held funds to the buyer.
    ReleaseFunds,
    /// Abort the exchange.
    Cancel,
}

impl TransactionCommand {
    /// Builds the command for a transition kind.
    ///
    /// Returns `None` for kinds that are not transaction status changes.
    #[must_use]
    pub fn for_kind(kind: TransitionKind, payment_reference: Option<String>) -> Option<Self> {
        match kind {
            TransitionKind::MarkPaid => Some(Self::MarkPaid { payment_reference }),
            TransitionKind::ReleaseFunds => Some(Self::ReleaseFunds),
            TransitionKind::Cancel => Some(Self::Cancel),
            _ => None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TransitionKind {
        match self {
            Self::MarkPaid { .. } => TransitionKind::MarkPaid,
            Self::ReleaseFunds => TransitionKind::ReleaseFunds,
            Self::Cancel => TransitionKind::Cancel,
        }
    }

    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::MarkPaid { .. } => "MarkPaid",
            Self::ReleaseFunds => "ReleaseFunds",
            Self::Cancel => "CancelTransaction",
        }
    }
}

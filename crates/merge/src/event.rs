use derive_more::Display;

use crate::change::{ChangeId, TwoSideId, TwoSideKind};
use crate::side::Side;

/// Why a change left its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RemovalReason {
    /// Removed on request
    #[display(fmt = "ignored")]
    Ignored,

    /// An edit destroyed one of its live ranges
    #[display(fmt = "invalidated")]
    Invalidated,

    /// Its twin went away, taking the pair with it
    #[display(fmt = "dissolved")]
    Dissolved,
}

/// Bookkeeping changes reported to the UI, drained with
/// [`crate::MergeList::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeEvent {
    /// The change moved from pending to applied
    Applied { change: ChangeId, side: Side },

    /// The change was removed from its list
    Removed {
        change: ChangeId,
        side: Side,
        reason: RemovalReason,
    },

    /// Both halves of a two-side change are gone
    PairDissolved { pair: TwoSideId, kind: TwoSideKind },
}

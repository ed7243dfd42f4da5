//! # ST-03 Notifications
//!
//! Bounded, newest-first log of user-facing notifications. The update engine
//! appends one entry per status transition; the UI marks entries read or
//! deletes them.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | At most `capacity` entries, oldest evicted first | `domain/log.rs` - `push()` |
//! | INVARIANT-2 | Unread count equals entries with `read == false` | `domain/log.rs` - derived, never stored |
//! | INVARIANT-3 | Entries are immutable except `read` | `domain/notification.rs` - private fields |

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{
    Notification, NotificationDraft, NotificationId, NotificationKind, NotificationLog,
    DEFAULT_CAPACITY, DEFAULT_RECENT,
};
pub use error::NotificationError;
pub use service::NotificationCenter;

//! Seeding phases, one module per entity kind.
//!
//! Each phase announces itself, walks the records earlier phases created,
//! and records one outcome per unit of work. No error escapes a phase: a
//! failed call is reported and the loop moves on.

pub mod certificates;
pub mod comments;
pub mod donations;
pub mod favorites;
pub mod foundations;
pub mod notifications;
pub mod participation;
pub mod ratings;
pub mod social_actions;
pub mod suggestions;
pub mod users;

pub use certificates::seed_certificates;
pub use comments::seed_comments;
pub use donations::seed_donations;
pub use favorites::seed_favorites;
pub use foundations::seed_foundations;
pub use notifications::seed_notifications;
pub use participation::seed_participation_requests;
pub use ratings::seed_ratings;
pub use social_actions::seed_social_actions;
pub use suggestions::seed_suggestions;
pub use users::seed_users;

use rand::Rng;

/// Random count in `1..=max`, or zero when `max` is zero.
pub(crate) fn random_count<R: Rng + ?Sized>(rng: &mut R, max: usize) -> usize {
    if max == 0 { 0 } else { rng.random_range(1..=max) }
}

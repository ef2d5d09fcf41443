//! Records the client keeps about entities it created.
//!
//! The API owns the entities; the client only retains the id returned on
//! creation plus the fields later phases need to pick actors and targets.

use chrono::{DateTime, Utc};
use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier issued by the API on creation.
///
/// The platform issues UUID strings; simulated servers may issue integers.
/// The id is sent back in whichever JSON form it arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Numeric id
    Int(i64),
    /// String id (UUID on the real platform)
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Body shape every creation endpoint shares: at least an `id`.
#[derive(Debug, Deserialize)]
pub struct Created {
    /// Id of the new entity
    pub id: EntityId,
}

/// Account kind on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Donor / volunteer
    User,
    /// Foundation operator
    Foundation,
}

/// A registered account and the credentials to log in as it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Id returned by registration
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
    /// Account kind
    pub user_type: UserType,
}

/// A foundation profile owned by a foundation account.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundationRecord {
    pub id: EntityId,
    /// Owning account
    pub user_id: EntityId,
    pub legal_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonationRecord {
    pub id: EntityId,
    /// Donor
    pub user_id: EntityId,
    pub foundation_id: EntityId,
    pub amount: f64,
}

/// A social action (also exposed by the API as an "opportunity").
#[derive(Debug, Clone, PartialEq)]
pub struct SocialActionRecord {
    pub id: EntityId,
    pub foundation_id: EntityId,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl SocialActionRecord {
    /// Whether volunteers can still apply at `now`.
    #[must_use]
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.end_date > now
    }
}

/// What a comment is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentTarget {
    Donation(EntityId),
    SocialAction(EntityId),
    Foundation(EntityId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: EntityId,
    /// Author
    pub user_id: EntityId,
    pub target: CommentTarget,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub id: EntityId,
    pub user_id: EntityId,
    pub donation_id: EntityId,
    pub rating: u8,
}

/// Review state of a participation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// Value sent in the `status` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipationRecord {
    pub id: EntityId,
    /// Applicant
    pub user_id: EntityId,
    pub social_action_id: EntityId,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificateRecord {
    pub id: EntityId,
    /// Recipient
    pub user_id: EntityId,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub id: EntityId,
    /// Recipient
    pub user_id: EntityId,
    pub message: String,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRecord {
    pub id: EntityId,
    /// Author
    pub user_id: EntityId,
    pub content: String,
    pub processed: bool,
}

/// Kind of item a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Foundation,
    /// A social action, under its public "opportunity" name
    Opportunity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    pub id: EntityId,
    pub user_id: EntityId,
    pub item_id: EntityId,
    pub item_type: FavoriteKind,
}

/// Anything carrying an API id.
pub trait Identified {
    /// Id returned by the API on creation
    fn id(&self) -> &EntityId;
}

macro_rules! impl_identified {
    ($($record:ty),* $(,)?) => {
        $(
            impl Identified for $record {
                fn id(&self) -> &EntityId {
                    &self.id
                }
            }
        )*
    };
}

impl_identified!(
    UserRecord,
    FoundationRecord,
    DonationRecord,
    SocialActionRecord,
    CommentRecord,
    RatingRecord,
    ParticipationRecord,
    CertificateRecord,
    NotificationRecord,
    SuggestionRecord,
    FavoriteRecord,
);

/// Ordered set of records of one entity kind, unique by id.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> Collection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a record. Returns `false` (and keeps the existing record) if
    /// the id is already present.
    pub fn insert(&mut self, record: T) -> bool {
        if self.contains(record.id()) {
            return false;
        }
        self.items.push(record);
        true
    }

    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Removes and returns the record with the given id.
    pub fn remove(&mut self, id: &EntityId) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Picks a uniformly random record.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.items.choose(rng)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

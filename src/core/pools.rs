//! Synthetic payload material.
//!
//! Canned text pools for platform content plus `fake`-backed personal and
//! company details. Everything that must be reproducible in tests takes an
//! explicit RNG; `fake` draws from its own thread-local generator.

use chrono::{DateTime, Duration, Utc};
use fake::{
    Fake,
    faker::{
        address::en::{BuildingNumber, CityName, StreetName, ZipCode},
        company::en::CompanyName,
        internet::en::SafeEmail,
        name::en::{FirstName, LastName},
        phone_number::en::PhoneNumber,
    },
};
use rand::{Rng, seq::IndexedRandom};

const FOUNDATION_PREFIXES: &[&str] = &[
    "Foundation", "Association", "NGO", "Organization", "Network", "Movement", "Alliance",
    "Collective", "Center", "Institute",
];

const FOUNDATION_THEMES: &[&str] = &[
    "Environmental", "Educational", "Social", "Humanitarian", "Development", "Community",
    "Solidarity", "Youth", "Cultural", "Ecological", "Relief", "Support", "Wellbeing",
    "Protection",
];

const FOUNDATION_FOCUSES: &[&str] = &[
    "Children", "Youth", "Women", "Animals", "Rainforests", "Oceans", "Education", "Health",
    "Culture", "Technology", "Science", "Art", "Sport", "Housing", "Food", "Clean Water",
    "Clean Energy", "Elders", "Indigenous Communities", "Migrants", "Inclusion",
];

const ACTION_KINDS: &[&str] = &[
    "Cleanup campaign in",
    "Reforestation day in",
    "Educational workshop on",
    "Home building in",
    "Food distribution for",
    "Vaccination campaign in",
    "Charity marathon for",
    "Training course in",
    "Water system installation in",
    "Literacy program in",
    "Solidarity fair for",
    "Seminar on",
    "Community garden rollout in",
    "Rescue and rehabilitation of",
    "Habitat restoration in",
];

const ACTION_LOCATIONS: &[&str] = &[
    "the San Juan community",
    "the Las Flores neighborhood",
    "the Benito Juarez primary school",
    "the Veracruz coastline",
    "Chapultepec forest",
    "the Sierra Gorda reserve",
    "the Esperanza community center",
    "rural Oaxaca",
    "the children's hospital",
    "the public university",
    "the earthquake-affected areas",
    "the Nueva Vida district",
    "the municipal park",
    "the public library",
    "the archaeological zone",
];

const ACTION_DETAILS: &[&str] = &[
    "with local volunteers",
    "together with the city council",
    "backed by local businesses",
    "with citizen participation",
    "for low-income families",
    "for children at risk",
    "funded by international donors",
    "using recycled materials",
    "applying sustainable technology",
    "to strengthen the local economy",
    "focused on native species",
    "with innovative methods",
    "to foster community development",
    "with a gender perspective",
    "to promote a culture of peace",
];

const DONATION_COMMENTS: &[&str] = &[
    "Happy to contribute to such a noble cause!",
    "I hope my donation helps you reach your goals.",
    "Thank you for the work you do, keep it up.",
    "My small contribution to a better world.",
    "Inspiring to see the impact you have on the community.",
    "Donate too, together we make a difference.",
    "First time donating here but not the last.",
    "Impressed by how transparently the funds are used.",
    "My family and I are committed to your work.",
    "Proud to support initiatives that bring real change.",
];

const FOUNDATION_COMMENTS: &[&str] = &[
    "This foundation does exceptional work in the community.",
    "I've volunteered with them several times and it's always been positive.",
    "Love their commitment to transparency in reporting donations.",
    "Their programs have real, measurable impact. Highly recommended.",
    "The way they treat volunteers is excellent.",
    "Their innovative approach to social problems is admirable.",
    "Do you have part-time volunteering programs?",
    "How can I get more involved with this foundation?",
    "Thank you for your constant work for those most in need.",
    "Your work is truly inspiring.",
];

const SOCIAL_ACTION_COMMENTS: &[&str] = &[
    "I'd love to take part in this initiative.",
    "Is it possible to join as a volunteer?",
    "Excellent project, much needed in the community.",
    "When is the next similar activity?",
    "I joined a previous event and it was a transformative experience.",
    "What are the requirements to join the team?",
    "I'll share this on my social networks.",
    "Do you accept material donations or only money?",
    "Congratulations on organizing this, we need more initiatives like it.",
    "Initiatives like this change the world!",
];

const SUGGESTIONS: &[&str] = &[
    "Monthly recurring donations would be useful.",
    "I'd like to filter social actions by location.",
    "Please add direct sharing to social networks.",
    "A full donation history with downloadable receipts would be great.",
    "Could you add reminders for social actions?",
    "Please allow donating in other currencies.",
    "I'd love photo galleries of completed social actions.",
    "A live chat for questions about foundations would help.",
    "Could you add an interactive map of foundations and actions?",
    "Consider a level system for frequent donors.",
    "A section with beneficiary testimonials would be nice.",
    "Could you add a blog with success stories and news?",
    "Push notifications for urgent emergencies would help.",
    "I'd like to create donation teams with friends and family.",
    "An impact calculator showing what each donation achieves would be useful.",
];

const CERTIFICATE_DESCRIPTIONS: &[&str] = &[
    "Volunteer certificate for reforestation campaigns",
    "Recognition for sustained support of education programs",
    "Certificate of participation in home building",
    "Recognition for outstanding donations",
    "Certificate of participation in community health campaigns",
    "Recognition for volunteer work with the elderly",
    "First aid training certificate",
    "Recognition for joining cleanup days",
    "Certificate of collaboration in literacy programs",
    "Recognition for supporting inclusion initiatives",
    "Volunteer certificate for community kitchens",
    "Recognition for participation in cultural festivals",
    "Certificate of attendance at sustainable development workshops",
    "Recognition for supporting conservation projects",
    "Certificate of participation in humanitarian brigades",
];

const NOTIFICATION_MESSAGES: &[&str] = &[
    "A new social action is available near you!",
    "Your donation was received successfully.",
    "A foundation replied to your comment.",
    "Your participation request was accepted.",
    "Congratulations! You received a new certificate.",
    "Someone rated your comment positively.",
    "A social action you follow starts soon.",
    "A new donation method has been added.",
    "Important update about a social action.",
    "Reminder: volunteering event tomorrow.",
    "Thank you for your continued support!",
    "A foundation posted new photos.",
    "You've completed your first year as a collaborator!",
    "Someone commented on one of your donations.",
    "Our terms of service have been updated.",
];

/// Message sent when applying through the opportunities endpoint.
pub const APPLICATION_MESSAGE: &str = "I'd like to take part in this activity";

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    // Pools are non-empty constants.
    pool.choose(rng).copied().unwrap_or_default()
}

/// Name like "Alliance Ecological Oceans".
pub fn foundation_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, FOUNDATION_PREFIXES),
        pick(rng, FOUNDATION_THEMES),
        pick(rng, FOUNDATION_FOCUSES)
    )
}

pub fn social_action_description<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, ACTION_KINDS),
        pick(rng, ACTION_LOCATIONS),
        pick(rng, ACTION_DETAILS)
    )
}

pub fn donation_comment<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, DONATION_COMMENTS)
}

pub fn foundation_comment<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, FOUNDATION_COMMENTS)
}

pub fn social_action_comment<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, SOCIAL_ACTION_COMMENTS)
}

pub fn suggestion<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, SUGGESTIONS)
}

pub fn certificate_description<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, CERTIFICATE_DESCRIPTIONS)
}

pub fn notification_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, NOTIFICATION_MESSAGES)
}

/// Donation amount in [10, 1000], rounded to cents.
pub fn donation_amount<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw: f64 = rng.random_range(10.0..=1000.0);
    (raw * 100.0).round() / 100.0
}

/// Rating biased towards positive values.
pub fn rating_value<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(3..=5)
}

/// Generated identity for a donor account.
#[derive(Debug, Clone)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Person {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[must_use]
pub fn person() -> Person {
    Person {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: SafeEmail().fake(),
    }
}

#[must_use]
pub fn company_email() -> String {
    SafeEmail().fake()
}

#[must_use]
pub fn company_name() -> String {
    CompanyName().fake()
}

#[must_use]
pub fn postal_address() -> String {
    let number: String = BuildingNumber().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let zip: String = ZipCode().fake();
    format!("{number} {street}, {city} {zip}")
}

#[must_use]
pub fn phone_number() -> String {
    PhoneNumber().fake()
}

/// Website derived from a display name, keeping only ASCII letters and digits.
#[must_use]
pub fn website_for(name: &str) -> String {
    let slug: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("https://www.{slug}.org")
}

/// Where a generated social action sits relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionWindow {
    /// Starts 5-60 days from now, lasts 1-14 days
    Upcoming,
    /// Started 1-10 days ago, ends 1-20 days from now
    Ongoing,
    /// Ended 5-60 days ago, lasted 1-14 days
    Finished,
}

impl ActionWindow {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => Self::Upcoming,
            1 => Self::Ongoing,
            _ => Self::Finished,
        }
    }

    /// Start and end dates for this window.
    pub fn dates<R: Rng + ?Sized>(
        self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            Self::Upcoming => {
                let start = now + Duration::days(rng.random_range(5..=60));
                (start, start + Duration::days(rng.random_range(1..=14)))
            }
            Self::Ongoing => (
                now - Duration::days(rng.random_range(1..=10)),
                now + Duration::days(rng.random_range(1..=20)),
            ),
            Self::Finished => {
                let end = now - Duration::days(rng.random_range(5..=60));
                (end - Duration::days(rng.random_range(1..=14)), end)
            }
        }
    }
}

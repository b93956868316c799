//! Organizer and member details collected at checkout.
//!
//! A group is one organizer plus zero or more members. Every participant must
//! provide name, email, phone and an emergency contact; international trips
//! also require country and passport number.

use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One person on a booking. Empty strings mean "not filled in yet".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Emergency contact (name and number)
    pub emergency_contact: String,
    /// Country of residence
    #[serde(default)]
    pub country: String,
    /// Passport number
    #[serde(default)]
    pub passport: String,
}

impl Participant {
    /// Value of a single field
    #[must_use]
    pub fn field(&self, field: ParticipantField) -> &str {
        match field {
            ParticipantField::Name => &self.name,
            ParticipantField::Email => &self.email,
            ParticipantField::Phone => &self.phone,
            ParticipantField::EmergencyContact => &self.emergency_contact,
            ParticipantField::Country => &self.country,
            ParticipantField::Passport => &self.passport,
        }
    }

    /// Required fields that are blank for `category`
    pub fn missing_fields(&self, category: Category) -> impl Iterator<Item = ParticipantField> + '_ {
        ParticipantField::required_for(category)
            .iter()
            .copied()
            .filter(|field| self.field(*field).trim().is_empty())
    }
}

/// A form field on [`Participant`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticipantField {
    /// Full name
    Name,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// Emergency contact
    EmergencyContact,
    /// Country of residence
    Country,
    /// Passport number
    Passport,
}

impl ParticipantField {
    const DOMESTIC: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::EmergencyContact];
    const INTERNATIONAL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::EmergencyContact,
        Self::Country,
        Self::Passport,
    ];

    /// Mandatory fields for a product category
    #[must_use]
    pub const fn required_for(category: Category) -> &'static [Self] {
        if category.requires_travel_documents() {
            &Self::INTERNATIONAL
        } else {
            &Self::DOMESTIC
        }
    }
}

impl fmt::Display for ParticipantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::EmergencyContact => "emergency contact",
            Self::Country => "country",
            Self::Passport => "passport",
        })
    }
}

/// Position of a participant in the group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticipantRole {
    /// The lead participant
    Organizer,
    /// A member, by zero-based index into the members list
    Member(usize),
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organizer => f.write_str("organizer"),
            Self::Member(index) => write!(f, "member {}", index + 1),
        }
    }
}

/// One blank required field, located in the group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingField {
    /// Whose field
    pub role: ParticipantRole,
    /// Which field
    pub field: ParticipantField,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.field)
    }
}

/// Organizer plus members
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantGroup {
    /// Primary contact
    pub organizer: Participant,
    /// Everyone else
    #[serde(default)]
    pub members: Vec<Participant>,
}

impl ParticipantGroup {
    /// An empty group for a fresh checkout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group from filled-in details
    #[must_use]
    pub const fn with_members(organizer: Participant, members: Vec<Participant>) -> Self {
        Self { organizer, members }
    }

    /// Total head count, organizer included
    #[must_use]
    pub fn participant_count(&self) -> u32 {
        u32::try_from(self.members.len()).map_or(u32::MAX, |members| members.saturating_add(1))
    }

    /// Grows or shrinks the members list so the group holds `count` people.
    ///
    /// New members start blank; surplus members are dropped from the end. The
    /// organizer always stays, so a count of zero behaves like one.
    pub fn resize_for(&mut self, count: u32) {
        let members = usize::try_from(count.saturating_sub(1)).unwrap_or(usize::MAX);
        self.members.resize_with(members, Participant::default);
    }

    /// Organizer first, then members in order
    pub fn participants(&self) -> impl Iterator<Item = (ParticipantRole, &Participant)> {
        std::iter::once((ParticipantRole::Organizer, &self.organizer)).chain(
            self.members
                .iter()
                .enumerate()
                .map(|(index, member)| (ParticipantRole::Member(index), member)),
        )
    }

    /// Every blank required field across the group
    #[must_use]
    pub fn missing_fields(&self, category: Category) -> Vec<MissingField> {
        self.participants()
            .flat_map(|(role, participant)| {
                participant
                    .missing_fields(category)
                    .map(move |field| MissingField { role, field })
            })
            .collect()
    }

    /// Whether every participant passes field validation
    #[must_use]
    pub fn is_complete(&self, category: Category) -> bool {
        self.participants()
            .all(|(_, participant)| participant.missing_fields(category).next().is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str) -> Participant {
        Participant {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+91 98765 43210".to_string(),
            emergency_contact: "Asha, +91 91234 56789".to_string(),
            country: String::new(),
            passport: String::new(),
        }
    }

    #[test]
    fn new_group_counts_the_organizer() {
        let group = ParticipantGroup::new();
        assert_eq!(group.participant_count(), 1);
        assert!(!group.is_complete(Category::Domestic));
    }

    #[test]
    fn resize_tracks_selected_count() {
        let mut group = ParticipantGroup::with_members(filled("Ravi"), vec![filled("Meera")]);

        group.resize_for(3);
        assert_eq!(group.participant_count(), 3);
        assert_eq!(group.members[0].name, "Meera");
        assert_eq!(group.members[1], Participant::default());

        group.resize_for(1);
        assert!(group.members.is_empty());

        group.resize_for(0);
        assert_eq!(group.participant_count(), 1);
    }

    #[test]
    fn domestic_group_does_not_need_passports() {
        let group = ParticipantGroup::with_members(filled("Ravi"), vec![filled("Meera")]);
        assert!(group.is_complete(Category::Domestic));
        assert!(group.missing_fields(Category::Domestic).is_empty());
    }

    #[test]
    fn international_group_reports_each_missing_document() {
        let mut organizer = filled("Ravi");
        organizer.country = "India".to_string();
        organizer.passport = "Z1234567".to_string();
        let group = ParticipantGroup::with_members(organizer, vec![filled("Meera")]);

        assert!(!group.is_complete(Category::International));
        assert_eq!(
            group.missing_fields(Category::International),
            vec![
                MissingField {
                    role: ParticipantRole::Member(0),
                    field: ParticipantField::Country,
                },
                MissingField {
                    role: ParticipantRole::Member(0),
                    field: ParticipantField::Passport,
                },
            ]
        );
    }

    #[test]
    fn whitespace_only_counts_as_blank() {
        let mut organizer = filled("Ravi");
        organizer.phone = "   ".to_string();
        let group = ParticipantGroup::with_members(organizer, Vec::new());

        let missing = group.missing_fields(Category::Domestic);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].to_string(), "organizer: phone");
    }
}

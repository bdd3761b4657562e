use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::LeadError;

/// A closed set of lowercase wire names with a case-insensitive parser.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])* $name:ident, $label:literal,
        { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LeadError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        LeadError::validation(format!(
                            "{} must be one of: {}",
                            $label,
                            allowed.join(", ")
                        ))
                    })
            }
        }
    };
}

wire_enum!(#[derive(Default)] WorkstationType, "Workstation type", {
    #[default]
    Compact => "compact",
    Standard => "standard",
    Spacious => "spacious",
});

wire_enum!(#[derive(Default)] PantryType, "Pantry type", {
    #[default]
    TenPax => "10pax",
    ThirtyPax => "30pax",
});

wire_enum!(#[derive(Default)] ConferenceRoomType, "Conference room type", {
    #[default]
    SevenPax => "7pax",
    TwelvePax => "12pax",
});

wire_enum!(
    /// Where the lead came from.
    LeadSource, "Source", {
        SpaceCalculator => "spacecalculator",
        ContactForm => "contactform",
        Inquiry => "inquiry",
        Direct => "direct",
        PropertyReport => "propertyreport",
    }
);

wire_enum!(
    /// Sales pipeline stage.
    #[derive(Default)]
    LeadStatus, "Status", {
        #[default]
        New => "new",
        Contacted => "contacted",
        Qualified => "qualified",
        ProposalSent => "proposal_sent",
        ClosedWon => "closed_won",
        ClosedLost => "closed_lost",
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Workstations {
    #[serde(rename = "type")]
    pub kind: WorkstationType,
    pub persons: u32,
    pub area: f64,
}

/// A room category that only has a count and an area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rooms {
    pub count: u32,
    pub area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pantry {
    #[serde(rename = "type")]
    pub kind: PantryType,
    pub count: u32,
    pub area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConferenceRooms {
    #[serde(rename = "type")]
    pub kind: ConferenceRoomType,
    pub count: u32,
    pub area: f64,
}

/// Office layout computed by the space calculator. Areas are in sq.ft.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRequirements {
    pub workstations: Workstations,
    pub cabins: Rooms,
    pub reception: Rooms,
    pub pantry: Pantry,
    pub conference_room: ConferenceRooms,
    pub server_room: Rooms,
}

impl SpaceRequirements {
    /// Human-readable line per requested space, skipping empty categories.
    #[must_use]
    pub fn breakdown(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.workstations.persons > 0 {
            lines.push(format!(
                "{} Workstations ({})",
                self.workstations.persons, self.workstations.kind
            ));
        }
        if self.cabins.count > 0 {
            lines.push(format!("{} Cabin(s)", self.cabins.count));
        }
        if self.reception.count > 0 {
            lines.push(format!("{} Reception(s)", self.reception.count));
        }
        if self.pantry.count > 0 {
            lines.push(format!("{} Pantry(s) ({})", self.pantry.count, self.pantry.kind));
        }
        if self.conference_room.count > 0 {
            lines.push(format!(
                "{} Conference Room(s) ({})",
                self.conference_room.count, self.conference_room.kind
            ));
        }
        if self.server_room.count > 0 {
            lines.push(format!("{} Server Room(s)", self.server_room.count));
        }
        lines
    }

    pub(crate) fn areas(&self) -> [(&'static str, f64); 6] {
        [
            ("Workstation area", self.workstations.area),
            ("Cabin area", self.cabins.area),
            ("Reception area", self.reception.area),
            ("Pantry area", self.pantry.area),
            ("Conference room area", self.conference_room.area),
            ("Server room area", self.server_room.area),
        ]
    }
}

/// The listing a property report was requested for, as the client saw it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInterest {
    pub title: String,
    pub property_code: String,
    pub location: String,
    pub area: String,
    pub price: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<String>,
}

/// A captured enquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub company: String,
    pub designation: String,
    pub phone: String,
    /// Stored lowercased.
    pub email: String,
    pub space_requirements: SpaceRequirements,
    pub total_area: f64,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub notes: String,
    pub follow_up_date: Option<DateTime<Utc>>,
    /// Set once the admin notification was delivered.
    pub notification_sent: bool,
    pub ip_address: Option<String>,
    /// Present for property report requests.
    pub property: Option<PropertyInterest>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    #[must_use]
    pub fn space_breakdown(&self) -> Vec<String> {
        self.space_requirements.breakdown()
    }

    /// Total area with thousands separators, e.g. `12,500 sq.ft`.
    #[must_use]
    pub fn formatted_total_area(&self) -> String {
        format!("{} sq.ft", format_area(self.total_area))
    }
}

/// Group the integer part in threes and keep up to two decimals.
#[must_use]
pub fn format_area(area: f64) -> String {
    let fixed = format!("{area:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };

    let mut groups: Vec<&str> = digits
        .as_bytes()
        .rchunks(3)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();
    groups.reverse();

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{sign}{}", groups.join(","))
    } else {
        format!("{sign}{}.{fraction}", groups.join(","))
    }
}

/// Contact details every lead carries.
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    pub name: String,
    pub company: String,
    pub designation: String,
    pub phone: String,
    pub email: String,
}

/// Options for capturing a lead.
///
/// A lead is either a property report request (`property` set) or a space
/// calculation (`space` and `total_area` set).
#[derive(Debug, Clone, Default)]
pub struct CreateLeadOptions {
    pub contact: ContactInfo,
    pub space: Option<SpaceRequirements>,
    pub total_area: Option<f64>,
    pub property: Option<PropertyInterest>,
    /// Blank uses the default source for the request kind.
    pub source: Option<String>,
    pub ip_address: Option<String>,
}

/// Follow-up fields an admin may change.
#[derive(Debug, Clone, Default)]
pub struct UpdateLeadOptions {
    pub status: Option<String>,
    pub notes: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub follow_up_date: Option<String>,
}

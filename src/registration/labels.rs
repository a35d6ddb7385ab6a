//! Enumerated choices offered as buttons, and their exact button labels.
//!
//! Labels are what the talent sees and what Telegram echoes back as
//! `callback_data`; matching is exact and case-sensitive.

use serde::{Deserialize, Serialize};

/// A closed set of values rendered as buttons.
pub trait ButtonLabel: Sized + Copy + 'static {
    /// Every value, in the order buttons are offered.
    const ALL: &'static [Self];

    /// Button label shown to the talent.
    fn label(&self) -> &'static str;

    /// Map a button label back to its value.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == label)
    }
}

/// Kind of work a talent is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    Photos,
    Modeling,
    Advertising,
}

impl ButtonLabel for WorkType {
    const ALL: &'static [Self] = &[Self::Photos, Self::Modeling, Self::Advertising];

    fn label(&self) -> &'static str {
        match self {
            Self::Photos => "Fotos",
            Self::Modeling => "Modelaje",
            Self::Advertising => "Publicidad",
        }
    }
}

impl std::fmt::Display for WorkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Photos => write!(f, "photos"),
            Self::Modeling => write!(f, "modeling"),
            Self::Advertising => write!(f, "advertising"),
        }
    }
}

/// Time-of-day slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    Morning,
    Afternoon,
    Night,
}

impl ButtonLabel for Schedule {
    const ALL: &'static [Self] = &[Self::Morning, Self::Afternoon, Self::Night];

    fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Mañana",
            Self::Afternoon => "Tarde",
            Self::Night => "Noche",
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "morning"),
            Self::Afternoon => write!(f, "afternoon"),
            Self::Night => write!(f, "night"),
        }
    }
}

/// Buenos Aires neighborhood. Serialized as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    Palermo,
    Recoleta,
    Belgrano,
    #[serde(rename = "San Telmo")]
    SanTelmo,
    #[serde(rename = "Puerto Madero")]
    PuertoMadero,
    #[serde(rename = "Núñez")]
    Nunez,
    Caballito,
    #[serde(rename = "Villa Crespo")]
    VillaCrespo,
    Almagro,
    Colegiales,
}

impl Zone {
    /// Zones offered as buttons during registration.
    pub const OFFERED: &'static [Zone] = &[
        Zone::Palermo,
        Zone::Recoleta,
        Zone::Belgrano,
        Zone::SanTelmo,
        Zone::PuertoMadero,
    ];
}

impl ButtonLabel for Zone {
    const ALL: &'static [Self] = &[
        Self::Palermo,
        Self::Recoleta,
        Self::Belgrano,
        Self::SanTelmo,
        Self::PuertoMadero,
        Self::Nunez,
        Self::Caballito,
        Self::VillaCrespo,
        Self::Almagro,
        Self::Colegiales,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Palermo => "Palermo",
            Self::Recoleta => "Recoleta",
            Self::Belgrano => "Belgrano",
            Self::SanTelmo => "San Telmo",
            Self::PuertoMadero => "Puerto Madero",
            Self::Nunez => "Núñez",
            Self::Caballito => "Caballito",
            Self::VillaCrespo => "Villa Crespo",
            Self::Almagro => "Almagro",
            Self::Colegiales => "Colegiales",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Labels for a slice of values, in order.
pub fn labels_of<T: ButtonLabel>(values: &[T]) -> Vec<&'static str> {
    values.iter().map(ButtonLabel::label).collect()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

/// Formats a date as ISO `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the date cannot be represented in the format.
pub fn format_date(date: Date) -> Result<String, DomainError> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| DomainError::DateParseError {
            date_string: date.to_string(),
            error: e.to_string(),
        })
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Serde adapter storing dates as ISO `YYYY-MM-DD` strings.
pub mod iso_date {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date as an ISO string.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be formatted.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = super::format_date(*date).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Deserializes a date from an ISO string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(D::Error::custom)
    }
}

/// Canonical identifier of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(i64);

impl MissionId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a certified worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(i64);

impl WorkerId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a normalised, upper-cased reference code type.
///
/// Codes compare case-insensitively because the stored value is always
/// upper case; empty codes are rejected.
macro_rules! reference_code {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a normalised code.
            ///
            /// # Errors
            ///
            /// Returns an error if the code is empty after trimming.
            pub fn new(value: &str) -> Result<Self, DomainError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::InvalidCode {
                        kind: $kind,
                        value: value.to_string(),
                    });
                }
                Ok(Self(trimmed.to_uppercase()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> Self {
                code.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

reference_code!(
    /// Region code used for venue and home regions.
    RegionCode,
    "region"
);
reference_code!(
    /// Sport code; conflicts of interest are declared per sport.
    SportCode,
    "sport"
);
reference_code!(
    /// Discipline family code.
    DisciplineCode,
    "discipline"
);

/// A staffing category with its own eligibility flag.
///
/// The declaration order is the order in which a mission day's roles are
/// staffed, so senior roles claim candidates first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    LeadInspector,
    AreaCoordinator,
    Inspector,
    BloodCollector,
    Trainee,
}

impl Role {
    /// Every role in staffing order.
    pub const ALL: [Self; 5] = [
        Self::LeadInspector,
        Self::AreaCoordinator,
        Self::Inspector,
        Self::BloodCollector,
        Self::Trainee,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LeadInspector => "LeadInspector",
            Self::AreaCoordinator => "AreaCoordinator",
            Self::Inspector => "Inspector",
            Self::BloodCollector => "BloodCollector",
            Self::Trainee => "Trainee",
        }
    }

    /// Senior roles may carry a prior-experience requirement.
    #[must_use]
    pub const fn is_senior(&self) -> bool {
        matches!(self, Self::LeadInspector | Self::AreaCoordinator)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LeadInspector" => Ok(Self::LeadInspector),
            "AreaCoordinator" => Ok(Self::AreaCoordinator),
            "Inspector" => Ok(Self::Inspector),
            "BloodCollector" => Ok(Self::BloodCollector),
            "Trainee" => Ok(Self::Trainee),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sub-day availability window.
///
/// `WholeDay` is used by missions that are not split into bands. The four
/// sub-bands are ordered through the day; `Evening` is followed by the next
/// day's `Early` band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeBand {
    WholeDay,
    Early,
    Morning,
    Afternoon,
    Evening,
}

impl TimeBand {
    /// The sub-bands in chronological order.
    pub const SUB_BANDS: [Self; 4] = [Self::Early, Self::Morning, Self::Afternoon, Self::Evening];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WholeDay => "WholeDay",
            Self::Early => "Early",
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    #[must_use]
    pub const fn is_sub_band(&self) -> bool {
        !matches!(self, Self::WholeDay)
    }

    /// Two bands on the same date overlap if they are equal or either is `WholeDay`.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self == other || self == Self::WholeDay || other == Self::WholeDay
    }

    /// The band that immediately follows this one and whether it falls on the next day.
    #[must_use]
    pub const fn following(&self) -> Option<(Self, bool)> {
        match self {
            Self::WholeDay => None,
            Self::Early => Some((Self::Morning, false)),
            Self::Morning => Some((Self::Afternoon, false)),
            Self::Afternoon => Some((Self::Evening, false)),
            Self::Evening => Some((Self::Early, true)),
        }
    }

    /// The band that immediately precedes this one and whether it falls on the previous day.
    #[must_use]
    pub const fn preceding(&self) -> Option<(Self, bool)> {
        match self {
            Self::WholeDay => None,
            Self::Early => Some((Self::Evening, true)),
            Self::Morning => Some((Self::Early, false)),
            Self::Afternoon => Some((Self::Morning, false)),
            Self::Evening => Some((Self::Afternoon, false)),
        }
    }
}

impl FromStr for TimeBand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WholeDay" => Ok(Self::WholeDay),
            "Early" => Ok(Self::Early),
            "Morning" => Ok(Self::Morning),
            "Afternoon" => Ok(Self::Afternoon),
            "Evening" => Ok(Self::Evening),
            _ => Err(DomainError::InvalidTimeBand(s.to_string())),
        }
    }
}

impl std::fmt::Display for TimeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The bands a worker declared available on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BandSet {
    pub whole_day: bool,
    pub early: bool,
    pub morning: bool,
    pub afternoon: bool,
    pub evening: bool,
}

impl BandSet {
    /// A set declaring the whole day available.
    #[must_use]
    pub const fn whole_day() -> Self {
        Self {
            whole_day: true,
            early: false,
            morning: false,
            afternoon: false,
            evening: false,
        }
    }

    /// Builds a set from individual bands.
    #[must_use]
    pub fn from_bands(bands: &[TimeBand]) -> Self {
        let mut set = Self::default();
        for band in bands {
            set.insert(*band);
        }
        set
    }

    pub const fn insert(&mut self, band: TimeBand) {
        match band {
            TimeBand::WholeDay => self.whole_day = true,
            TimeBand::Early => self.early = true,
            TimeBand::Morning => self.morning = true,
            TimeBand::Afternoon => self.afternoon = true,
            TimeBand::Evening => self.evening = true,
        }
    }

    const fn declares(&self, band: TimeBand) -> bool {
        match band {
            TimeBand::WholeDay => self.whole_day,
            TimeBand::Early => self.early,
            TimeBand::Morning => self.morning,
            TimeBand::Afternoon => self.afternoon,
            TimeBand::Evening => self.evening,
        }
    }

    /// True when the whole day is declared, or every sub-band is.
    #[must_use]
    pub const fn is_full_day(&self) -> bool {
        self.whole_day || (self.early && self.morning && self.afternoon && self.evening)
    }

    /// Whether a worker with this set can cover `band`.
    #[must_use]
    pub const fn covers(&self, band: TimeBand) -> bool {
        match band {
            TimeBand::WholeDay => self.is_full_day(),
            _ => self.whole_day || self.declares(band),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.whole_day || self.early || self.morning || self.afternoon || self.evening)
    }
}

/// Qualification rank, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    S1,
    S2,
    S3,
    A1,
    A2,
    A3,
}

impl Rank {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
        }
    }

    /// S ranks form the top tier; A ranks are the entry tier.
    #[must_use]
    pub const fn is_top_tier(&self) -> bool {
        matches!(self, Self::S1 | Self::S2 | Self::S3)
    }
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "S1" => Ok(Self::S1),
            "S2" => Ok(Self::S2),
            "S3" => Ok(Self::S3),
            "A1" => Ok(Self::A1),
            "A2" => Ok(Self::A2),
            "A3" => Ok(Self::A3),
            _ => Err(DomainError::InvalidRank(s.to_string())),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Female" | "F" => Ok(Self::Female),
            "Male" | "M" => Ok(Self::Male),
            _ => Err(DomainError::InvalidGender(s.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a mission.
///
/// Required-role counts are only meaningful while a mission is `Preparing`
/// or `Ready`. Once `Confirmed` the staged candidate set is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MissionStatus {
    #[default]
    Preparing,
    Ready,
    Confirmed,
    Cancelled,
}

impl MissionStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - Preparing → Ready
    /// - Ready → Preparing (details reopened)
    /// - Ready → Confirmed
    /// - Preparing | Ready → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Preparing, Self::Ready)
                | (Self::Ready, Self::Preparing | Self::Confirmed)
                | (Self::Preparing | Self::Ready, Self::Cancelled)
        )
    }

    /// Whether staged and provisional rows may still change.
    #[must_use]
    pub const fn allows_staging(&self) -> bool {
        matches!(self, Self::Preparing | Self::Ready)
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }
}

impl FromStr for MissionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Preparing" => Ok(Self::Preparing),
            "Ready" => Ok(Self::Ready),
            "Confirmed" => Ok(Self::Confirmed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidMissionStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a mission is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExecutionType {
    InCompetition,
    OutOfCompetition,
    DocumentReview,
}

impl ExecutionType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InCompetition => "InCompetition",
            Self::OutOfCompetition => "OutOfCompetition",
            Self::DocumentReview => "DocumentReview",
        }
    }

    #[must_use]
    pub const fn requires_live_staffing(&self) -> bool {
        matches!(self, Self::InCompetition | Self::OutOfCompetition)
    }

    /// Whether assignments on missions of this type block adjacent work.
    #[must_use]
    pub const fn is_conflict_relevant(&self) -> bool {
        self.requires_live_staffing()
    }

    /// Out-of-competition missions are staffed per time band.
    #[must_use]
    pub const fn is_banded(&self) -> bool {
        matches!(self, Self::OutOfCompetition)
    }
}

impl FromStr for ExecutionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InCompetition" => Ok(Self::InCompetition),
            "OutOfCompetition" => Ok(Self::OutOfCompetition),
            "DocumentReview" => Ok(Self::DocumentReview),
            _ => Err(DomainError::InvalidExecutionType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExecutionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Planned specimen quantities for a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecimenCounts {
    pub urine: u32,
    pub blood: u32,
    pub dried_blood_spot: u32,
}

impl SpecimenCounts {
    #[must_use]
    pub const fn has_any(&self) -> bool {
        self.urine > 0 || self.blood > 0 || self.dried_blood_spot > 0
    }

    #[must_use]
    pub const fn needs_blood_collection(&self) -> bool {
        self.blood > 0 || self.dried_blood_spot > 0
    }
}

/// The unit of staffing: one role, in one band, on one date of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub mission_id: MissionId,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub band: TimeBand,
    pub role: Role,
}

impl SlotKey {
    #[must_use]
    pub const fn new(mission_id: MissionId, date: Date, band: TimeBand, role: Role) -> Self {
        Self {
            mission_id,
            date,
            band,
            role,
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mission {} {} {} {}",
            self.mission_id, self.date, self.band, self.role
        )
    }
}

/// State of a batch run attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    Requested,
    Started,
    Finished,
    Failed,
}

impl RunState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Started => "Started",
            Self::Finished => "Finished",
            Self::Failed => "Failed",
        }
    }

    /// A run is active while requested or started and not yet finished.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Requested | Self::Started)
    }
}

impl FromStr for RunState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Requested" => Ok(Self::Requested),
            "Started" => Ok(Self::Started),
            "Finished" => Ok(Self::Finished),
            "Failed" => Ok(Self::Failed),
            _ => Err(DomainError::InvalidRunState(s.to_string())),
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a new run may start given the latest recorded state for the process.
#[must_use]
pub fn run_may_start(latest: Option<RunState>) -> bool {
    latest.is_none_or(|state| !state.is_active())
}

//! Closed enumerations for every categorical field in a stat file.
//!
//! Raw strings are matched case-insensitively. Each enumeration carries its
//! full domain in `ALL`, which the index builder uses to pre-create one bucket
//! per value so that lookups on a valid value never miss.

use serde::Serialize;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// A closed, enumerable domain of raw stat-file strings.
pub trait DomainValue: Copy + Eq + Hash + fmt::Display + 'static {
    /// Human-readable dimension name used in error messages.
    const DIMENSION: &'static str;

    fn all() -> &'static [Self];

    /// Position in `all()`.
    fn ordinal(self) -> usize;

    /// Exact (case-insensitive) match of one raw name or alias.
    fn parse(raw: &str) -> Option<Self>;

    /// Named groups of values, e.g. "hit" for every kind of base hit.
    fn groups() -> &'static [(&'static str, &'static [Self])];

    /// Resolve a query value to one or more domain values.
    fn resolve(raw: &str) -> Option<Vec<Self>> {
        if let Some(value) = Self::parse(raw) {
            return Some(vec![value]);
        }
        let raw = raw.trim();
        Self::groups()
            .iter()
            .find(|(name, _)| raw.eq_ignore_ascii_case(name))
            .map(|(_, members)| members.to_vec())
    }

    /// Comma-separated list of accepted names for error reporting.
    fn accepted() -> String {
        let mut names: Vec<String> = Self::all().iter().map(|v| format!("'{}'", v)).collect();
        names.extend(Self::groups().iter().map(|(name, _)| format!("'{}'", name)));
        names.join(", ")
    }
}

macro_rules! lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $dimension:literal {
            $( $variant:ident => $raw:literal $(| $alias:literal)* ),+ $(,)?
        }
        $(groups { $( $group:literal => [ $($member:ident),+ $(,)? ] ),+ $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[cfg_attr(test, derive(strum_macros::EnumIter))]
        pub enum $name {
            $( #[serde(rename = $raw)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Raw spelling as written in stat files
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $raw, )+
                }
            }
        }

        impl DomainValue for $name {
            const DIMENSION: &'static str = $dimension;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn ordinal(self) -> usize {
                self as usize
            }

            fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                $(
                    if raw.eq_ignore_ascii_case($raw) $(|| raw.eq_ignore_ascii_case($alias))* {
                        return Some($name::$variant);
                    }
                )+
                None
            }

            fn groups() -> &'static [(&'static str, &'static [Self])] {
                const GROUPS: &[(&str, &[$name])] = &[
                    $( $( ($group, &[ $($name::$member),+ ]), )+ )?
                ];
                GROUPS
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as DomainValue>::parse(s)
                    .ok_or_else(|| format!("Invalid {}: {}", $dimension, s))
            }
        }
    };
}

lookup_enum! {
    /// Final result of the plate appearance
    ResultOfAtBat, "result of at-bat" {
        None => "None",
        Strikeout => "Strikeout",
        WalkBallFour => "Walk (BB)",
        WalkHitByPitch => "Walk (HBP)",
        Out => "Out",
        Caught => "Caught",
        CaughtLineDrive => "Caught line-drive",
        Single => "Single",
        Double => "Double",
        Triple => "Triple",
        HomeRun => "HR" | "Home Run" | "Homerun",
        InputError => "Error - Input",
        ChemError => "Error - Chem",
        Bunt => "Bunt",
        SacFly => "SacFly" | "Sac Fly",
        GroundBallDoublePlay => "Ground ball double Play",
        FoulCatch => "Foul catch",
    }
    groups {
        "hit" => [Single, Double, Triple, HomeRun],
        "walk" => [WalkBallFour, WalkHitByPitch],
        "error" => [InputError, ChemError],
    }
}

lookup_enum! {
    PitchType, "pitch type" {
        Curve => "Curve",
        Charge => "Charge",
        ChangeUp => "ChangeUp" | "Change Up",
    }
}

lookup_enum! {
    ChargeType, "charge type" {
        NotApplicable => "N/A",
        Undecodable => "Unable to Decode. Invalid Value (1).",
        Slider => "Slider",
        Perfect => "Perfect",
    }
}

lookup_enum! {
    SwingType, "swing type" {
        None => "None",
        Slap => "Slap",
        Charge => "Charge",
        Star => "Star",
        Bunt => "Bunt",
    }
}

lookup_enum! {
    ContactType, "contact type" {
        SourLeft => "Sour - Left",
        NiceLeft => "Nice - Left",
        Perfect => "Perfect",
        NiceRight => "Nice - Right",
        SourRight => "Sour - Right",
    }
    groups {
        "nice" => [NiceLeft, NiceRight],
        "sour" => [SourLeft, SourRight],
    }
}

lookup_enum! {
    /// Control stick direction held at contact. Neutral is recorded as "".
    InputDirection, "input direction" {
        Neutral => "" | "None" | "Neutral",
        Left => "Left",
        Right => "Right",
        Down => "Down",
        LeftDown => "Left+Down",
        RightDown => "Right+Down",
        Up => "Up",
        LeftUp => "Left+Up",
        RightUp => "Right+Up",
        LeftRight => "Left+Right",
        LeftRightDown => "Left+Right+Down",
        RightDownUp => "Right+Down+Up",
    }
}

lookup_enum! {
    FielderPosition, "fielder position" {
        Pitcher => "P",
        Catcher => "C",
        FirstBase => "1B",
        SecondBase => "2B",
        ThirdBase => "3B",
        Shortstop => "SS",
        LeftField => "LF",
        CenterField => "CF",
        RightField => "RF",
    }
}

lookup_enum! {
    StealKind, "steal" {
        None => "None",
        Ready => "Ready",
        Normal => "Normal",
        Perfect => "Perfect",
    }
}

/// Categorical dimensions carried by the event index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalDimension {
    ResultOfAtBat,
    PitchType,
    ChargeType,
    SwingType,
    ContactType,
    InputDirection,
    FielderPosition,
}

impl CategoricalDimension {
    pub const ALL: [CategoricalDimension; 7] = [
        CategoricalDimension::ResultOfAtBat,
        CategoricalDimension::PitchType,
        CategoricalDimension::ChargeType,
        CategoricalDimension::SwingType,
        CategoricalDimension::ContactType,
        CategoricalDimension::InputDirection,
        CategoricalDimension::FielderPosition,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CategoricalDimension::ResultOfAtBat => ResultOfAtBat::DIMENSION,
            CategoricalDimension::PitchType => PitchType::DIMENSION,
            CategoricalDimension::ChargeType => ChargeType::DIMENSION,
            CategoricalDimension::SwingType => SwingType::DIMENSION,
            CategoricalDimension::ContactType => ContactType::DIMENSION,
            CategoricalDimension::InputDirection => InputDirection::DIMENSION,
            CategoricalDimension::FielderPosition => FielderPosition::DIMENSION,
        }
    }

    /// Number of buckets the index keeps for this dimension
    pub fn domain_size(&self) -> usize {
        match self {
            CategoricalDimension::ResultOfAtBat => ResultOfAtBat::ALL.len(),
            CategoricalDimension::PitchType => PitchType::ALL.len(),
            CategoricalDimension::ChargeType => ChargeType::ALL.len(),
            CategoricalDimension::SwingType => SwingType::ALL.len(),
            CategoricalDimension::ContactType => ContactType::ALL.len(),
            CategoricalDimension::InputDirection => InputDirection::ALL.len(),
            CategoricalDimension::FielderPosition => FielderPosition::ALL.len(),
        }
    }

    /// Resolve a query string to bucket ordinals, or `None` when it is not in
    /// the domain.
    pub fn resolve(&self, raw: &str) -> Option<Vec<usize>> {
        match self {
            CategoricalDimension::ResultOfAtBat => ordinals::<ResultOfAtBat>(raw),
            CategoricalDimension::PitchType => ordinals::<PitchType>(raw),
            CategoricalDimension::ChargeType => ordinals::<ChargeType>(raw),
            CategoricalDimension::SwingType => ordinals::<SwingType>(raw),
            CategoricalDimension::ContactType => ordinals::<ContactType>(raw),
            CategoricalDimension::InputDirection => ordinals::<InputDirection>(raw),
            CategoricalDimension::FielderPosition => ordinals::<FielderPosition>(raw),
        }
    }

    pub fn accepted(&self) -> String {
        match self {
            CategoricalDimension::ResultOfAtBat => ResultOfAtBat::accepted(),
            CategoricalDimension::PitchType => PitchType::accepted(),
            CategoricalDimension::ChargeType => ChargeType::accepted(),
            CategoricalDimension::SwingType => SwingType::accepted(),
            CategoricalDimension::ContactType => ContactType::accepted(),
            CategoricalDimension::InputDirection => InputDirection::accepted(),
            CategoricalDimension::FielderPosition => FielderPosition::accepted(),
        }
    }
}

impl fmt::Display for CategoricalDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn ordinals<T: DomainValue>(raw: &str) -> Option<Vec<usize>> {
    T::resolve(raw).map(|values| values.into_iter().map(DomainValue::ordinal).collect())
}

/// Domain values that have their own bucket family in the index.
pub trait IndexedValue: DomainValue {
    const KEY: CategoricalDimension;
}

impl IndexedValue for ResultOfAtBat {
    const KEY: CategoricalDimension = CategoricalDimension::ResultOfAtBat;
}
impl IndexedValue for PitchType {
    const KEY: CategoricalDimension = CategoricalDimension::PitchType;
}
impl IndexedValue for ChargeType {
    const KEY: CategoricalDimension = CategoricalDimension::ChargeType;
}
impl IndexedValue for SwingType {
    const KEY: CategoricalDimension = CategoricalDimension::SwingType;
}
impl IndexedValue for ContactType {
    const KEY: CategoricalDimension = CategoricalDimension::ContactType;
}
impl IndexedValue for InputDirection {
    const KEY: CategoricalDimension = CategoricalDimension::InputDirection;
}
impl IndexedValue for FielderPosition {
    const KEY: CategoricalDimension = CategoricalDimension::FielderPosition;
}

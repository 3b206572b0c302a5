//! # Parameter Bundle
//!
//! The complete set of beam and material parameters submitted per request.
//! Field names serialize exactly as the calculation service expects them
//! (`fck`, `fy`, `b`, `D`, `L`, `load_type`, ...).
//!
//! Grades serialize as bare JSON numbers and the load type as its display
//! string, so the default bundle serializes to:
//!
//! ```json
//! {"fck":25,"fy":415,"b":230.0,"D":450.0,"L":4000.0,"load_type":"Point Load",
//!  "main_dia":16.0,"main_count":2,"stirrup_dia":8.0,"spacing":150.0}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::FormError;

/// Concrete grade (characteristic compressive strength, MPa)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ConcreteGrade {
    M20,
    M25,
    M30,
    M35,
    M40,
}

impl ConcreteGrade {
    /// All grades offered by the form, in display order
    pub const ALL: [ConcreteGrade; 5] = [
        ConcreteGrade::M20,
        ConcreteGrade::M25,
        ConcreteGrade::M30,
        ConcreteGrade::M35,
        ConcreteGrade::M40,
    ];

    /// fck in MPa
    pub fn mpa(&self) -> u16 {
        match self {
            ConcreteGrade::M20 => 20,
            ConcreteGrade::M25 => 25,
            ConcreteGrade::M30 => 30,
            ConcreteGrade::M35 => 35,
            ConcreteGrade::M40 => 40,
        }
    }

    /// Look up a grade by its MPa value
    pub fn from_mpa(mpa: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.mpa() == mpa)
    }
}

impl From<ConcreteGrade> for u16 {
    fn from(grade: ConcreteGrade) -> u16 {
        grade.mpa()
    }
}

impl TryFrom<u16> for ConcreteGrade {
    type Error = String;

    fn try_from(mpa: u16) -> Result<Self, Self::Error> {
        ConcreteGrade::from_mpa(mpa).ok_or_else(|| format!("unsupported concrete grade {}", mpa))
    }
}

impl fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mpa())
    }
}

/// Steel grade (yield strength, MPa)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum SteelGrade {
    Fe415,
    Fe500,
}

impl SteelGrade {
    /// All grades offered by the form, in display order
    pub const ALL: [SteelGrade; 2] = [SteelGrade::Fe415, SteelGrade::Fe500];

    /// fy in MPa
    pub fn mpa(&self) -> u16 {
        match self {
            SteelGrade::Fe415 => 415,
            SteelGrade::Fe500 => 500,
        }
    }

    /// Look up a grade by its MPa value
    pub fn from_mpa(mpa: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.mpa() == mpa)
    }
}

impl From<SteelGrade> for u16 {
    fn from(grade: SteelGrade) -> u16 {
        grade.mpa()
    }
}

impl TryFrom<u16> for SteelGrade {
    type Error = String;

    fn try_from(mpa: u16) -> Result<Self, Self::Error> {
        SteelGrade::from_mpa(mpa).ok_or_else(|| format!("unsupported steel grade {}", mpa))
    }
}

impl fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mpa())
    }
}

/// Loading arrangement on the simply supported span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// Single concentrated load at midspan
    #[serde(rename = "Point Load")]
    PointLoad,
    /// Two concentrated loads at the third points
    #[serde(rename = "Two Point Load")]
    TwoPointLoad,
}

impl LoadType {
    /// All load types offered by the form
    pub const ALL: [LoadType; 2] = [LoadType::PointLoad, LoadType::TwoPointLoad];

    /// Wire and display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadType::PointLoad => "Point Load",
            LoadType::TwoPointLoad => "Two Point Load",
        }
    }

    /// Parse the wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.display_name() == name)
    }
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Form grouping a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormSection {
    Material,
    Dimensions,
    Reinforcement,
}

impl FormSection {
    pub const ALL: [FormSection; 3] = [
        FormSection::Material,
        FormSection::Dimensions,
        FormSection::Reinforcement,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FormSection::Material => "Material Properties",
            FormSection::Dimensions => "Beam Dimensions",
            FormSection::Reinforcement => "Reinforcement Details",
        }
    }

    /// Fields in this section, in form order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| f.section() == *self)
    }
}

/// One entry of the parameter bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Fck,
    Fy,
    Width,
    Depth,
    Length,
    LoadType,
    MainDia,
    MainCount,
    StirrupDia,
    Spacing,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 10] = [
        Field::Fck,
        Field::Fy,
        Field::Width,
        Field::Depth,
        Field::Length,
        Field::LoadType,
        Field::MainDia,
        Field::MainCount,
        Field::StirrupDia,
        Field::Spacing,
    ];

    /// JSON key sent to the service
    pub fn key(&self) -> &'static str {
        match self {
            Field::Fck => "fck",
            Field::Fy => "fy",
            Field::Width => "b",
            Field::Depth => "D",
            Field::Length => "L",
            Field::LoadType => "load_type",
            Field::MainDia => "main_dia",
            Field::MainCount => "main_count",
            Field::StirrupDia => "stirrup_dia",
            Field::Spacing => "spacing",
        }
    }

    /// Form label, including the unit
    pub fn label(&self) -> &'static str {
        match self {
            Field::Fck => "Concrete Grade (fck) MPa",
            Field::Fy => "Steel Grade (fy) MPa",
            Field::Width => "Width (b) mm",
            Field::Depth => "Overall Depth (D) mm",
            Field::Length => "Length (L) mm",
            Field::LoadType => "Load Type",
            Field::MainDia => "Main Bar Diameter mm",
            Field::MainCount => "Number of Main Bars",
            Field::StirrupDia => "Stirrup Diameter mm",
            Field::Spacing => "Stirrup Spacing mm",
        }
    }

    pub fn section(&self) -> FormSection {
        match self {
            Field::Fck | Field::Fy => FormSection::Material,
            Field::Width | Field::Depth | Field::Length | Field::LoadType => FormSection::Dimensions,
            Field::MainDia | Field::MainCount | Field::StirrupDia | Field::Spacing => {
                FormSection::Reinforcement
            }
        }
    }

    /// Advisory (min, max) shown next to numeric inputs. Not enforced.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            Field::Width => Some((150.0, 1000.0)),
            Field::Depth => Some((200.0, 1000.0)),
            Field::Length => Some((500.0, 10000.0)),
            Field::MainDia => Some((8.0, 32.0)),
            Field::MainCount => Some((1.0, 8.0)),
            Field::StirrupDia => Some((6.0, 12.0)),
            Field::Spacing => Some((80.0, 300.0)),
            Field::Fck | Field::Fy | Field::LoadType => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Beam and material parameters for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamParameters {
    /// Concrete grade
    pub fck: ConcreteGrade,
    /// Steel grade
    pub fy: SteelGrade,
    /// Width (mm)
    pub b: f64,
    /// Overall depth (mm)
    #[serde(rename = "D")]
    pub depth: f64,
    /// Span length (mm)
    #[serde(rename = "L")]
    pub length: f64,
    pub load_type: LoadType,
    /// Main bar diameter (mm)
    pub main_dia: f64,
    /// Number of main bars. Signed so an out-of-range count still goes out.
    pub main_count: i64,
    /// Stirrup diameter (mm)
    pub stirrup_dia: f64,
    /// Stirrup spacing (mm)
    pub spacing: f64,
}

impl Default for BeamParameters {
    fn default() -> Self {
        Self {
            fck: ConcreteGrade::M25,
            fy: SteelGrade::Fe415,
            b: 230.0,
            depth: 450.0,
            length: 4000.0,
            load_type: LoadType::PointLoad,
            main_dia: 16.0,
            main_count: 2,
            stirrup_dia: 8.0,
            spacing: 150.0,
        }
    }
}

impl BeamParameters {
    /// Numeric value of a field (select fields report their MPa value,
    /// load type has none)
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Fck => Some(f64::from(self.fck.mpa())),
            Field::Fy => Some(f64::from(self.fy.mpa())),
            Field::Width => Some(self.b),
            Field::Depth => Some(self.depth),
            Field::Length => Some(self.length),
            Field::LoadType => None,
            Field::MainDia => Some(self.main_dia),
            Field::MainCount => Some(self.main_count as f64),
            Field::StirrupDia => Some(self.stirrup_dia),
            Field::Spacing => Some(self.spacing),
        }
    }

    /// Field value rendered the way the form shows it
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Fck => self.fck.to_string(),
            Field::Fy => self.fy.to_string(),
            Field::LoadType => self.load_type.to_string(),
            Field::MainCount => self.main_count.to_string(),
            other => self.numeric(other).map(format_number).unwrap_or_default(),
        }
    }

    /// Apply a raw text edit to exactly one field.
    ///
    /// Numeric fields coerce the text to a number, with blank text reading
    /// as zero. On error the bundle is left untouched.
    pub fn apply(&mut self, field: Field, raw: &str) -> Result<(), FormError> {
        let raw = raw.trim();
        match field {
            Field::Fck => {
                self.fck = parse_option(field, raw, |v| {
                    v.parse::<u16>().ok().and_then(ConcreteGrade::from_mpa)
                })?
            }
            Field::Fy => {
                self.fy = parse_option(field, raw, |v| {
                    v.parse::<u16>().ok().and_then(SteelGrade::from_mpa)
                })?
            }
            Field::LoadType => self.load_type = parse_option(field, raw, LoadType::from_name)?,
            Field::MainCount => self.main_count = parse_count(field, raw)?,
            Field::Width => self.b = parse_number(field, raw)?,
            Field::Depth => self.depth = parse_number(field, raw)?,
            Field::Length => self.length = parse_number(field, raw)?,
            Field::MainDia => self.main_dia = parse_number(field, raw)?,
            Field::StirrupDia => self.stirrup_dia = parse_number(field, raw)?,
            Field::Spacing => self.spacing = parse_number(field, raw)?,
        }
        Ok(())
    }
}

/// Print whole numbers without a trailing ".0"
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn parse_number(field: Field, raw: &str) -> Result<f64, FormError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormError::NotANumber {
            field: field.key(),
            value: raw.to_string(),
        }),
    }
}

fn parse_count(field: Field, raw: &str) -> Result<i64, FormError> {
    if raw.is_empty() {
        return Ok(0);
    }
    let not_integer = || FormError::NotAnInteger {
        field: field.key(),
        value: raw.to_string(),
    };
    // "2.0" and "-1" are accepted, "2.5" is not
    let value = raw.parse::<f64>().map_err(|_| not_integer())?;
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > 1e15 {
        return Err(not_integer());
    }
    Ok(value as i64)
}

fn parse_option<T>(field: Field, raw: &str, lookup: impl Fn(&str) -> Option<T>) -> Result<T, FormError> {
    lookup(raw).ok_or_else(|| FormError::UnknownOption {
        field: field.key(),
        value: raw.to_string(),
    })
}

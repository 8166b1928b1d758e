//! Current control values of the form

use serde::Serialize;

use super::domain::{
    BoundedInt, Choice, Count, ListingType, NonNegative, PropertyType, Rating, SoldMonth,
    SoldYear, Suburb, YearBuilt,
};
use super::schema::Field;
use crate::{HousePriceError, Result};

/// Values of every control on the form
///
/// Each value is held in its domain type, so a `PropertyInputs` can never
/// hold something the corresponding control would not accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyInputs {
    pub home_and_income: bool,
    pub sea_view: bool,
    pub share_drive_way: bool,
    pub house_condition: Rating,
    pub slope: Rating,
    pub density_rating: Rating,
    pub school_zone_rating: Rating,
    pub bedrooms: Count,
    pub living_rooms: Count,
    pub bathrooms: Count,
    pub carparks: Count,
    pub land_area: NonNegative,
    pub floor_area: NonNegative,
    pub capital_value: NonNegative,
    pub year_built: YearBuilt,
    pub distance_to_school: f64,
    pub sold_year: SoldYear,
    pub sold_month: SoldMonth,
    pub suburb: Suburb,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
}

impl Default for PropertyInputs {
    fn default() -> Self {
        PropertyInputs {
            home_and_income: false,
            sea_view: false,
            share_drive_way: false,
            house_condition: Rating::clamped(3),
            slope: Rating::clamped(3),
            density_rating: Rating::clamped(3),
            school_zone_rating: Rating::clamped(3),
            bedrooms: Count::clamped(3),
            living_rooms: Count::clamped(1),
            bathrooms: Count::clamped(1),
            carparks: Count::clamped(1),
            land_area: NonNegative::clamped(300.0),
            floor_area: NonNegative::clamped(150.0),
            capital_value: NonNegative::clamped(1_000_000.0),
            year_built: YearBuilt::clamped(1970),
            distance_to_school: 1.0,
            sold_year: SoldYear::clamped(2025),
            sold_month: SoldMonth::clamped(5),
            suburb: Suburb::Other,
            property_type: PropertyType::Crosslease,
            listing_type: ListingType::Auction,
        }
    }
}

impl PropertyInputs {
    /// Current value of a control, formatted the way the form shows it
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::HomeAndIncome => flag_label(self.home_and_income),
            Field::SeaView => flag_label(self.sea_view),
            Field::ShareDriveWay => flag_label(self.share_drive_way),
            Field::HouseCondition => self.house_condition.to_string(),
            Field::Slope => self.slope.to_string(),
            Field::DensityRating => self.density_rating.to_string(),
            Field::SchoolZoneRating => self.school_zone_rating.to_string(),
            Field::Bedrooms => self.bedrooms.to_string(),
            Field::LivingRooms => self.living_rooms.to_string(),
            Field::Bathrooms => self.bathrooms.to_string(),
            Field::Carparks => self.carparks.to_string(),
            Field::LandArea => self.land_area.to_string(),
            Field::FloorArea => self.floor_area.to_string(),
            Field::CapitalValue => self.capital_value.to_string(),
            Field::YearBuilt => self.year_built.to_string(),
            Field::DistanceToSchool => format!("{:.2}", self.distance_to_school),
            Field::SoldYear => self.sold_year.to_string(),
            Field::SoldMonth => self.sold_month.to_string(),
            Field::Suburb => self.suburb.label().to_string(),
            Field::PropertyType => self.property_type.label().to_string(),
            Field::ListingType => self.listing_type.label().to_string(),
        }
    }

    /// Current value of a control as editable text
    ///
    /// Floats are written in full so that submitting the text unchanged
    /// stores the same value again.
    pub fn edit_value(&self, field: Field) -> String {
        match field {
            Field::LandArea => self.land_area.get().to_string(),
            Field::FloorArea => self.floor_area.get().to_string(),
            Field::CapitalValue => self.capital_value.get().to_string(),
            Field::DistanceToSchool => self.distance_to_school.to_string(),
            _ => self.display_value(field),
        }
    }

    /// Index of the selected option for flag and choice controls
    pub fn selected_index(&self, field: Field) -> Option<usize> {
        match field {
            Field::HomeAndIncome => Some(usize::from(self.home_and_income)),
            Field::SeaView => Some(usize::from(self.sea_view)),
            Field::ShareDriveWay => Some(usize::from(self.share_drive_way)),
            Field::Suburb => Some(self.suburb.index()),
            Field::PropertyType => Some(self.property_type.index()),
            Field::ListingType => Some(self.listing_type.index()),
            _ => None,
        }
    }

    /// Parse `raw` for `field` and store it
    ///
    /// Fails without touching the current value when `raw` does not parse or
    /// lies outside the control's range.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<()> {
        let raw = raw.trim();
        match field {
            Field::HomeAndIncome => self.home_and_income = parse_flag(field, raw)?,
            Field::SeaView => self.sea_view = parse_flag(field, raw)?,
            Field::ShareDriveWay => self.share_drive_way = parse_flag(field, raw)?,
            Field::HouseCondition => self.house_condition = parse_bounded(field, raw)?,
            Field::Slope => self.slope = parse_bounded(field, raw)?,
            Field::DensityRating => self.density_rating = parse_bounded(field, raw)?,
            Field::SchoolZoneRating => self.school_zone_rating = parse_bounded(field, raw)?,
            Field::Bedrooms => self.bedrooms = parse_bounded(field, raw)?,
            Field::LivingRooms => self.living_rooms = parse_bounded(field, raw)?,
            Field::Bathrooms => self.bathrooms = parse_bounded(field, raw)?,
            Field::Carparks => self.carparks = parse_bounded(field, raw)?,
            Field::LandArea => self.land_area = parse_non_negative(field, raw)?,
            Field::FloorArea => self.floor_area = parse_non_negative(field, raw)?,
            Field::CapitalValue => self.capital_value = parse_non_negative(field, raw)?,
            Field::YearBuilt => self.year_built = parse_bounded(field, raw)?,
            Field::DistanceToSchool => self.distance_to_school = parse_float(field, raw)?,
            Field::SoldYear => self.sold_year = parse_bounded(field, raw)?,
            Field::SoldMonth => self.sold_month = parse_bounded(field, raw)?,
            Field::Suburb => self.suburb = parse_choice(field, raw)?,
            Field::PropertyType => self.property_type = parse_choice(field, raw)?,
            Field::ListingType => self.listing_type = parse_choice(field, raw)?,
        }
        Ok(())
    }

    /// Apply a `key=value` assignment, as given on the command line
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<Field> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            HousePriceError::InvalidValue {
                field: assignment.to_string(),
                value: String::new(),
                reason: "expected key=value".to_string(),
            }
        })?;
        let field =
            Field::from_key(key).ok_or_else(|| HousePriceError::UnknownField(key.to_string()))?;
        self.set(field, value)?;
        Ok(field)
    }
}

/// Check whether `raw` would be accepted for `field`
pub fn validate(field: Field, raw: &str) -> Result<()> {
    PropertyInputs::default().set(field, raw)
}

fn flag_label(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

fn invalid(field: Field, raw: &str, reason: impl Into<String>) -> HousePriceError {
    HousePriceError::InvalidValue {
        field: field.key().to_string(),
        value: raw.to_string(),
        reason: reason.into(),
    }
}

/// Name the offending field on a bare domain error
fn for_field(field: Field, err: HousePriceError) -> HousePriceError {
    match err {
        HousePriceError::OutOfRange {
            value, min, max, ..
        } => HousePriceError::OutOfRange {
            field: field.key().to_string(),
            value,
            min,
            max,
        },
        other => other,
    }
}

fn parse_flag(field: Field, raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "0" | "no" | "false" => Ok(false),
        "1" | "yes" | "true" => Ok(true),
        _ => Err(invalid(field, raw, "expected 0 or 1")),
    }
}

fn parse_bounded<const MIN: i64, const MAX: i64>(
    field: Field,
    raw: &str,
) -> Result<BoundedInt<MIN, MAX>> {
    let value: i64 = raw
        .parse()
        .map_err(|_| invalid(field, raw, "expected a whole number"))?;
    BoundedInt::new(value).map_err(|e| for_field(field, e))
}

fn parse_float(field: Field, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .replace(',', "")
        .parse()
        .map_err(|_| invalid(field, raw, "expected a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(field, raw, "expected a finite number"))
    }
}

fn parse_non_negative(field: Field, raw: &str) -> Result<NonNegative> {
    let value = parse_float(field, raw)?;
    NonNegative::new(value).map_err(|e| for_field(field, e))
}

fn parse_choice<C: Choice>(field: Field, raw: &str) -> Result<C> {
    C::from_label(raw).ok_or_else(|| {
        invalid(
            field,
            raw,
            format!("expected one of: {}", C::labels().join(", ")),
        )
    })
}

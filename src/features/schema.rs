//! Form and model schema
//!
//! The controls shown on the form and the columns handed to the model are
//! declared here once. Rendering walks [`Field::ALL`], record assembly walks
//! [`Column::ALL`], and every column names the control it is derived from.

use std::fmt;

use super::domain::{Count, Rating, SoldMonth, SoldYear, YearBuilt};

/// Page section a control is rendered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    GeneralInfo,
    Ratings,
    Size,
    ValueTiming,
    LocationType,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::GeneralInfo,
        Section::Ratings,
        Section::Size,
        Section::ValueTiming,
        Section::LocationType,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::GeneralInfo => "📋 General Property Information",
            Section::Ratings => "🏗️ Ratings",
            Section::Size => "📐 Property Size & Layout",
            Section::ValueTiming => "💰 Value & Timing",
            Section::LocationType => "📍 Location & Type",
        }
    }

    /// Controls in this section, in render order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| f.section() == *self)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Kind of control, which also fixes the domain of its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// 0/1 select box
    Flag,
    /// Integer slider over an inclusive range
    Slider { min: i64, max: i64 },
    /// Integer number input; `max` of `None` means unbounded above
    Integer { min: i64, max: Option<i64> },
    /// Float number input; `min` of `None` means unbounded
    Float { min: Option<f64> },
    /// Exclusive choice (radio group)
    Choice(&'static [&'static str]),
}

const SUBURB_OPTIONS: &[&str] = &["Mairangi Bay", "Other"];
const PROPERTY_TYPE_OPTIONS: &[&str] = &["Crosslease", "Freehold", "Townhouse"];
const LISTING_TYPE_OPTIONS: &[&str] = &["Auction", "No Auction"];

/// A control on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    HomeAndIncome,
    SeaView,
    ShareDriveWay,
    HouseCondition,
    Slope,
    DensityRating,
    SchoolZoneRating,
    Bedrooms,
    LivingRooms,
    Bathrooms,
    Carparks,
    LandArea,
    FloorArea,
    CapitalValue,
    YearBuilt,
    DistanceToSchool,
    SoldYear,
    SoldMonth,
    Suburb,
    PropertyType,
    ListingType,
}

impl Field {
    /// Every control, in render order
    pub const ALL: [Field; 21] = [
        Field::HomeAndIncome,
        Field::SeaView,
        Field::ShareDriveWay,
        Field::HouseCondition,
        Field::Slope,
        Field::DensityRating,
        Field::SchoolZoneRating,
        Field::Bedrooms,
        Field::LivingRooms,
        Field::Bathrooms,
        Field::Carparks,
        Field::LandArea,
        Field::FloorArea,
        Field::CapitalValue,
        Field::YearBuilt,
        Field::DistanceToSchool,
        Field::SoldYear,
        Field::SoldMonth,
        Field::Suburb,
        Field::PropertyType,
        Field::ListingType,
    ];

    /// Stable key used on the command line (`--set bedrooms=4`)
    pub fn key(&self) -> &'static str {
        match self {
            Field::HomeAndIncome => "home_and_income",
            Field::SeaView => "sea_view",
            Field::ShareDriveWay => "share_drive_way",
            Field::HouseCondition => "house_condition",
            Field::Slope => "slope",
            Field::DensityRating => "density_rating",
            Field::SchoolZoneRating => "school_zone_rating",
            Field::Bedrooms => "bedrooms",
            Field::LivingRooms => "living_rooms",
            Field::Bathrooms => "bathrooms",
            Field::Carparks => "carparks",
            Field::LandArea => "land_area",
            Field::FloorArea => "floor_area",
            Field::CapitalValue => "capital_value",
            Field::YearBuilt => "year_built",
            Field::DistanceToSchool => "distance_to_school",
            Field::SoldYear => "sold_year",
            Field::SoldMonth => "sold_month",
            Field::Suburb => "suburb",
            Field::PropertyType => "property_type",
            Field::ListingType => "listing_type",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        let key = key.trim().to_lowercase().replace('-', "_");
        Field::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::HomeAndIncome => "Home & Income?",
            Field::SeaView => "Sea View?",
            Field::ShareDriveWay => "Shared Driveway?",
            Field::HouseCondition => "🏠 House Condition (1 = Poor, 5 = Excellent)",
            Field::Slope => "⛰️ Slope (1 = Flat, 5 = Steep)",
            Field::DensityRating => "🏘️ Density (1 = Spacious, 5 = Crowded)",
            Field::SchoolZoneRating => "🎓 School Zone (1 = Poor, 5 = Excellent)",
            Field::Bedrooms => "Bedrooms",
            Field::LivingRooms => "Living Rooms",
            Field::Bathrooms => "Bathrooms",
            Field::Carparks => "Carparks",
            Field::LandArea => "Land Area (sqm)",
            Field::FloorArea => "Floor Area (sqm)",
            Field::CapitalValue => "Capital Value ($)",
            Field::YearBuilt => "Year Built",
            Field::DistanceToSchool => "Distance to Nearest School (km)",
            Field::SoldYear => "Sold Year",
            Field::SoldMonth => "Sold Month",
            Field::Suburb => "Suburb",
            Field::PropertyType => "Property Type",
            Field::ListingType => "Listing Type",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Field::HomeAndIncome | Field::SeaView | Field::ShareDriveWay => Section::GeneralInfo,
            Field::HouseCondition
            | Field::Slope
            | Field::DensityRating
            | Field::SchoolZoneRating => Section::Ratings,
            Field::Bedrooms
            | Field::LivingRooms
            | Field::Bathrooms
            | Field::Carparks
            | Field::LandArea
            | Field::FloorArea => Section::Size,
            Field::CapitalValue
            | Field::YearBuilt
            | Field::DistanceToSchool
            | Field::SoldYear
            | Field::SoldMonth => Section::ValueTiming,
            Field::Suburb | Field::PropertyType | Field::ListingType => Section::LocationType,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::HomeAndIncome | Field::SeaView | Field::ShareDriveWay => FieldKind::Flag,
            Field::HouseCondition
            | Field::Slope
            | Field::DensityRating
            | Field::SchoolZoneRating => FieldKind::Slider {
                min: Rating::LOWER,
                max: Rating::UPPER,
            },
            Field::SoldMonth => FieldKind::Slider {
                min: SoldMonth::LOWER,
                max: SoldMonth::UPPER,
            },
            Field::Bedrooms | Field::LivingRooms | Field::Bathrooms | Field::Carparks => {
                FieldKind::Integer {
                    min: Count::LOWER,
                    max: None,
                }
            }
            Field::YearBuilt => FieldKind::Integer {
                min: YearBuilt::LOWER,
                max: Some(YearBuilt::UPPER),
            },
            Field::SoldYear => FieldKind::Integer {
                min: SoldYear::LOWER,
                max: Some(SoldYear::UPPER),
            },
            Field::LandArea | Field::FloorArea | Field::CapitalValue => {
                FieldKind::Float { min: Some(0.0) }
            }
            Field::DistanceToSchool => FieldKind::Float { min: None },
            Field::Suburb => FieldKind::Choice(SUBURB_OPTIONS),
            Field::PropertyType => FieldKind::Choice(PROPERTY_TYPE_OPTIONS),
            Field::ListingType => FieldKind::Choice(LISTING_TYPE_OPTIONS),
        }
    }

    /// Model columns fed by this control
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        Column::ALL.into_iter().filter(move |c| c.source() == *self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Scalar type of a model column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Integer,
    Float,
}

/// A model input column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    HomeAndIncome,
    HouseConditionRating,
    Bedrooms,
    Bathrooms,
    LivingRooms,
    Carparks,
    CapitalValue,
    SeaView,
    ShareDriveWay,
    Slope,
    DensityRating,
    LandArea,
    FloorArea,
    SchoolZoneRating,
    YearBuilt,
    DistanceToSchool,
    SuburbMairangiBay,
    PropertyTypeCrosslease,
    PropertyTypeFreehold,
    PropertyTypeTownhouse,
    ListingTypeAuction,
    ListingTypeNoAuction,
    SoldYear,
    SoldMonth,
}

impl Column {
    /// Number of model columns
    pub const COUNT: usize = 24;

    /// Every column, in the order the model was trained on
    pub const ALL: [Column; Column::COUNT] = [
        Column::HomeAndIncome,
        Column::HouseConditionRating,
        Column::Bedrooms,
        Column::Bathrooms,
        Column::LivingRooms,
        Column::Carparks,
        Column::CapitalValue,
        Column::SeaView,
        Column::ShareDriveWay,
        Column::Slope,
        Column::DensityRating,
        Column::LandArea,
        Column::FloorArea,
        Column::SchoolZoneRating,
        Column::YearBuilt,
        Column::DistanceToSchool,
        Column::SuburbMairangiBay,
        Column::PropertyTypeCrosslease,
        Column::PropertyTypeFreehold,
        Column::PropertyTypeTownhouse,
        Column::ListingTypeAuction,
        Column::ListingTypeNoAuction,
        Column::SoldYear,
        Column::SoldMonth,
    ];

    /// Column name exactly as the model knows it
    pub fn name(&self) -> &'static str {
        match self {
            Column::HomeAndIncome => "Home_And_Income",
            Column::HouseConditionRating => "House_Condition_Rating",
            Column::Bedrooms => "Bedrooms",
            Column::Bathrooms => "Bathrooms",
            Column::LivingRooms => "Living_Rooms",
            Column::Carparks => "Carparks",
            Column::CapitalValue => "Capital_Value",
            Column::SeaView => "Sea_View",
            Column::ShareDriveWay => "Share_Drive_Way",
            Column::Slope => "Slope",
            Column::DensityRating => "Density_Rating",
            Column::LandArea => "Land_Area",
            Column::FloorArea => "Floor_Area",
            Column::SchoolZoneRating => "School_Zone_Rating",
            Column::YearBuilt => "Year_built",
            Column::DistanceToSchool => "Distance_to_School",
            Column::SuburbMairangiBay => "Suburb_Mairangi Bay",
            Column::PropertyTypeCrosslease => "Property_Type_Crosslease",
            Column::PropertyTypeFreehold => "Property_Type_Freehold",
            Column::PropertyTypeTownhouse => "Property_Type_Townhouse",
            Column::ListingTypeAuction => "Listing_Type_Auction",
            Column::ListingTypeNoAuction => "Listing_Type_No Auction",
            Column::SoldYear => "Sold_Year",
            Column::SoldMonth => "Sold_Month",
        }
    }

    /// Control this column is read or derived from
    pub fn source(&self) -> Field {
        match self {
            Column::HomeAndIncome => Field::HomeAndIncome,
            Column::HouseConditionRating => Field::HouseCondition,
            Column::Bedrooms => Field::Bedrooms,
            Column::Bathrooms => Field::Bathrooms,
            Column::LivingRooms => Field::LivingRooms,
            Column::Carparks => Field::Carparks,
            Column::CapitalValue => Field::CapitalValue,
            Column::SeaView => Field::SeaView,
            Column::ShareDriveWay => Field::ShareDriveWay,
            Column::Slope => Field::Slope,
            Column::DensityRating => Field::DensityRating,
            Column::LandArea => Field::LandArea,
            Column::FloorArea => Field::FloorArea,
            Column::SchoolZoneRating => Field::SchoolZoneRating,
            Column::YearBuilt => Field::YearBuilt,
            Column::DistanceToSchool => Field::DistanceToSchool,
            Column::SuburbMairangiBay => Field::Suburb,
            Column::PropertyTypeCrosslease
            | Column::PropertyTypeFreehold
            | Column::PropertyTypeTownhouse => Field::PropertyType,
            Column::ListingTypeAuction | Column::ListingTypeNoAuction => Field::ListingType,
            Column::SoldYear => Field::SoldYear,
            Column::SoldMonth => Field::SoldMonth,
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Column::CapitalValue
            | Column::LandArea
            | Column::FloorArea
            | Column::DistanceToSchool => ScalarType::Float,
            _ => ScalarType::Integer,
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Every column name, in model order
    pub fn names() -> Vec<String> {
        Column::ALL.iter().map(|c| c.name().to_string()).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::domain::{Choice, ListingType, PropertyType, Suburb};
    use std::collections::HashSet;

    fn choice_labels(field: Field) -> Option<Vec<&'static str>> {
        match field {
            Field::Suburb => Some(Suburb::labels()),
            Field::PropertyType => Some(PropertyType::labels()),
            Field::ListingType => Some(ListingType::labels()),
            _ => None,
        }
    }

    #[test]
    fn test_column_names_unique() {
        let names: HashSet<_> = Column::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), Column::COUNT);
    }

    #[test]
    fn test_column_order() {
        assert_eq!(Column::ALL[0].name(), "Home_And_Income");
        assert_eq!(Column::ALL[15].name(), "Distance_to_School");
        assert_eq!(Column::ALL[16].name(), "Suburb_Mairangi Bay");
        assert_eq!(Column::ALL[21].name(), "Listing_Type_No Auction");
        assert_eq!(Column::ALL[23].name(), "Sold_Month");
    }

    #[test]
    fn test_every_field_feeds_a_column() {
        for field in Field::ALL {
            assert!(field.columns().count() >= 1, "{:?} feeds no column", field);
        }
        assert_eq!(Field::PropertyType.columns().count(), 3);
        assert_eq!(Field::ListingType.columns().count(), 2);
        assert_eq!(Field::Suburb.columns().count(), 1);
    }

    #[test]
    fn test_every_field_in_a_section() {
        let total: usize = Section::ALL.iter().map(|s| s.fields().count()).sum();
        assert_eq!(total, Field::ALL.len());
        assert_eq!(Section::GeneralInfo.fields().count(), 3);
        assert_eq!(Section::Ratings.fields().count(), 4);
    }

    #[test]
    fn test_choice_options_match_types() {
        for field in Field::ALL {
            if let FieldKind::Choice(options) = field.kind() {
                assert_eq!(Some(options.to_vec()), choice_labels(field));
            }
        }
    }

    #[test]
    fn test_kind_bounds_match_inputs() {
        use crate::features::PropertyInputs;

        let mut inputs = PropertyInputs::default();
        for field in Field::ALL {
            let (min, max) = match field.kind() {
                FieldKind::Slider { min, max } => (min, Some(max)),
                FieldKind::Integer { min, max } => (min, max),
                _ => continue,
            };
            assert!(inputs.set(field, &min.to_string()).is_ok(), "{}", field);
            assert!(inputs.set(field, &(min - 1).to_string()).is_err(), "{}", field);
            if let Some(max) = max {
                assert!(inputs.set(field, &max.to_string()).is_ok(), "{}", field);
                assert!(inputs.set(field, &(max + 1).to_string()).is_err(), "{}", field);
            }
        }
        assert_eq!(Field::YearBuilt.kind(), FieldKind::Integer { min: 1800, max: Some(2025) });
        assert_eq!(Field::SoldMonth.kind(), FieldKind::Slider { min: 1, max: 12 });
    }

    #[test]
    fn test_field_keys() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("Sold-Year"), Some(Field::SoldYear));
        assert_eq!(Field::from_key("garage"), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            Column::from_name("Listing_Type_No Auction"),
            Some(Column::ListingTypeNoAuction)
        );
        assert_eq!(Column::from_name("Sold Year"), None);
    }
}

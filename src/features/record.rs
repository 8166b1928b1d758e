//! Feature record handed to the model

use serde::Serialize;
use std::fmt;

use super::domain::{Choice, ListingType, PropertyType, Suburb};
use super::inputs::PropertyInputs;
use super::schema::{Column, ScalarType};

/// A single scalar column value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            FeatureValue::Int(v) => v as f64,
            FeatureValue::Float(v) => v,
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            FeatureValue::Int(_) => ScalarType::Integer,
            FeatureValue::Float(_) => ScalarType::Float,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{}", v),
            FeatureValue::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// One row of model input, one field per model column
///
/// Fields are declared in model column order and serialize under the model's
/// column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    #[serde(rename = "Home_And_Income")]
    pub home_and_income: i64,
    #[serde(rename = "House_Condition_Rating")]
    pub house_condition_rating: i64,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: i64,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: i64,
    #[serde(rename = "Living_Rooms")]
    pub living_rooms: i64,
    #[serde(rename = "Carparks")]
    pub carparks: i64,
    #[serde(rename = "Capital_Value")]
    pub capital_value: f64,
    #[serde(rename = "Sea_View")]
    pub sea_view: i64,
    #[serde(rename = "Share_Drive_Way")]
    pub share_drive_way: i64,
    #[serde(rename = "Slope")]
    pub slope: i64,
    #[serde(rename = "Density_Rating")]
    pub density_rating: i64,
    #[serde(rename = "Land_Area")]
    pub land_area: f64,
    #[serde(rename = "Floor_Area")]
    pub floor_area: f64,
    #[serde(rename = "School_Zone_Rating")]
    pub school_zone_rating: i64,
    #[serde(rename = "Year_built")]
    pub year_built: i64,
    #[serde(rename = "Distance_to_School")]
    pub distance_to_school: f64,
    #[serde(rename = "Suburb_Mairangi Bay")]
    pub suburb_mairangi_bay: i64,
    #[serde(rename = "Property_Type_Crosslease")]
    pub property_type_crosslease: i64,
    #[serde(rename = "Property_Type_Freehold")]
    pub property_type_freehold: i64,
    #[serde(rename = "Property_Type_Townhouse")]
    pub property_type_townhouse: i64,
    #[serde(rename = "Listing_Type_Auction")]
    pub listing_type_auction: i64,
    #[serde(rename = "Listing_Type_No Auction")]
    pub listing_type_no_auction: i64,
    #[serde(rename = "Sold_Year")]
    pub sold_year: i64,
    #[serde(rename = "Sold_Month")]
    pub sold_month: i64,
}

impl FeatureRecord {
    /// Dimension of the feature vector
    pub const DIM: usize = Column::COUNT;

    /// Assemble the record from the current control values
    pub fn from_inputs(inputs: &PropertyInputs) -> Self {
        FeatureRecord {
            home_and_income: i64::from(inputs.home_and_income),
            house_condition_rating: inputs.house_condition.get(),
            bedrooms: inputs.bedrooms.get(),
            bathrooms: inputs.bathrooms.get(),
            living_rooms: inputs.living_rooms.get(),
            carparks: inputs.carparks.get(),
            capital_value: inputs.capital_value.get(),
            sea_view: i64::from(inputs.sea_view),
            share_drive_way: i64::from(inputs.share_drive_way),
            slope: inputs.slope.get(),
            density_rating: inputs.density_rating.get(),
            land_area: inputs.land_area.get(),
            floor_area: inputs.floor_area.get(),
            school_zone_rating: inputs.school_zone_rating.get(),
            year_built: inputs.year_built.get(),
            distance_to_school: inputs.distance_to_school,
            suburb_mairangi_bay: inputs.suburb.indicator(Suburb::MairangiBay),
            property_type_crosslease: inputs.property_type.indicator(PropertyType::Crosslease),
            property_type_freehold: inputs.property_type.indicator(PropertyType::Freehold),
            property_type_townhouse: inputs.property_type.indicator(PropertyType::Townhouse),
            listing_type_auction: inputs.listing_type.indicator(ListingType::Auction),
            listing_type_no_auction: inputs.listing_type.indicator(ListingType::NoAuction),
            sold_year: inputs.sold_year.get(),
            sold_month: inputs.sold_month.get(),
        }
    }

    /// Value of a single column
    pub fn value(&self, column: Column) -> FeatureValue {
        use FeatureValue::{Float, Int};

        match column {
            Column::HomeAndIncome => Int(self.home_and_income),
            Column::HouseConditionRating => Int(self.house_condition_rating),
            Column::Bedrooms => Int(self.bedrooms),
            Column::Bathrooms => Int(self.bathrooms),
            Column::LivingRooms => Int(self.living_rooms),
            Column::Carparks => Int(self.carparks),
            Column::CapitalValue => Float(self.capital_value),
            Column::SeaView => Int(self.sea_view),
            Column::ShareDriveWay => Int(self.share_drive_way),
            Column::Slope => Int(self.slope),
            Column::DensityRating => Int(self.density_rating),
            Column::LandArea => Float(self.land_area),
            Column::FloorArea => Float(self.floor_area),
            Column::SchoolZoneRating => Int(self.school_zone_rating),
            Column::YearBuilt => Int(self.year_built),
            Column::DistanceToSchool => Float(self.distance_to_school),
            Column::SuburbMairangiBay => Int(self.suburb_mairangi_bay),
            Column::PropertyTypeCrosslease => Int(self.property_type_crosslease),
            Column::PropertyTypeFreehold => Int(self.property_type_freehold),
            Column::PropertyTypeTownhouse => Int(self.property_type_townhouse),
            Column::ListingTypeAuction => Int(self.listing_type_auction),
            Column::ListingTypeNoAuction => Int(self.listing_type_no_auction),
            Column::SoldYear => Int(self.sold_year),
            Column::SoldMonth => Int(self.sold_month),
        }
    }

    /// (column, value) pairs in model order
    pub fn entries(&self) -> impl Iterator<Item = (Column, FeatureValue)> + '_ {
        Column::ALL.into_iter().map(move |c| (c, self.value(c)))
    }

    /// Convert to a flat vector in model order
    pub fn to_vec(&self) -> Vec<f64> {
        self.entries().map(|(_, v)| v.as_f64()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::schema::Field;

    fn one_hot_sum(record: &FeatureRecord, field: Field) -> i64 {
        field
            .columns()
            .map(|c| match record.value(c) {
                FeatureValue::Int(v) => v,
                FeatureValue::Float(v) => panic!("one-hot column {} is float {}", c, v),
            })
            .sum()
    }

    #[test]
    fn test_default_record() {
        let record = FeatureRecord::from_inputs(&PropertyInputs::default());

        assert_eq!(record.suburb_mairangi_bay, 0);
        assert_eq!(record.property_type_crosslease, 1);
        assert_eq!(record.property_type_freehold, 0);
        assert_eq!(record.property_type_townhouse, 0);
        assert_eq!(record.listing_type_auction, 1);
        assert_eq!(record.listing_type_no_auction, 0);

        assert_eq!(record.bedrooms, 3);
        assert_eq!(record.capital_value, 1_000_000.0);
        assert_eq!(record.year_built, 1970);
        assert_eq!(record.sold_year, 2025);
        assert_eq!(record.sold_month, 5);
        assert_eq!(record.house_condition_rating, 3);
        assert_eq!(record.home_and_income, 0);
    }

    #[test]
    fn test_all_columns_with_types() {
        let record = FeatureRecord::from_inputs(&PropertyInputs::default());
        let entries: Vec<_> = record.entries().collect();

        assert_eq!(entries.len(), FeatureRecord::DIM);
        for (column, value) in entries {
            assert_eq!(value.scalar_type(), column.scalar_type(), "{}", column);
        }
    }

    #[test]
    fn test_one_hot_every_selection() {
        let mut inputs = PropertyInputs::default();
        for suburb in Suburb::ALL {
            for property_type in PropertyType::ALL {
                for listing_type in ListingType::ALL {
                    inputs.suburb = *suburb;
                    inputs.property_type = *property_type;
                    inputs.listing_type = *listing_type;
                    let record = FeatureRecord::from_inputs(&inputs);

                    assert_eq!(one_hot_sum(&record, Field::PropertyType), 1);
                    assert_eq!(one_hot_sum(&record, Field::ListingType), 1);
                    assert_eq!(
                        record.suburb_mairangi_bay,
                        i64::from(*suburb == Suburb::MairangiBay)
                    );
                }
            }
        }
    }

    #[test]
    fn test_serializes_with_column_names_in_order() {
        let record = FeatureRecord::from_inputs(&PropertyInputs::default());
        let json = serde_json::to_string(&record).unwrap();

        let mut last = 0;
        for column in Column::ALL {
            let key = format!("\"{}\":", column.name());
            let pos = json.find(&key).unwrap_or_else(|| panic!("missing {}", key));
            assert!(pos >= last, "{} out of order", column);
            last = pos;
        }
        assert!(json.contains("\"Suburb_Mairangi Bay\":0"));
        assert!(json.contains("\"Capital_Value\":1000000.0"));
    }

    #[test]
    fn test_to_vec() {
        let mut inputs = PropertyInputs::default();
        inputs.sea_view = true;
        let v = FeatureRecord::from_inputs(&inputs).to_vec();

        assert_eq!(v.len(), FeatureRecord::DIM);
        assert_eq!(v[7], 1.0);
        assert_eq!(v[23], 5.0);
    }
}

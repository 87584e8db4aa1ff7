//! Feature encoder: deterministic mapping from `PatientProfile` to the
//! numeric vector the classifier was trained on.
//!
//! The column order is declared once in [`EXPECTED_COLUMNS`] and reproduced
//! by [`encode`] as a single fixed-order array literal. Artifact loading
//! validates its `feature_names` against the same constant, so a
//! model/schema drift fails at startup rather than producing a silently
//! misordered prediction.

use super::patient::{
    AirPollutionExposure, AlcoholConsumption, DietaryHabits, EkgResult, Gender, IncomeLevel,
    PatientProfile, PhysicalActivity, Region, SmokingStatus, StressLevel,
};

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 25;

/// Column order expected by the trained classifier and scaler.
pub const EXPECTED_COLUMNS: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "region",
    "income_level",
    "hypertension",
    "diabetes",
    "cholesterol_level",
    "waist_circumference",
    "family_history",
    "smoking_status",
    "alcohol_consumption",
    "physical_activity",
    "dietary_habits",
    "air_pollution_exposure",
    "stress_level",
    "sleep_hours",
    "blood_pressure_systolic",
    "blood_pressure_diastolic",
    "fasting_blood_sugar",
    "cholesterol_hdl",
    "cholesterol_ldl",
    "triglycerides",
    "EKG_results",
    "previous_heart_disease",
    "medication_usage",
];

/// Errors raised while turning raw inputs into an encoded feature vector.
///
/// These are input problems: they must be caught before the scaler or model
/// is ever invoked, and are surfaced as actionable form messages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("{field}: unrecognized value {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("{field}: a value is required")]
    MissingValue { field: &'static str },

    #[error("{field}: not a valid number")]
    InvalidNumber { field: &'static str },

    #[error("{field}: {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl EncodingError {
    pub(crate) fn unknown(field: &'static str, value: &str) -> Self {
        Self::UnknownCategory {
            field,
            value: value.to_string(),
        }
    }
}

/// One encoded patient record: a fixed-length ordered numeric vector,
/// one slot per [`EXPECTED_COLUMNS`] entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Gender {
    /// Male→1, Female→0
    fn encoded(self) -> f64 {
        match self {
            Self::Male => 1.0,
            Self::Female => 0.0,
        }
    }
}

impl Region {
    /// Urban→1, Rural→0
    fn encoded(self) -> f64 {
        match self {
            Self::Urban => 1.0,
            Self::Rural => 0.0,
        }
    }
}

impl IncomeLevel {
    /// Low→0, Middle→1, High→2
    fn encoded(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Middle => 1.0,
            Self::High => 2.0,
        }
    }
}

impl SmokingStatus {
    /// Never→0, Past→1, Current→2
    fn encoded(self) -> f64 {
        match self {
            Self::Never => 0.0,
            Self::Past => 1.0,
            Self::Current => 2.0,
        }
    }
}

impl AlcoholConsumption {
    /// None→0, Moderate→1, High→2
    fn encoded(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Moderate => 1.0,
            Self::High => 2.0,
        }
    }
}

impl PhysicalActivity {
    /// Low→0, Moderate→1, High→2
    fn encoded(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Moderate => 1.0,
            Self::High => 2.0,
        }
    }
}

impl DietaryHabits {
    /// Unhealthy→1, Healthy→0
    fn encoded(self) -> f64 {
        match self {
            Self::Healthy => 0.0,
            Self::Unhealthy => 1.0,
        }
    }
}

impl AirPollutionExposure {
    /// Low→0, Moderate→1, High→2
    fn encoded(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Moderate => 1.0,
            Self::High => 2.0,
        }
    }
}

impl StressLevel {
    /// Low→0, Moderate→1, High→2
    fn encoded(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Moderate => 1.0,
            Self::High => 2.0,
        }
    }
}

impl EkgResult {
    /// Abnormal→1, Normal→0
    fn encoded(self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::Abnormal => 1.0,
        }
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Encode a patient profile into the model's input order.
///
/// Pure and deterministic: the same profile always yields the same vector.
/// The array literal below must stay in lockstep with [`EXPECTED_COLUMNS`];
/// the unit tests pin every slot.
#[must_use]
pub fn encode(profile: &PatientProfile) -> FeatureVector {
    FeatureVector([
        f64::from(profile.age),
        profile.gender.encoded(),
        profile.region.encoded(),
        profile.income_level.encoded(),
        flag(profile.hypertension),
        flag(profile.diabetes),
        f64::from(profile.cholesterol_level),
        f64::from(profile.waist_circumference),
        flag(profile.family_history),
        profile.smoking_status.encoded(),
        profile.alcohol_consumption.encoded(),
        profile.physical_activity.encoded(),
        profile.dietary_habits.encoded(),
        profile.air_pollution_exposure.encoded(),
        profile.stress_level.encoded(),
        f64::from(profile.sleep_hours),
        f64::from(profile.blood_pressure_systolic),
        f64::from(profile.blood_pressure_diastolic),
        f64::from(profile.fasting_blood_sugar),
        f64::from(profile.cholesterol_hdl),
        f64::from(profile.cholesterol_ldl),
        f64::from(profile.triglycerides),
        profile.ekg_results.encoded(),
        flag(profile.previous_heart_disease),
        flag(profile.medication_usage),
    ])
}

/// Index of a column in [`EXPECTED_COLUMNS`]. Test helper kept close to the
/// schema so slot assertions read by name instead of magic numbers.
#[cfg(test)]
pub(crate) fn column_index(name: &str) -> usize {
    EXPECTED_COLUMNS
        .iter()
        .position(|&c| c == name)
        .unwrap_or_else(|| panic!("unknown column {name}"))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::baseline_profile;
    use super::*;

    #[test]
    fn test_vector_has_25_slots_in_schema_order() {
        let vec = encode(&baseline_profile());
        assert_eq!(vec.as_slice().len(), FEATURE_COUNT);
        assert_eq!(EXPECTED_COLUMNS.len(), FEATURE_COUNT);

        // Spot-check representative slots against the schema constant.
        let v = vec.as_slice();
        assert_eq!(v[column_index("age")], 45.0);
        assert_eq!(v[column_index("cholesterol_level")], 200.0);
        assert_eq!(v[column_index("sleep_hours")], 7.0);
        assert_eq!(v[column_index("blood_pressure_systolic")], 120.0);
        assert_eq!(v[column_index("triglycerides")], 150.0);
        assert_eq!(v[column_index("medication_usage")], 0.0);
    }

    #[test]
    fn test_categorical_encoding_table() {
        let mut profile = baseline_profile();
        profile.gender = Gender::Male;
        profile.region = Region::Urban;
        profile.income_level = IncomeLevel::High;
        profile.smoking_status = SmokingStatus::Current;
        profile.alcohol_consumption = AlcoholConsumption::Moderate;
        profile.physical_activity = PhysicalActivity::Low;
        profile.dietary_habits = DietaryHabits::Unhealthy;
        profile.air_pollution_exposure = AirPollutionExposure::High;
        profile.stress_level = StressLevel::Moderate;
        profile.ekg_results = EkgResult::Abnormal;

        let v = encode(&profile);
        let v = v.as_slice();
        assert_eq!(v[column_index("gender")], 1.0);
        assert_eq!(v[column_index("region")], 1.0);
        assert_eq!(v[column_index("income_level")], 2.0);
        assert_eq!(v[column_index("smoking_status")], 2.0);
        assert_eq!(v[column_index("alcohol_consumption")], 1.0);
        assert_eq!(v[column_index("physical_activity")], 0.0);
        assert_eq!(v[column_index("dietary_habits")], 1.0);
        assert_eq!(v[column_index("air_pollution_exposure")], 2.0);
        assert_eq!(v[column_index("stress_level")], 1.0);
        assert_eq!(v[column_index("EKG_results")], 1.0);
    }

    #[test]
    fn test_female_rural_low_income_encode_to_zero() {
        let mut profile = baseline_profile();
        profile.gender = Gender::Female;
        profile.region = Region::Rural;
        profile.income_level = IncomeLevel::Low;

        let v = encode(&profile);
        let v = v.as_slice();
        assert_eq!(v[column_index("gender")], 0.0);
        assert_eq!(v[column_index("region")], 0.0);
        assert_eq!(v[column_index("income_level")], 0.0);
    }

    #[test]
    fn test_boolean_flags_encode_as_zero_one() {
        let mut profile = baseline_profile();
        profile.hypertension = true;
        profile.diabetes = true;
        profile.family_history = true;
        profile.previous_heart_disease = true;
        profile.medication_usage = true;

        let v = encode(&profile);
        let v = v.as_slice();
        for col in [
            "hypertension",
            "diabetes",
            "family_history",
            "previous_heart_disease",
            "medication_usage",
        ] {
            assert_eq!(v[column_index(col)], 1.0, "{col}");
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let profile = baseline_profile();
        assert_eq!(encode(&profile), encode(&profile));
    }
}
